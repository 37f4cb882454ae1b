use cardio_probe::config::cli::{
    AskArgs, ArtifactArgs, Command, HistoryArgs, LogFormat, SimulateArgs, SmokeArgs,
};
use cardio_probe::config::PayloadOverrides;
use cardio_probe::core::feature_check::check_payload;
use cardio_probe::core::history::{entry_from_prediction, render_history};
use cardio_probe::core::simulator::{project_risk, Scenario};
use cardio_probe::core::{advisor, HistoryStore};
use cardio_probe::utils::error::{ErrorSeverity, ProbeError, Result};
use cardio_probe::utils::logger;
use cardio_probe::utils::validation::{validate_probability, Validate};
use cardio_probe::{
    ArtifactFeatureSource, CliConfig, FeatureLister, HttpPredictionClient, JsonHistoryStore,
    PatientRecord, Settings, SmokeTest,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// `Ok(Some(_))` 代表失敗訊息已輸出
type CommandResult = Result<Option<ErrorSeverity>>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => run(&cli.command, settings).await,
        Err(e) => Err(e),
    };

    let failure = match outcome {
        Ok(failure) => failure,
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            println!("Error: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            Some(e.severity())
        }
    };

    // 預設維持診斷腳本的行為：失敗也以 0 結束
    if let Some(severity) = failure {
        if cli.strict && severity.exit_code() > 0 {
            std::process::exit(severity.exit_code());
        }
    }
}

async fn run(command: &Command, settings: Settings) -> CommandResult {
    match command {
        Command::Features(args) => list_features(args, &settings),
        Command::Smoke(args) => smoke(args, settings).await,
        Command::Check(args) => check(args, &settings),
        Command::History(args) => history(args, &settings),
        Command::Simulate(args) => simulate(args, &settings),
        Command::Ask(args) => ask(args, &settings),
    }
}

fn feature_source(args: &ArtifactArgs, settings: &Settings) -> ArtifactFeatureSource {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| settings.features_path.clone());
    ArtifactFeatureSource::new(path, args.format.or(settings.features_format))
}

fn history_store(args: &HistoryArgs, settings: &Settings) -> JsonHistoryStore {
    let path: PathBuf = args
        .history_file
        .clone()
        .unwrap_or_else(|| settings.history_path.clone());
    JsonHistoryStore::new(path)
}

fn list_features(args: &ArtifactArgs, settings: &Settings) -> CommandResult {
    let report = FeatureLister::new(feature_source(args, settings)).run();
    println!("{}", report);
    Ok(report.error().map(ProbeError::severity))
}

async fn smoke(args: &SmokeArgs, mut settings: Settings) -> CommandResult {
    if let Some(url) = &args.url {
        settings.endpoint_url = url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        settings.timeout = Some(Duration::from_secs(secs));
    }
    settings.validate()?;

    let record = args.payload.apply(settings.payload);
    let client =
        HttpPredictionClient::with_options(&settings.endpoint_url, settings.timeout, &settings.headers)?;
    let smoke = SmokeTest::new(client, record);

    println!("{}", smoke.announcement());
    let report = smoke.run().await;
    println!("{}", report);

    if args.interpret {
        match report.interpretation() {
            Some(summary) => println!("{}", summary),
            None => tracing::info!("Response is not a risk prediction, nothing to interpret"),
        }
    }

    if args.record {
        match report.prediction() {
            Some(prediction) => {
                let store = history_store(&args.history, &settings);
                store.record(entry_from_prediction(
                    &args.name,
                    &prediction,
                    &record,
                    chrono::Utc::now(),
                ))?;
                tracing::info!("📝 Prediction recorded in {}", store.path().display());
            }
            None => tracing::warn!("⚠️ No prediction in the response, history left unchanged"),
        }
    }

    Ok(report.error().map(ProbeError::severity))
}

fn check(args: &ArtifactArgs, settings: &Settings) -> CommandResult {
    let report = FeatureLister::new(feature_source(args, settings)).run();
    let Some(features) = report.features() else {
        println!("{}", report);
        return Ok(report.error().map(ProbeError::severity));
    };

    let result = check_payload(features, PatientRecord::field_names());
    println!("{}", result);

    if result.is_consistent() {
        Ok(None)
    } else {
        Ok(Some(ErrorSeverity::High))
    }
}

fn history(args: &HistoryArgs, settings: &Settings) -> CommandResult {
    let store = history_store(args, settings);
    let entries = store.entries()?;
    println!("{}", render_history(&entries));
    Ok(None)
}

/// 未指定風險值時取最新一筆紀錄
fn baseline(
    risk: Option<f64>,
    overrides: &PayloadOverrides,
    args: &HistoryArgs,
    settings: &Settings,
) -> Result<(f64, PatientRecord)> {
    if let Some(risk) = risk {
        validate_probability("risk", risk)?;
        return Ok((risk, overrides.apply(settings.payload)));
    }

    let store = history_store(args, settings);
    let latest = store
        .entries()?
        .into_iter()
        .next()
        .ok_or_else(|| ProbeError::MissingConfigError {
            field: "risk (no recorded prediction to fall back on)".to_string(),
        })?;
    tracing::debug!("Using recorded prediction from {}", latest.date);
    Ok((latest.risk, overrides.apply(latest.record)))
}

fn simulate(args: &SimulateArgs, settings: &Settings) -> CommandResult {
    let (risk, record) = baseline(args.risk, &args.payload, &args.history, settings)?;
    let scenario = Scenario {
        age: args.sim_age,
        smoke: args.sim_smoke,
        active: args.sim_active,
    };
    println!("{}", project_risk(risk, &record, &scenario));
    Ok(None)
}

fn ask(args: &AskArgs, settings: &Settings) -> CommandResult {
    let (risk, record) = baseline(args.risk, &args.payload, &args.history, settings)?;
    println!("{}", advisor::advise(&args.question, &args.name, risk, &record));
    Ok(None)
}
