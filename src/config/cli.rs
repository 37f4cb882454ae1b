use crate::adapters::features::FeatureFormat;
use crate::config::PayloadOverrides;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cardio-probe", version)]
#[command(about = "Diagnostics for the cardiovascular risk prediction service")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(
        long,
        global = true,
        help = "Exit with a non-zero code when the command fails"
    )]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the feature names stored in a model artifact
    Features(ArtifactArgs),
    /// POST one patient record to the prediction endpoint
    Smoke(SmokeArgs),
    /// Compare the artifact's features with the request payload fields
    Check(ArtifactArgs),
    /// Show recorded predictions
    History(HistoryArgs),
    /// Project how lifestyle changes move a risk score
    Simulate(SimulateArgs),
    /// Ask the rule-based advisor about a result
    Ask(AskArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ArtifactArgs {
    pub path: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<FeatureFormat>,
}

#[derive(Debug, Clone, Args)]
pub struct SmokeArgs {
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Summarise the response as a risk band")]
    pub interpret: bool,

    #[arg(long, help = "Append the prediction to the history file")]
    pub record: bool,

    #[arg(long, default_value = "Guest", help = "Patient name stored with --record")]
    pub name: String,

    #[command(flatten)]
    pub history: HistoryArgs,

    #[command(flatten)]
    pub payload: PayloadOverrides,
}

#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    #[arg(long = "history-file")]
    pub history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    #[arg(long, help = "Base risk probability (defaults to the latest recorded one)")]
    pub risk: Option<f64>,

    #[arg(long)]
    pub sim_age: Option<f64>,

    #[arg(long)]
    pub sim_smoke: Option<bool>,

    #[arg(long)]
    pub sim_active: Option<bool>,

    #[command(flatten)]
    pub history: HistoryArgs,

    #[command(flatten)]
    pub payload: PayloadOverrides,
}

#[derive(Debug, Clone, Args)]
pub struct AskArgs {
    pub question: String,

    #[arg(long, help = "Risk probability (defaults to the latest recorded one)")]
    pub risk: Option<f64>,

    #[arg(long, default_value = "Guest")]
    pub name: String,

    #[command(flatten)]
    pub history: HistoryArgs,

    #[command(flatten)]
    pub payload: PayloadOverrides,
}
