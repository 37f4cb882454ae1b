//! 以固定病患資料對本機預測服務做一次冒煙測試
use cardio_probe::core::smoke_test::DEFAULT_PREDICT_URL;
use cardio_probe::utils::logger;
use cardio_probe::{HttpPredictionClient, PatientRecord, SmokeTest};

#[tokio::main]
async fn main() {
    logger::init_cli_logger(false);

    let smoke = SmokeTest::new(
        HttpPredictionClient::new(DEFAULT_PREDICT_URL),
        PatientRecord::default(),
    );

    println!("{}", smoke.announcement());
    println!("{}", smoke.run().await);
}
