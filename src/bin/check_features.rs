//! 列出模型需要的特徵（讀取 `BackEnd/features.pkl`）
use cardio_probe::config::DEFAULT_FEATURES_PATH;
use cardio_probe::utils::logger;
use cardio_probe::{ArtifactFeatureSource, FeatureLister};

fn main() {
    logger::init_cli_logger(false);

    let source = ArtifactFeatureSource::new(DEFAULT_FEATURES_PATH, None);
    println!("{}", FeatureLister::new(source).run());
}
