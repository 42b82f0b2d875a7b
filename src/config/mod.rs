pub mod app_config;

pub use app_config::{
    AppConfig, DatasetConfig, EvaluationConfig, GenerationConfig, HttpConfig, LogFormat,
    LoggingConfig, ScrapeConfig, SearchConfig,
};
