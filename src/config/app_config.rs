use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub scrape: ScrapeConfig,
    pub generation: GenerationConfig,
    pub dataset: DatasetConfig,
    pub evaluation: EvaluationConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results requested per search call
    pub result_count: usize,
    /// Two-letter country code sent with each search
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Scraped content is truncated past this many characters
    pub max_content_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub train_path: String,
    pub validation_path: String,
    pub train_size: usize,
    pub validation_size: usize,
    pub test_size: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Questions answered concurrently
    pub concurrency: usize,
    /// Directory for JSON reports
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout; unset means no timeout
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_count: 10,
            country: "us".to_string(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 10_000,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            train_path: "data/hotpot_train_v1.1.json".to_string(),
            validation_path: "data/hotpot_dev_fullwiki_v1.json".to_string(),
            train_size: 800,
            validation_size: 200,
            test_size: 1000,
            seed: 42,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            output_dir: "results".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
