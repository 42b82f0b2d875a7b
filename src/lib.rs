//! Multi-hop web QA pipeline
//!
//! Answers multi-hop questions by searching the web, scraping pages and
//! accumulating evidence summaries across two retrieval hops, then
//! scores batches of answers against gold labels:
//! - Serper web search + Firecrawl scraping with snippet fallback
//! - Signature-driven generation over an OpenAI-compatible chat API
//! - Concurrent evaluation harness with EM / token-F1 metrics

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::env;
use std::sync::Arc;

use domain::{DomainError, Generator, Retriever};
use infrastructure::generation::OpenAiGenerator;
use infrastructure::http_client::HttpClient;
use infrastructure::qa::{DirectQaAgent, MultiHopPipeline};
use infrastructure::retrieval::RetrievalStep;
use infrastructure::scrape::FirecrawlClient;
use infrastructure::search::SerperClient;

pub const SERPER_API_KEY_VAR: &str = "SERPER_API_KEY";
pub const FIRECRAWL_API_KEY_VAR: &str = "FIRECRAWL_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

fn require_env(var: &str) -> Result<String, DomainError> {
    env::var(var)
        .map_err(|_| DomainError::configuration(format!("Environment variable {} is not set", var)))
}

fn http_client(config: &AppConfig) -> HttpClient {
    HttpClient::from_timeout_secs(config.http.request_timeout_secs)
}

/// Build the generator from configuration and `OPENAI_API_KEY`
pub fn create_generator(config: &AppConfig) -> Result<Arc<dyn Generator>, DomainError> {
    let mut generator = OpenAiGenerator::new(
        http_client(config),
        require_env(OPENAI_API_KEY_VAR)?,
        &config.generation.model,
    );
    if let Some(temperature) = config.generation.temperature {
        generator = generator.with_temperature(temperature);
    }
    if let Some(max_tokens) = config.generation.max_tokens {
        generator = generator.with_max_tokens(max_tokens);
    }
    Ok(Arc::new(generator))
}

/// Build the search + scrape retrieval step from configuration and the
/// `SERPER_API_KEY` / `FIRECRAWL_API_KEY` environment variables
pub fn create_retriever(config: &AppConfig) -> Result<Arc<dyn Retriever>, DomainError> {
    let search = SerperClient::new(http_client(config), require_env(SERPER_API_KEY_VAR)?)
        .with_country(&config.search.country);
    let scrape = FirecrawlClient::new(http_client(config), require_env(FIRECRAWL_API_KEY_VAR)?)
        .with_max_chars(config.scrape.max_content_chars);

    let step = RetrievalStep::new(Arc::new(search), Arc::new(scrape))
        .with_result_count(config.search.result_count);
    Ok(Arc::new(step))
}

/// Build the full two-hop pipeline
pub fn create_pipeline(config: &AppConfig) -> Result<MultiHopPipeline, DomainError> {
    Ok(MultiHopPipeline::new(
        create_generator(config)?,
        create_retriever(config)?,
    ))
}

/// Build the retrieval-free baseline agent
pub fn create_direct_agent(config: &AppConfig) -> Result<DirectQaAgent, DomainError> {
    Ok(DirectQaAgent::new(create_generator(config)?))
}
