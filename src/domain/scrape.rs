//! Page scraping types and provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Result of scraping a single page.
///
/// Scraping is infallible at the type level: transport errors, empty
/// bodies and unsupported formats are all reported through `success`
/// and `error` so one bad page never aborts a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub url: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapedPage {
    pub fn ok(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            title: None,
            success: true,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: String::new(),
            title: None,
            success: false,
            error: Some(error.into()),
        }
    }

    /// Unsupported content that was deliberately not fetched. Carries an
    /// explanatory body instead of an error so downstream prompting still
    /// has text to work with.
    pub fn skipped(url: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: notice.into(),
            title: None,
            success: false,
            error: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Trait for page scraping providers (Firecrawl, etc.)
#[async_trait]
pub trait ScrapeProvider: Send + Sync + Debug {
    /// Fetch a page and return its extracted text content.
    async fn scrape(&self, url: &str) -> ScrapedPage;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Normalize a URL emitted by a language model.
///
/// Models occasionally wrap the URL in quotes or echo a JSON schema
/// fragment such as `{"anyOf": ["https://example.com", null]}` instead
/// of the bare string. Anything unrecognized passes through trimmed.
pub fn clean_url(raw: &str) -> String {
    let mut url = raw.trim();

    if url.len() >= 2
        && ((url.starts_with('"') && url.ends_with('"'))
            || (url.starts_with('\'') && url.ends_with('\'')))
    {
        url = url[1..url.len() - 1].trim();
    }

    if url.starts_with('{') {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(url) {
            if let Some(serde_json::Value::Array(candidates)) = map.get("anyOf") {
                for candidate in candidates {
                    if let Some(s) = candidate.as_str() {
                        let s = s.trim();
                        if !s.is_empty() {
                            return s.to_string();
                        }
                    }
                }
            }
        }
    }

    url.to_string()
}
