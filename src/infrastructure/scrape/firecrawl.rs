use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{clean_url, ScrapeProvider, ScrapedPage};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev";
const DEFAULT_MAX_CHARS: usize = 10_000;

const PDF_NOTICE: &str = "PDF scraping is temporarily unavailable.";
const TRUNCATION_MARKER: &str = "\n\n[Content truncated...]";

/// Web page scraping via the Firecrawl API.
///
/// Every failure mode (transport error, unsuccessful response, PDF
/// gate) is folded into the returned `ScrapedPage`; this client never
/// surfaces an error to the caller.
#[derive(Debug)]
pub struct FirecrawlClient<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    max_chars: usize,
}

impl<C: HttpClientTrait> FirecrawlClient<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_FIRECRAWL_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Cap on returned content length, to bound prompt sizes downstream
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    fn scrape_url(&self) -> String {
        format!("{}/v2/scrape", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn truncate(&self, content: String) -> String {
        if content.chars().count() <= self.max_chars {
            return content;
        }

        let mut truncated: String = content.chars().take(self.max_chars).collect();
        truncated.push_str(TRUNCATION_MARKER);
        truncated
    }

    fn parse_response(&self, url: &str, json: serde_json::Value) -> ScrapedPage {
        let response: FirecrawlResponse = match serde_json::from_value(json) {
            Ok(response) => response,
            Err(e) => {
                return ScrapedPage::failed(url, format!("Failed to parse response: {}", e));
            }
        };

        let data = match response.data {
            Some(data) if response.success => data,
            _ => {
                let error = response
                    .error
                    .unwrap_or_else(|| "Scrape request unsuccessful".to_string());
                return ScrapedPage::failed(url, error);
            }
        };

        let content = self.truncate(data.markdown);
        let mut page = ScrapedPage::ok(url, content);
        if let Some(title) = data.metadata.title {
            page = page.with_title(title);
        }

        page
    }
}

#[async_trait]
impl<C: HttpClientTrait> ScrapeProvider for FirecrawlClient<C> {
    async fn scrape(&self, url: &str) -> ScrapedPage {
        let url = clean_url(url);

        if url.to_lowercase().ends_with(".pdf") {
            return ScrapedPage::skipped(url, PDF_NOTICE);
        }

        let body = serde_json::json!({
            "url": url,
            "formats": ["markdown"],
        });

        let started = std::time::Instant::now();
        let page = match self
            .client
            .post_json(&self.scrape_url(), self.headers(), &body)
            .await
        {
            Ok(json) => self.parse_response(&url, json),
            Err(e) => ScrapedPage::failed(&url, e.to_string()),
        };

        debug!(
            url = url.as_str(),
            success = page.success,
            chars = page.content.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Firecrawl scrape complete"
        );

        page
    }

    fn provider_name(&self) -> &'static str {
        "firecrawl"
    }
}

// Firecrawl API types

#[derive(Debug, Deserialize)]
struct FirecrawlResponse {
    #[serde(default)]
    success: bool,
    data: Option<FirecrawlData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlData {
    #[serde(default)]
    markdown: String,
    #[serde(default)]
    metadata: FirecrawlMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct FirecrawlMetadata {
    title: Option<String>,
}
