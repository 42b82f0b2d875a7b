use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DomainError, SearchProvider, SearchResult};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Serper rejects `num` above 100
const MAX_RESULTS: usize = 100;

/// Google search via the Serper API
#[derive(Debug)]
pub struct SerperClient<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    country: String,
}

impl<C: HttpClientTrait> SerperClient<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPER_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            country: "us".to_string(),
        }
    }

    /// Country code for localized results (Serper `gl` parameter)
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("X-API-KEY", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<SearchResult>, DomainError> {
        let response: SerperResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("serper", format!("Failed to parse response: {}", e))
        })?;

        let results = response
            .organic
            .into_iter()
            .enumerate()
            .map(|(i, item)| SearchResult::new(item.title, item.link, item.snippet, i + 1))
            .collect();

        Ok(results)
    }
}

#[async_trait]
impl<C: HttpClientTrait> SearchProvider for SerperClient<C> {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("Search query cannot be empty"));
        }

        let body = serde_json::json!({
            "q": query,
            "num": num_results.min(MAX_RESULTS),
            "gl": self.country,
        });

        let started = std::time::Instant::now();
        let response = self
            .client
            .post_json(&self.search_url(), self.headers(), &body)
            .await?;

        let results = self.parse_response(response)?;
        debug!(
            query,
            hits = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Serper search complete"
        );

        Ok(results)
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}

// Serper API types

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganicItem>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganicItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://google.serper.dev/search";

    fn organic_fixture() -> serde_json::Value {
        serde_json::json!({
            "organic": [
                {
                    "title": "Rust Programming Language",
                    "link": "https://www.rust-lang.org/",
                    "snippet": "A language empowering everyone."
                },
                {
                    "title": "Rust (fungus) - Wikipedia",
                    "link": "https://en.wikipedia.org/wiki/Rust_(fungus)",
                    "snippet": "Rust is a plant disease."
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_search_parses_and_ranks_organic_results() {
        let client = MockHttpClient::new().with_response(TEST_URL, organic_fixture());
        let serper = SerperClient::new(client, "test-key");

        let results = serper.search("rust", 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[tokio::test]
    async fn test_search_sends_query_count_and_locale() {
        let client = MockHttpClient::new().with_response(TEST_URL, organic_fixture());
        let serper = SerperClient::new(client, "test-key").with_country("de");

        serper.search("rust", 5).await.unwrap();

        let requests = serper.client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, TEST_URL);
        assert_eq!(
            requests[0].1,
            serde_json::json!({"q": "rust", "num": 5, "gl": "de"})
        );
    }

    #[tokio::test]
    async fn test_search_with_no_organic_key_is_empty() {
        let client =
            MockHttpClient::new().with_response(TEST_URL, serde_json::json!({"credits": 1}));
        let serper = SerperClient::new(client, "test-key");

        let results = serper.search("rust", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_tolerates_missing_item_fields() {
        let response = serde_json::json!({
            "organic": [{"title": "Only a title"}]
        });
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let serper = SerperClient::new(client, "test-key");

        let results = serper.search("rust", 10).await.unwrap();
        assert_eq!(results[0].title, "Only a title");
        assert_eq!(results[0].url, "");
        assert_eq!(results[0].snippet, "");
    }

    #[tokio::test]
    async fn test_search_propagates_transport_errors() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 403: forbidden");
        let serper = SerperClient::new(client, "bad-key");

        let result = serper.search("rust", 10).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_a_request() {
        let client = MockHttpClient::new().with_response(TEST_URL, organic_fixture());
        let serper = SerperClient::new(client, "test-key");

        let result = serper.search("   ", 10).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(serper.client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_result_count_is_capped() {
        let client = MockHttpClient::new().with_response(TEST_URL, organic_fixture());
        let serper = SerperClient::new(client, "test-key");

        serper.search("rust", 250).await.unwrap();

        let requests = serper.client.recorded_requests();
        assert_eq!(requests[0].1["num"], 100);
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let custom = "http://localhost:9000/search";
        let client = MockHttpClient::new().with_response(custom, organic_fixture());
        let serper = SerperClient::with_base_url(client, "test-key", "http://localhost:9000/");

        let results = serper.search("rust", 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }
}
