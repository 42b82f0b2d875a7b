use async_trait::async_trait;
use std::time::Duration;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest.
///
/// One instance is shared across the search, scrape and generation
/// clients; reqwest pools connections internally so cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Build from an optional timeout; `None` means no request deadline.
    pub fn from_timeout_secs(timeout_secs: Option<u64>) -> Self {
        match timeout_secs {
            Some(secs) => Self::with_timeout(Duration::from_secs(secs)),
            None => Self::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}


#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        errors: RwLock<HashMap<String, String>>,
        requests: RwLock<Vec<(String, serde_json::Value)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RwLock::new(HashMap::new()),
                errors: RwLock::new(HashMap::new()),
                requests: RwLock::new(Vec::new()),
            }
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors.write().unwrap().insert(url.into(), error.into());
            self
        }

        /// Bodies of the requests this mock has served, in call order
        pub fn recorded_requests(&self) -> Vec<(String, serde_json::Value)> {
            self.requests.read().unwrap().clone()
        }
    }

    impl Default for MockHttpClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.requests
                .write()
                .unwrap()
                .push((url.to_string(), body.clone()));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::provider("mock", error));
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::provider("mock", format!("No mock response for {}", url)))
        }
    }
}
