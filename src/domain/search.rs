//! Web search types and provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// A single organic web search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// 1-based position within the returned page of results
    pub rank: usize,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        rank: usize,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            rank,
        }
    }
}

/// Trait for web search providers (Serper, etc.)
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Run a web search and return ranked organic results.
    ///
    /// An empty vector is a valid response: it means the search itself
    /// succeeded but matched nothing.
    async fn search(&self, query: &str, num_results: usize)
        -> Result<Vec<SearchResult>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
