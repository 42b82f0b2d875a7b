//! Retrieval outcome types and the retriever trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::scrape::ScrapedPage;
use super::search::SearchResult;

/// Result of one search + scrape retrieval step.
///
/// `succeeded` reports whether the search produced any results at all.
/// `degraded` reports that the scrape came back unusable and search
/// snippets were substituted for page content, so the two flags answer
/// different questions and can disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    pub query: String,
    pub search_results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<ScrapedPage>,
    pub succeeded: bool,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RetrievalOutcome {
    /// Search itself failed or matched nothing; no content is available.
    pub fn failed(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_results: Vec::new(),
            page: None,
            succeeded: false,
            degraded: false,
            error: Some(error.into()),
        }
    }

    /// Scrape of the top result produced usable page content.
    pub fn retrieved(
        query: impl Into<String>,
        search_results: Vec<SearchResult>,
        page: ScrapedPage,
    ) -> Self {
        Self {
            query: query.into(),
            search_results,
            page: Some(page),
            succeeded: true,
            degraded: false,
            error: None,
        }
    }

    /// Scrape was unusable; snippet fallback content was substituted.
    pub fn degraded(
        query: impl Into<String>,
        search_results: Vec<SearchResult>,
        page: ScrapedPage,
    ) -> Self {
        Self {
            query: query.into(),
            search_results,
            page: Some(page),
            succeeded: true,
            degraded: true,
            error: None,
        }
    }

    /// The evidence text to feed downstream, if any was retrieved.
    pub fn content(&self) -> Option<&str> {
        self.page
            .as_ref()
            .map(|p| p.content.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// Trait for retrieval steps that turn a query into evidence text
#[async_trait]
pub trait Retriever: Send + Sync + Debug {
    /// Run one retrieval hop. Never fails; errors land in the outcome.
    async fn retrieve(&self, query: &str) -> RetrievalOutcome;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted retriever that replays queued outcomes in order and
    /// records the queries it was asked to run.
    #[derive(Debug)]
    pub struct MockRetriever {
        outcomes: Mutex<VecDeque<RetrievalOutcome>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockRetriever {
        pub fn new() -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::new()),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn with_outcome(self, outcome: RetrievalOutcome) -> Self {
            self.outcomes.lock().unwrap().push_back(outcome);
            self
        }

        pub fn with_content(self, content: impl Into<String>) -> Self {
            let page = ScrapedPage::ok("https://example.com/mock", content);
            let results = vec![SearchResult::new(
                "Mock result",
                "https://example.com/mock",
                "mock snippet",
                1,
            )];
            self.with_outcome(RetrievalOutcome::retrieved("mock", results, page))
        }

        pub fn received_queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl Default for MockRetriever {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Retriever for MockRetriever {
        async fn retrieve(&self, query: &str) -> RetrievalOutcome {
            self.queries.lock().unwrap().push(query.to_string());

            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .map(|outcome| RetrievalOutcome {
                    query: query.to_string(),
                    ..outcome
                })
                .unwrap_or_else(|| {
                    RetrievalOutcome::failed(query, "No scripted outcome remaining")
                })
        }
    }
}
