//! Search + scrape retrieval step
//!
//! Turns one query into evidence text: search the web, scrape the top
//! result, and fall back to search snippets when the scrape is unusable.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{
    RetrievalOutcome, Retriever, ScrapeProvider, ScrapedPage, SearchProvider,
};

const DEFAULT_RESULT_COUNT: usize = 10;
const FALLBACK_SNIPPET_COUNT: usize = 5;
const FALLBACK_TITLE: &str = "Search snippets (scrape fallback)";

/// One retrieval hop over injected search and scrape providers
#[derive(Debug)]
pub struct RetrievalStep<S, P>
where
    S: SearchProvider,
    P: ScrapeProvider,
{
    search: Arc<S>,
    scrape: Arc<P>,
    result_count: usize,
}

impl<S, P> RetrievalStep<S, P>
where
    S: SearchProvider,
    P: ScrapeProvider,
{
    pub fn new(search: Arc<S>, scrape: Arc<P>) -> Self {
        Self {
            search,
            scrape,
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    /// Number of search results to request per query
    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }

    /// Substitute content built from the top search snippets
    fn snippet_fallback(
        &self,
        query: &str,
        search_results: Vec<crate::domain::SearchResult>,
        scraped: ScrapedPage,
    ) -> RetrievalOutcome {
        let snippets = search_results
            .iter()
            .take(FALLBACK_SNIPPET_COUNT)
            .map(|r| format!("**{}**\n{}", r.title, r.snippet))
            .collect::<Vec<_>>()
            .join("\n\n");

        let error = scraped
            .error
            .unwrap_or_else(|| "Scrape returned empty content".to_string());

        debug!(query, error = error.as_str(), "Falling back to search snippets");

        let page = ScrapedPage {
            url: scraped.url,
            content: snippets,
            title: Some(FALLBACK_TITLE.to_string()),
            success: false,
            error: Some(error),
        };

        RetrievalOutcome::degraded(query, search_results, page)
    }
}

#[async_trait]
impl<S, P> Retriever for RetrievalStep<S, P>
where
    S: SearchProvider,
    P: ScrapeProvider,
{
    async fn retrieve(&self, query: &str) -> RetrievalOutcome {
        let search_results = match self.search.search(query, self.result_count).await {
            Ok(results) => results,
            Err(e) => {
                warn!(query, error = %e, "Search failed");
                return RetrievalOutcome::failed(query, format!("Search failed: {}", e));
            }
        };

        if search_results.is_empty() {
            warn!(query, "No search results returned");
            return RetrievalOutcome::failed(query, "No search results returned");
        }

        let top_url = search_results[0].url.clone();
        let scraped = self.scrape.scrape(&top_url).await;

        let outcome = if scraped.success && scraped.has_content() {
            RetrievalOutcome::retrieved(query, search_results, scraped)
        } else {
            self.snippet_fallback(query, search_results, scraped)
        };

        info!(
            query,
            hits = outcome.search_results.len(),
            degraded = outcome.degraded,
            "Retrieval complete"
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::mock::MockSearchProvider;
    use crate::domain::scrape::mock::MockScrapeProvider;
    use crate::domain::SearchResult;

    fn ranked_results(count: usize) -> Vec<SearchResult> {
        (1..=count)
            .map(|i| {
                SearchResult::new(
                    format!("Result {}", i),
                    format!("https://example.com/{}", i),
                    format!("Snippet {}", i),
                    i,
                )
            })
            .collect()
    }

    fn step(
        search: MockSearchProvider,
        scrape: MockScrapeProvider,
    ) -> RetrievalStep<MockSearchProvider, MockScrapeProvider> {
        RetrievalStep::new(Arc::new(search), Arc::new(scrape))
    }

    #[tokio::test]
    async fn test_retrieve_scrapes_top_result() {
        let search = MockSearchProvider::new().with_results(ranked_results(3));
        let scrape = MockScrapeProvider::new().with_page("https://example.com/1", "page one body");

        let outcome = step(search, scrape).retrieve("some query").await;

        assert!(outcome.succeeded);
        assert!(!outcome.degraded);
        assert_eq!(outcome.content(), Some("page one body"));
        assert_eq!(outcome.search_results.len(), 3);
        assert_eq!(outcome.query, "some query");
    }

    #[tokio::test]
    async fn test_search_error_is_terminal_for_the_hop() {
        let search = MockSearchProvider::new().with_error("HTTP 500: upstream");
        let scrape = MockScrapeProvider::new();

        let outcome = step(search, scrape).retrieve("q").await;

        assert!(!outcome.succeeded);
        assert!(outcome.page.is_none());
        let error = outcome.error.unwrap();
        assert!(error.starts_with("Search failed: "));
        assert!(error.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_zero_results_is_retrieval_failure() {
        let search = MockSearchProvider::new();
        let scrape = MockScrapeProvider::new();

        let outcome = step(search, scrape).retrieve("q").await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.error.as_deref(), Some("No search results returned"));
    }

    #[tokio::test]
    async fn test_scrape_failure_falls_back_to_snippets() {
        let search = MockSearchProvider::new().with_results(ranked_results(3));
        let scrape =
            MockScrapeProvider::new().with_failure("https://example.com/1", "HTTP 502: bad gateway");

        let outcome = step(search, scrape).retrieve("q").await;

        assert!(outcome.succeeded);
        assert!(outcome.degraded);

        let page = outcome.page.as_ref().unwrap();
        assert_eq!(page.title.as_deref(), Some("Search snippets (scrape fallback)"));
        assert!(!page.success);
        assert_eq!(page.error.as_deref(), Some("HTTP 502: bad gateway"));

        let content = outcome.content().unwrap();
        assert!(content.contains("**Result 1**\nSnippet 1"));
        assert!(content.contains("**Result 3**\nSnippet 3"));
    }

    #[tokio::test]
    async fn test_empty_scrape_content_falls_back_with_default_error() {
        let search = MockSearchProvider::new().with_results(ranked_results(2));
        // Scrape "succeeds" but returns an empty body
        let scrape = MockScrapeProvider::new().with_page("https://example.com/1", "");

        let outcome = step(search, scrape).retrieve("q").await;

        assert!(outcome.succeeded);
        assert!(outcome.degraded);
        assert_eq!(
            outcome.page.as_ref().unwrap().error.as_deref(),
            Some("Scrape returned empty content")
        );
    }

    #[tokio::test]
    async fn test_fallback_limits_snippets_to_top_five() {
        let search = MockSearchProvider::new().with_results(ranked_results(8));
        let scrape = MockScrapeProvider::new().failing_all("boom");

        let outcome = step(search, scrape).retrieve("q").await;

        let content = outcome.content().unwrap();
        assert!(content.contains("**Result 5**"));
        assert!(!content.contains("**Result 6**"));
    }

    #[tokio::test]
    async fn test_result_count_is_passed_to_search() {
        let search = MockSearchProvider::new().with_results(ranked_results(10));
        let scrape = MockScrapeProvider::new().with_page("https://example.com/1", "body");

        let outcome = step(search, scrape)
            .with_result_count(4)
            .retrieve("q")
            .await;

        // The mock truncates to the requested count
        assert_eq!(outcome.search_results.len(), 4);
    }
}
