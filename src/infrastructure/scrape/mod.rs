//! Page scraping providers

pub mod firecrawl;

pub use firecrawl::FirecrawlClient;
