//! Infrastructure layer - External service implementations

pub mod dataset;
pub mod evaluation;
pub mod generation;
pub mod http_client;
pub mod logging;
pub mod qa;
pub mod retrieval;
pub mod scrape;
pub mod search;
