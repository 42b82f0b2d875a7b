//! Retrieval step composing search and scrape providers

pub mod step;

pub use step::RetrievalStep;
