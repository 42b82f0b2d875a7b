//! Web search providers

pub mod serper;

pub use serper::SerperClient;
