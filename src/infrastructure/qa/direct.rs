//! Single-shot QA agent with no retrieval

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, Generator, Signature};

use super::signatures;

/// Answers a query from the model's own knowledge, without search.
///
/// Useful as a baseline against the multi-hop pipeline.
#[derive(Debug)]
pub struct DirectQaAgent {
    generator: Arc<dyn Generator>,
    signature: Signature,
}

impl DirectQaAgent {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            signature: signatures::direct_answer(),
        }
    }

    /// Answer a query in a single generation call
    pub async fn answer(&self, query: &str) -> Result<String, DomainError> {
        info!("Direct answer: query={}", query);

        let outputs = self
            .generator
            .generate(&self.signature, vec![("query", query)])
            .await?;

        Ok(outputs.field("response")?.to_string())
    }
}
