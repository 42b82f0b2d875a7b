//! Pipeline output record and the answer-pipeline trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Full audit trail of one pipeline run: the final answer plus every
/// intermediate query and evidence summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub answer: String,
    pub query_1: String,
    pub evidence_summary_1: String,
    pub query_2: String,
    pub evidence_summary_2: String,
}

/// Trait for pipelines that turn a question into an answer record
#[async_trait]
pub trait AnswerPipeline: Send + Sync + Debug {
    /// Answer one question. A generation failure aborts the run for
    /// this question; callers running batches are responsible for
    /// isolating the error.
    async fn answer(&self, question: &str) -> Result<PipelineRecord, DomainError>;
}
