//! Two-hop retrieval-augmented answering pipeline
//!
//! Each hop generates a search query, retrieves a page for it and folds
//! the content into an evidence summary; the final answer is generated
//! from the cumulative summary.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{
    AnswerPipeline, DomainError, Generator, PipelineRecord, Retriever, Signature,
};

use super::signatures;

/// Placeholder fed to summarization when a retrieval hop yields nothing
pub const NO_CONTENT_PLACEHOLDER: &str = "No content retrieved.";

/// Pipeline that answers a question in two search-and-read hops.
///
/// Retrieval failures degrade to the placeholder text so the run always
/// reaches the answer step; generation failures abort the run.
#[derive(Debug)]
pub struct MultiHopPipeline {
    generator: Arc<dyn Generator>,
    retriever: Arc<dyn Retriever>,
    initial_query: Signature,
    summarize: Signature,
    followup_query: Signature,
    summarize_cumulative: Signature,
    final_answer: Signature,
}

impl MultiHopPipeline {
    /// Create a new multi-hop pipeline
    pub fn new(generator: Arc<dyn Generator>, retriever: Arc<dyn Retriever>) -> Self {
        Self {
            generator,
            retriever,
            initial_query: signatures::initial_query_generation(),
            summarize: signatures::evidence_summarization(),
            followup_query: signatures::followup_query_generation(),
            summarize_cumulative: signatures::cumulative_evidence_summarization(),
            final_answer: signatures::answer_generation(),
        }
    }

    /// Run the two-hop flow for a single question
    pub async fn run(&self, question: &str) -> Result<PipelineRecord, DomainError> {
        info!("Multi-hop run: question={}", question);

        // Hop 1: query, retrieve, summarize
        let outputs = self
            .generator
            .generate(&self.initial_query, vec![("question", question)])
            .await?;
        let query_1 = outputs.field("query")?.to_string();
        debug!("Initial query: {}", query_1);

        let first_hop = self.retriever.retrieve(&query_1).await;
        let content_1 = first_hop
            .content()
            .unwrap_or(NO_CONTENT_PLACEHOLDER)
            .to_string();

        let outputs = self
            .generator
            .generate(
                &self.summarize,
                vec![("question", question), ("scraped_content", &content_1)],
            )
            .await?;
        let evidence_summary_1 = outputs.field("evidence_summary")?.to_string();

        // Hop 2: follow-up query, retrieve, fold into a cumulative summary
        let outputs = self
            .generator
            .generate(
                &self.followup_query,
                vec![
                    ("question", question),
                    ("evidence_summary", &evidence_summary_1),
                ],
            )
            .await?;
        let query_2 = outputs.field("query")?.to_string();
        debug!("Follow-up query: {}", query_2);

        let second_hop = self.retriever.retrieve(&query_2).await;
        let content_2 = second_hop
            .content()
            .unwrap_or(NO_CONTENT_PLACEHOLDER)
            .to_string();

        let outputs = self
            .generator
            .generate(
                &self.summarize_cumulative,
                vec![
                    ("question", question),
                    ("prior_evidence_summary", &evidence_summary_1),
                    ("scraped_content", &content_2),
                ],
            )
            .await?;
        let evidence_summary_2 = outputs.field("evidence_summary")?.to_string();

        // Answer from the cumulative evidence
        let outputs = self
            .generator
            .generate(
                &self.final_answer,
                vec![
                    ("question", question),
                    ("evidence_summary", &evidence_summary_2),
                ],
            )
            .await?;
        let answer = outputs.field("answer")?.to_string();

        info!(
            "Multi-hop complete: hop1_succeeded={}, hop2_succeeded={}, answer_chars={}",
            first_hop.succeeded,
            second_hop.succeeded,
            answer.chars().count()
        );

        Ok(PipelineRecord {
            answer,
            query_1,
            evidence_summary_1,
            query_2,
            evidence_summary_2,
        })
    }
}

#[async_trait]
impl AnswerPipeline for MultiHopPipeline {
    async fn answer(&self, question: &str) -> Result<PipelineRecord, DomainError> {
        self.run(question).await
    }
}
