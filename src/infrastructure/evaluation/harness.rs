//! Concurrent evaluation harness
//!
//! Runs a pipeline over a question set with bounded concurrency and
//! scores each prediction against the gold answer. A failed question is
//! reported, not fatal, so one bad run cannot sink a whole batch.

use std::sync::Arc;

use futures::{stream, StreamExt};
use tracing::{info, warn};

use crate::domain::{
    AnswerPipeline, EvaluationRecord, EvaluationReport, FailedQuestion, Question,
};

/// Default number of questions answered in flight at once
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Batch runner that evaluates a pipeline against gold answers
#[derive(Debug)]
pub struct EvaluationHarness {
    pipeline: Arc<dyn AnswerPipeline>,
    concurrency: usize,
}

impl EvaluationHarness {
    pub fn new(pipeline: Arc<dyn AnswerPipeline>) -> Self {
        Self {
            pipeline,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Evaluate every question and aggregate the scores into a report.
    ///
    /// Results keep the input order regardless of completion order.
    pub async fn evaluate(
        &self,
        split: impl Into<String>,
        questions: &[Question],
    ) -> EvaluationReport {
        let split = split.into();
        info!(
            "Evaluation start: split={}, examples={}, concurrency={}",
            split,
            questions.len(),
            self.concurrency
        );

        let runs = questions.iter().enumerate().map(|(idx, question)| {
            let pipeline = self.pipeline.clone();
            async move {
                let outcome = pipeline.answer(&question.text).await;
                (idx, question, outcome)
            }
        });

        let mut outcomes = stream::iter(runs)
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;
        outcomes.sort_by_key(|(idx, _, _)| *idx);

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for (_, question, outcome) in outcomes {
            match outcome {
                Ok(record) => results.push(EvaluationRecord::score(question, record)),
                Err(error) => {
                    warn!(
                        "Question {} failed: {}",
                        question.id.as_str(),
                        error
                    );
                    failures.push(FailedQuestion {
                        id: question.id.as_str().to_string(),
                        question: question.text.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }

        let report = EvaluationReport::new(split, results, failures);
        info!(
            "Evaluation complete: em={:.2}, f1={:.2}, examples={}, failed={}",
            report.metrics.em,
            report.metrics.f1,
            report.metrics.num_examples,
            report.metrics.num_failed
        );

        report
    }
}
