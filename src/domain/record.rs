//! Scored evaluation records and the report document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::{exact_match, mean, token_f1};
use super::pipeline::PipelineRecord;
use super::question::Question;

/// A pipeline record scored against its question's gold answer.
///
/// Serialized field names match the persisted result documents of
/// earlier runs, so reports stay diffable across versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub question: String,
    pub gold_answer: String,
    pub predicted_answer: String,
    pub query_1: String,
    pub evidence_summary_1: String,
    pub query_2: String,
    pub evidence_summary_2: String,
    /// Token-level F1 in [0, 1]
    pub f1: f64,
    /// Exact match as 0.0 or 1.0
    pub em: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "level", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl EvaluationRecord {
    /// Score a pipeline record against the question it answered
    pub fn score(question: &Question, record: PipelineRecord) -> Self {
        let f1 = token_f1(&question.gold_answer, &record.answer);
        let em = if exact_match(&question.gold_answer, &record.answer) {
            1.0
        } else {
            0.0
        };

        Self {
            id: question.id.to_string(),
            question: question.text.clone(),
            gold_answer: question.gold_answer.clone(),
            predicted_answer: record.answer,
            query_1: record.query_1,
            evidence_summary_1: record.evidence_summary_1,
            query_2: record.query_2,
            evidence_summary_2: record.evidence_summary_2,
            f1,
            em,
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
        }
    }
}

/// A question whose pipeline run failed outright.
///
/// Failed questions are reported separately instead of being scored as
/// zero, so metric means are not biased by infrastructure errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedQuestion {
    pub id: String,
    pub question: String,
    pub error: String,
}

/// Aggregate metrics on the 0-100 scale used in reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub em: f64,
    pub f1: f64,
    pub num_examples: usize,
    pub num_failed: usize,
}

/// The persisted evaluation document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub run_id: String,
    pub executed_at: DateTime<Utc>,
    pub split: String,
    pub metrics: ReportMetrics,
    pub results: Vec<EvaluationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailedQuestion>,
}

impl EvaluationReport {
    /// Assemble a report, aggregating metrics over the scored records.
    /// Failures do not contribute to the means.
    pub fn new(
        split: impl Into<String>,
        results: Vec<EvaluationRecord>,
        failures: Vec<FailedQuestion>,
    ) -> Self {
        let em_scores: Vec<f64> = results.iter().map(|r| r.em).collect();
        let f1_scores: Vec<f64> = results.iter().map(|r| r.f1).collect();

        let metrics = ReportMetrics {
            em: mean(&em_scores) * 100.0,
            f1: mean(&f1_scores) * 100.0,
            num_examples: results.len(),
            num_failed: failures.len(),
        };

        Self {
            run_id: Uuid::new_v4().to_string(),
            executed_at: Utc::now(),
            split: split.into(),
            metrics,
            results,
            failures,
        }
    }
}
