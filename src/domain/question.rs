//! Labeled question types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled question from the evaluation dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Dataset-assigned identifier
    #[serde(alias = "_id")]
    pub id: QuestionId,
    /// The question text
    #[serde(alias = "question")]
    pub text: String,
    /// Gold reference answer
    #[serde(alias = "answer")]
    pub gold_answer: String,
    /// Question category (e.g. "comparison", "bridge")
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Difficulty label (e.g. "easy", "medium", "hard")
    #[serde(default, alias = "level", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        gold_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::from_string(id),
            text: text.into(),
            gold_answer: gold_answer.into(),
            category: None,
            difficulty: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }
}
