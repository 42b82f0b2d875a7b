//! Domain layer - Core business logic and entities

pub mod error;
pub mod generation;
pub mod metrics;
pub mod pipeline;
pub mod question;
pub mod record;
pub mod retrieval;
pub mod scrape;
pub mod search;

pub use error::DomainError;
pub use generation::{
    GenerationOutputs, Generator, Signature, SignatureField, REASONING_FIELD,
};
pub use pipeline::{AnswerPipeline, PipelineRecord};
pub use question::{Question, QuestionId};
pub use record::{EvaluationRecord, EvaluationReport, FailedQuestion, ReportMetrics};
pub use retrieval::{RetrievalOutcome, Retriever};
pub use scrape::{clean_url, ScrapeProvider, ScrapedPage};
pub use search::{SearchProvider, SearchResult};
