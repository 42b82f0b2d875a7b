//! Language-model backed generators

pub mod openai;

pub use openai::OpenAiGenerator;
