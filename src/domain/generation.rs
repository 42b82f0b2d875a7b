//! Structured text generation: signatures, outputs and the generator trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Name of the chain-of-thought output field
pub const REASONING_FIELD: &str = "reasoning";

/// A named, described field in a signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureField {
    pub name: String,
    pub description: String,
}

impl SignatureField {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A declarative prompt contract: an instruction plus named input and
/// output fields. Generators render it into a concrete prompt and must
/// return a value for every output field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub instruction: String,
    pub inputs: Vec<SignatureField>,
    pub outputs: Vec<SignatureField>,
}

impl Signature {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.inputs.push(SignatureField::new(name, description));
        self
    }

    pub fn output(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.outputs.push(SignatureField::new(name, description));
        self
    }

    /// Prepend a `reasoning` output field so the model thinks step by
    /// step before producing the remaining outputs.
    pub fn with_reasoning(mut self) -> Self {
        self.outputs.insert(
            0,
            SignatureField::new(
                REASONING_FIELD,
                "Step-by-step reasoning that leads to the remaining outputs",
            ),
        );
        self
    }

    pub fn has_reasoning(&self) -> bool {
        self.outputs.iter().any(|f| f.name == REASONING_FIELD)
    }

    /// Output fields excluding the reasoning scratchpad
    pub fn answer_fields(&self) -> impl Iterator<Item = &SignatureField> {
        self.outputs.iter().filter(|f| f.name != REASONING_FIELD)
    }
}

/// Values produced for a signature's output fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOutputs {
    fields: HashMap<String, String>,
}

impl GenerationOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a required output field
    pub fn field(&self, name: &str) -> Result<&str, DomainError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DomainError::generation(format!("Missing output field '{}'", name)))
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.fields.get(REASONING_FIELD).map(String::as_str)
    }
}

/// Trait for language-model backed generators
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    /// Run one signature with the given input field values.
    ///
    /// Implementations must produce every output field the signature
    /// declares, `reasoning` excepted, or fail with a generation error.
    async fn generate(
        &self,
        signature: &Signature,
        inputs: Vec<(&str, &str)>,
    ) -> Result<GenerationOutputs, DomainError>;

    /// Get the generator name
    fn generator_name(&self) -> &'static str;
}
