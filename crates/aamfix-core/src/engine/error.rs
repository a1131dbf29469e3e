use crate::core::models::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("The bad and good mappings describe different reactions (bad: {bad}, good: {good})")]
    StructuralMismatch { bad: String, good: String },

    #[error("Bad and good index lists differ in length ({bad} vs {good})")]
    LengthMismatch { bad: usize, good: usize },

    #[error("Product molecule at position {position} has no structurally identical partner in the other mapping")]
    ProductMismatch { position: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}
