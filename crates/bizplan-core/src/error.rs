use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed field check from a form/DTO validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BizplanError {
    #[error("not initialized: run 'bizplan init'")]
    NotInitialized,

    #[error("unknown plan '{0}': expected plus, pro or premium")]
    InvalidPlan(String),

    #[error("step not found: {0}")]
    StepNotFound(u32),

    #[error("question '{question}' not found in step {step}")]
    QuestionNotFound { step: u32, question: String },

    #[error("no project yet: run 'bizplan project create <name>'")]
    ProjectNotFound,

    #[error("'{0}' is already pre-registered")]
    AlreadyRegistered(String),

    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, BizplanError>;
