use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EthicsErrorKind {
    MissingField,
    InvalidField,
    InvalidRequest,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct EthicsError {
    pub kind: EthicsErrorKind,
    pub message: String,
    #[serde(default)]
    pub record_index: Option<usize>,
    #[serde(default)]
    pub field: Option<String>,
}

impl EthicsError {
    pub fn new(kind: EthicsErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            record_index: None,
            field: None,
        }
    }

    pub fn at_record(mut self, record_index: usize) -> Self {
        self.record_index = Some(record_index);
        self
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

pub fn missing_field(record_index: usize, field: &str) -> EthicsError {
    EthicsError::new(
        EthicsErrorKind::MissingField,
        format!("candidate action #{record_index} is missing required field '{field}'"),
    )
    .at_record(record_index)
    .on_field(field)
}

pub fn invalid_field(record_index: usize, field: &str, detail: impl AsRef<str>) -> EthicsError {
    EthicsError::new(
        EthicsErrorKind::InvalidField,
        format!(
            "candidate action #{record_index} has invalid field '{field}': {}",
            detail.as_ref()
        ),
    )
    .at_record(record_index)
    .on_field(field)
}

pub fn invalid_request(message: impl Into<String>) -> EthicsError {
    EthicsError::new(EthicsErrorKind::InvalidRequest, message)
}

pub fn internal_error(message: impl Into<String>) -> EthicsError {
    EthicsError::new(EthicsErrorKind::Internal, message)
}
