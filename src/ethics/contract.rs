use anyhow::{Context, Result, anyhow};
use jsonschema::{JSONSchema, ValidationError};
use serde_json::Value;

use crate::ethics::types::Outcome;

/// JSON Schema of the evaluation output (decision audit or abort payload).
pub fn outcome_schema() -> Result<Value> {
    serde_json::to_value(schemars::schema_for!(Outcome)).context("failed to render outcome schema")
}

/// Boundary check for serialized outcomes. The evaluation pipeline never
/// consults it.
pub struct OutputContract {
    compiled: JSONSchema,
}

impl OutputContract {
    pub fn new() -> Result<Self> {
        let schema = outcome_schema()?;
        let compiled = JSONSchema::compile(&schema)
            .map_err(|e| anyhow!("failed to compile outcome schema: {e}"))?;
        Ok(Self { compiled })
    }

    pub fn check(&self, outcome: &Outcome) -> Result<()> {
        let value = serde_json::to_value(outcome).context("failed to serialize outcome")?;
        self.check_value(&value)
    }

    pub fn check_value(&self, value: &Value) -> Result<()> {
        match self.compiled.validate(value) {
            Ok(()) => Ok(()),
            Err(errors_iter) => {
                let validation_errors: Vec<ValidationError> = errors_iter.collect();
                let messages: Vec<String> = validation_errors
                    .into_iter()
                    .map(|error| error.to_string())
                    .collect();
                Err(anyhow!(
                    "outcome violates output contract: {}",
                    messages.join("; ")
                ))
            }
        }
    }
}
