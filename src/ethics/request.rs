use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::ethics::{
    error::{EthicsError, EthicsErrorKind, invalid_field, missing_field},
    types::{Action, Bounds, Scores},
};

const REQUIRED_FIELDS: [&str; 2] = ["action_name", "scores"];

/// Untrusted evaluation input. Candidate actions stay raw JSON until
/// [`EvaluationRequest::into_validated`] checks every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationRequest {
    pub candidate_actions: Vec<Value>,
    #[serde(default)]
    pub bounds: Bounds,
    pub alternatives_exhausted: bool,
    pub trajectory_e_before: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub candidate_actions: Vec<Action>,
    pub bounds: Bounds,
    pub alternatives_exhausted: bool,
    pub trajectory_e_before: f64,
}

impl EvaluationRequest {
    /// Fails on the first malformed record; nothing is evaluated from a
    /// partially valid candidate list.
    pub fn into_validated(self) -> Result<ValidatedRequest, EthicsError> {
        let candidate_actions = self
            .candidate_actions
            .into_iter()
            .enumerate()
            .map(|(index, record)| parse_candidate_action(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedRequest {
            candidate_actions,
            bounds: self.bounds,
            alternatives_exhausted: self.alternatives_exhausted,
            trajectory_e_before: self.trajectory_e_before,
        })
    }
}

pub fn parse_candidate_action(index: usize, record: Value) -> Result<Action, EthicsError> {
    let Value::Object(mut object) = record else {
        return Err(EthicsError::new(
            EthicsErrorKind::InvalidField,
            format!("candidate action #{index} is not a JSON object"),
        )
        .at_record(index));
    };

    for field in REQUIRED_FIELDS {
        if object.get(field).is_none_or(Value::is_null) {
            return Err(missing_field(index, field));
        }
    }

    let action_name = match object.remove("action_name") {
        Some(Value::String(name)) => name,
        _ => return Err(invalid_field(index, "action_name", "expected a string")),
    };
    let scores = take_scores(index, &mut object)?;
    let future_risk_e = take_future_risk(index, &mut object)?;
    let mitigations = take_mitigations(index, &mut object)?;

    let action = Action {
        action_name,
        scores,
        future_risk_e,
        mitigations,
    };
    action
        .validate()
        .map_err(|err| invalid_field(index, "action_name", err.to_string()))?;

    Ok(action)
}

fn take_scores(index: usize, object: &mut Map<String, Value>) -> Result<Scores, EthicsError> {
    let value = object.remove("scores").unwrap_or(Value::Null);
    if !value.is_object() {
        return Err(invalid_field(index, "scores", "expected an object"));
    }
    serde_json::from_value(value).map_err(|err| invalid_field(index, "scores", err.to_string()))
}

fn take_future_risk(
    index: usize,
    object: &mut Map<String, Value>,
) -> Result<Option<f64>, EthicsError> {
    match object.remove("future_risk_e") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid_field(index, "future_risk_e", "expected a number")),
    }
}

fn take_mitigations(
    index: usize,
    object: &mut Map<String, Value>,
) -> Result<Vec<String>, EthicsError> {
    match object.remove("mitigations") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value)
            .map_err(|err| invalid_field(index, "mitigations", err.to_string())),
    }
}
