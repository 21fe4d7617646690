use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::ethics::{Bounds, EthicsError, EvaluationRequest, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Exit,
    Evaluate {
        request_id: String,
        request: EvaluationRequest,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Outcome {
        request_id: String,
        outcome: Outcome,
    },
    Error {
        #[serde(default)]
        request_id: Option<String>,
        error: EthicsError,
    },
}

#[derive(Debug, Deserialize)]
struct WireEnvelope {
    #[serde(rename = "type")]
    kind: WireMessageType,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum WireMessageType {
    Exit,
    Evaluate,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireExit {
    #[serde(rename = "type")]
    _kind: WireMessageType,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireEvaluate {
    #[serde(rename = "type")]
    _kind: WireMessageType,
    #[serde(default)]
    request_id: Option<String>,
    candidate_actions: Vec<Value>,
    #[serde(default)]
    bounds: Bounds,
    alternatives_exhausted: bool,
    trajectory_e_before: f64,
}

/// A line that failed the strict wire parse. Keeps the caller's request id
/// when the line was at least a JSON object carrying one.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ProtocolError {
    pub request_id: Option<String>,
    #[source]
    pub source: serde_json::Error,
}

pub fn parse_client_message(line: &str) -> Result<ClientMessage, ProtocolError> {
    let value: Value = serde_json::from_str(line).map_err(|source| ProtocolError {
        request_id: None,
        source,
    })?;
    let request_id = value
        .get("request_id")
        .and_then(Value::as_str)
        .map(str::to_owned);

    parse_wire_value(value).map_err(|source| ProtocolError { request_id, source })
}

fn parse_wire_value(value: Value) -> Result<ClientMessage, serde_json::Error> {
    let envelope: WireEnvelope = serde_json::from_value(value.clone())?;

    let message = match envelope.kind {
        WireMessageType::Exit => {
            let _: WireExit = serde_json::from_value(value)?;
            ClientMessage::Exit
        }
        WireMessageType::Evaluate => {
            let wire: WireEvaluate = serde_json::from_value(value)?;
            ClientMessage::Evaluate {
                request_id: wire
                    .request_id
                    .unwrap_or_else(|| Uuid::now_v7().to_string()),
                request: EvaluationRequest {
                    candidate_actions: wire.candidate_actions,
                    bounds: wire.bounds,
                    alternatives_exhausted: wire.alternatives_exhausted,
                    trajectory_e_before: wire.trajectory_e_before,
                },
            }
        }
    };
    Ok(message)
}

pub fn encode_server_message(message: &ServerMessage) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}
