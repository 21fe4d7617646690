use std::{collections::BTreeMap, fmt};

use schemars::{
    JsonSchema,
    schema::{InstanceType, Schema, SchemaObject},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub type ActionName = String;

/// Substring that marks an action as the defer fallback.
pub const DEFER_MARKER: &str = "Defer";

pub const ABORT_REASON_ALL_SHUT_OFF: &str = "All options shut off";

/// Upstream scores for one action. Values are taken as-is, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Scores {
    #[serde(rename = "H", default)]
    pub harm: f64,
    #[serde(rename = "C", default)]
    pub collateral: f64,
    #[serde(rename = "N", default)]
    pub necessity: f64,
    #[serde(rename = "M", default)]
    pub mitigation: f64,
    #[serde(rename = "B", default)]
    pub benefit: f64,
    #[serde(rename = "F", default)]
    pub feasibility: f64,
}

impl Scores {
    pub fn new(
        harm: f64,
        collateral: f64,
        necessity: f64,
        mitigation: f64,
        benefit: f64,
        feasibility: f64,
    ) -> Self {
        Self {
            harm,
            collateral,
            necessity,
            mitigation,
            benefit,
            feasibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Action {
    #[validate(length(min = 1, message = "action_name must not be empty"))]
    pub action_name: ActionName,
    pub scores: Scores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_risk_e: Option<f64>,
    #[serde(default)]
    pub mitigations: Vec<String>,
}

impl Action {
    pub fn new(action_name: impl Into<String>, scores: Scores) -> Self {
        Self {
            action_name: action_name.into(),
            scores,
            future_risk_e: None,
            mitigations: Vec::new(),
        }
    }

    pub fn with_future_risk(mut self, future_risk_e: f64) -> Self {
        self.future_risk_e = Some(future_risk_e);
        self
    }

    pub fn with_mitigations<I, S>(mut self, mitigations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mitigations = mitigations.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_defer(&self) -> bool {
        self.action_name.contains(DEFER_MARKER)
    }

    pub fn is_mitigated(&self) -> bool {
        !self.mitigations.is_empty()
    }

    /// Forward risk used for ranking: the action's own estimate, else the
    /// caller's trajectory baseline.
    pub fn effective_future_risk(&self, trajectory_e_before: f64) -> f64 {
        self.future_risk_e.unwrap_or(trajectory_e_before)
    }
}

/// Caller context (time, budget, authority, risk tolerance). Never read by
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bounds(BTreeMap<String, serde_json::Value>);

impl Bounds {
    pub fn new(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self(entries)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Bounds {
    fn from(value: BTreeMap<String, serde_json::Value>) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RejectionReason {
    Infeasible,
    HighHarm,
    Collateral,
    HigherCost,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Infeasible => "Infeasible",
            Self::HighHarm => "HighHarm",
            Self::Collateral => "Collateral",
            Self::HigherCost => "HigherCost",
        }
    }

    pub fn is_shutoff(self) -> bool {
        !matches!(self, Self::HigherCost)
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WhyNot {
    pub action: ActionName,
    pub reason: RejectionReason,
}

impl WhyNot {
    pub fn new(action: impl Into<String>, reason: RejectionReason) -> Self {
        Self {
            action: action.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionAudit {
    pub selected_action: ActionName,
    pub scores: Scores,
    pub future_risk_e: f64,
    pub mitigations: Vec<String>,
    pub why_not_others: Vec<WhyNot>,
}

impl DecisionAudit {
    pub fn rejection_for(&self, action_name: &str) -> Option<RejectionReason> {
        self.why_not_others
            .iter()
            .find(|entry| entry.action == action_name)
            .map(|entry| entry.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AbortPayload {
    #[serde(rename = "ACTION_ABORTED")]
    #[schemars(schema_with = "always_true")]
    pub action_aborted: bool,
    pub reason: String,
    pub top_safer_options: Vec<BTreeMap<String, serde_json::Value>>,
    pub missing_facts_suggestion: Vec<String>,
}

fn always_true(_: &mut schemars::r#gen::SchemaGenerator) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::Boolean.into()),
        const_value: Some(serde_json::Value::Bool(true)),
        ..Default::default()
    }
    .into()
}

impl AbortPayload {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            action_aborted: true,
            reason: reason.into(),
            top_safer_options: Vec::new(),
            missing_facts_suggestion: Vec::new(),
        }
    }

    pub fn all_shut_off() -> Self {
        Self::new(ABORT_REASON_ALL_SHUT_OFF)
    }
}

/// Result of one evaluation: exactly one of a decision or an abort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Outcome {
    Decided(DecisionAudit),
    Aborted(AbortPayload),
}

impl Outcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    pub fn decision(&self) -> Option<&DecisionAudit> {
        match self {
            Self::Decided(audit) => Some(audit),
            Self::Aborted(_) => None,
        }
    }

    pub fn selected_action(&self) -> Option<&str> {
        self.decision().map(|audit| audit.selected_action.as_str())
    }
}
