pub mod contract;
pub mod cost;
pub mod defer;
pub mod engine;
pub mod error;
pub mod facade;
pub mod policy;
pub mod request;
pub mod selector;
pub mod shutoff;
pub mod thresholds;
pub mod types;

pub use contract::{OutputContract, outcome_schema};
pub use cost::cost;
pub use defer::{FALLBACK_ACTION_NAME, ensure_defer, fallback_action};
pub use engine::{ActionArbiter, EthicsEngine, assemble_outcome};
pub use error::{EthicsError, EthicsErrorKind};
pub use facade::EthicsFacade;
pub use policy::{passes_policy_gate, selection_pool};
pub use request::{EvaluationRequest, ValidatedRequest, parse_candidate_action};
pub use selector::{Selection, select_min_cost};
pub use shutoff::{SHUTOFF_RULES, ShutoffRule, shutoff_reason};
pub use thresholds::Thresholds;
pub use types::{
    ABORT_REASON_ALL_SHUT_OFF, AbortPayload, Action, ActionName, Bounds, DEFER_MARKER,
    DecisionAudit, Outcome, RejectionReason, Scores, WhyNot,
};
