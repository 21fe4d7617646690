use crate::ethics::types::{Action, Scores};

pub const FALLBACK_ACTION_NAME: &str = "Defer / gather info";
pub const FALLBACK_FUTURE_RISK_E: f64 = 0.2;
pub const FALLBACK_MITIGATION: &str = "Request critical facts";

/// The canonical "gather more information" action. Always feasible, never
/// harmful, never collateral-violating.
pub fn fallback_action() -> Action {
    Action::new(
        FALLBACK_ACTION_NAME,
        Scores {
            harm: 0.0,
            collateral: 0.0,
            necessity: 0.0,
            mitigation: 0.5,
            benefit: 0.1,
            feasibility: 1.0,
        },
    )
    .with_future_risk(FALLBACK_FUTURE_RISK_E)
    .with_mitigations([FALLBACK_MITIGATION])
}

/// Guarantees exactly one defer action in the working set.
///
/// Appends the fallback when no candidate is a defer action, then keeps only
/// the first defer action. Non-defer actions keep their relative order.
pub fn ensure_defer(mut actions: Vec<Action>) -> Vec<Action> {
    if !actions.iter().any(Action::is_defer) {
        actions.push(fallback_action());
    }

    let mut seen_defer = false;
    actions.retain(|action| {
        if !action.is_defer() {
            return true;
        }
        if seen_defer {
            return false;
        }
        seen_defer = true;
        true
    });
    actions
}
