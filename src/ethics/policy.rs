use crate::ethics::{thresholds::Thresholds, types::Action};

pub fn passes_policy_gate(thresholds: &Thresholds, action: &Action) -> bool {
    action.scores.necessity >= thresholds.necessity_high()
        || action.scores.harm < thresholds.harm_low()
}

/// Picks the selection pool from the viable set: the policy-clean actions
/// when any exist, otherwise every viable action.
pub fn selection_pool<'a>(thresholds: &Thresholds, viable: &[&'a Action]) -> Vec<&'a Action> {
    let policy_ok: Vec<&Action> = viable
        .iter()
        .copied()
        .filter(|action| passes_policy_gate(thresholds, action))
        .collect();

    if policy_ok.is_empty() {
        viable.to_vec()
    } else {
        policy_ok
    }
}
