use crate::ethics::{
    thresholds::Thresholds,
    types::{Action, RejectionReason},
};

/// One hard veto. Rules are checked top-down and the first match wins.
#[derive(Clone, Copy)]
pub struct ShutoffRule {
    pub reason: RejectionReason,
    /// Rule is skipped when the caller asserts alternatives are exhausted.
    pub relaxed_when_exhausted: bool,
    pub violates: fn(&Thresholds, &Action) -> bool,
}

pub const SHUTOFF_RULES: [ShutoffRule; 3] = [
    ShutoffRule {
        reason: RejectionReason::Infeasible,
        relaxed_when_exhausted: false,
        violates: infeasible,
    },
    ShutoffRule {
        reason: RejectionReason::HighHarm,
        relaxed_when_exhausted: true,
        violates: high_harm,
    },
    ShutoffRule {
        reason: RejectionReason::Collateral,
        relaxed_when_exhausted: true,
        violates: unmitigated_collateral,
    },
];

fn infeasible(thresholds: &Thresholds, action: &Action) -> bool {
    action.scores.feasibility < thresholds.feasibility_min()
}

fn high_harm(thresholds: &Thresholds, action: &Action) -> bool {
    action.scores.harm > thresholds.shutoff_harm_threshold()
}

fn unmitigated_collateral(thresholds: &Thresholds, action: &Action) -> bool {
    action.scores.collateral > thresholds.collateral_min()
        && action.scores.necessity < thresholds.necessity_low()
        && !action.is_mitigated()
}

/// Returns the veto reason for `action`, or `None` when it stays viable.
pub fn shutoff_reason(
    thresholds: &Thresholds,
    action: &Action,
    alternatives_exhausted: bool,
) -> Option<RejectionReason> {
    SHUTOFF_RULES
        .iter()
        .filter(|rule| !(alternatives_exhausted && rule.relaxed_when_exhausted))
        .find(|rule| (rule.violates)(thresholds, action))
        .map(|rule| rule.reason)
}
