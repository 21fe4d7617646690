use rtm_ethics::ethics::{RejectionReason, SHUTOFF_RULES, Thresholds, shutoff_reason};

use super::{action, scores};

#[test]
fn given_low_feasibility_when_alternatives_exhausted_then_still_infeasible() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.0, 0.0, 1.0, 0.0, 1.0, 0.49));
    assert_eq!(
        shutoff_reason(&thresholds, &a, true),
        Some(RejectionReason::Infeasible)
    );
}

#[test]
fn given_high_harm_when_alternatives_remain_then_high_harm_veto() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.71, 0.0, 1.0, 0.0, 1.0, 1.0));
    assert_eq!(
        shutoff_reason(&thresholds, &a, false),
        Some(RejectionReason::HighHarm)
    );
}

#[test]
fn given_high_harm_when_alternatives_exhausted_then_action_is_viable() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.95, 0.9, 0.0, 0.0, 0.0, 1.0));
    assert_eq!(shutoff_reason(&thresholds, &a, true), None);
}

#[test]
fn given_unmitigated_collateral_when_alternatives_remain_then_collateral_veto() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.1, 0.5, 0.1, 0.0, 0.0, 1.0));
    assert_eq!(
        shutoff_reason(&thresholds, &a, false),
        Some(RejectionReason::Collateral)
    );
}

#[test]
fn given_any_mitigation_text_when_collateral_is_high_then_veto_is_suppressed() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.1, 0.5, 0.1, 0.0, 0.0, 1.0)).with_mitigations([""]);
    assert_eq!(shutoff_reason(&thresholds, &a, false), None);
}

#[test]
fn given_collateral_with_sufficient_necessity_then_action_is_viable() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.1, 0.5, 0.3, 0.0, 0.0, 1.0));
    assert_eq!(shutoff_reason(&thresholds, &a, false), None);
}

#[test]
fn given_high_harm_and_collateral_then_harm_is_reported_first() {
    let thresholds = Thresholds::default();
    let a = action("A", scores(0.9, 0.9, 0.0, 0.0, 0.0, 1.0));
    assert_eq!(
        shutoff_reason(&thresholds, &a, false),
        Some(RejectionReason::HighHarm)
    );
}

#[test]
fn given_custom_thresholds_when_gating_then_engine_uses_injected_values() {
    let strict = Thresholds::default().with_shutoff_harm_threshold(0.3);
    let a = action("A", scores(0.4, 0.0, 1.0, 0.0, 0.0, 1.0));
    assert_eq!(
        shutoff_reason(&strict, &a, false),
        Some(RejectionReason::HighHarm)
    );
    assert_eq!(shutoff_reason(&Thresholds::default(), &a, false), None);
}

#[test]
fn given_rule_table_then_every_veto_reason_is_a_shutoff_and_cost_is_not() {
    assert!(SHUTOFF_RULES.iter().all(|rule| rule.reason.is_shutoff()));
    assert!(!RejectionReason::HigherCost.is_shutoff());
}
