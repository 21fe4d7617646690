use std::thread;

use rtm_ethics::ethics::{
    ActionArbiter, EthicsEngine, FALLBACK_ACTION_NAME, Outcome, RejectionReason, WhyNot,
};

use super::{action, bounds, evaluate, scores};

#[test]
fn given_infeasible_high_harm_candidate_when_evaluating_then_it_is_excluded_as_infeasible() {
    let actions = vec![
        action("A1", scores(0.2, 0.0, 0.8, 0.8, 0.6, 1.0)),
        action("A2", scores(0.9, 0.1, 0.1, 0.1, 0.1, 0.4)),
    ];

    let outcome = evaluate(actions, false, 0.3);
    let audit = outcome.decision().expect("should decide");

    assert_ne!(audit.selected_action, "A2");
    assert_eq!(audit.selected_action, "A1");
    assert_eq!(
        audit.why_not_others,
        vec![
            WhyNot::new("A2", RejectionReason::Infeasible),
            WhyNot::new(FALLBACK_ACTION_NAME, RejectionReason::HigherCost),
        ]
    );
}

#[test]
fn given_empty_candidates_when_evaluating_then_defer_fallback_is_selected() {
    for alternatives_exhausted in [false, true] {
        let outcome = evaluate(Vec::new(), alternatives_exhausted, 0.9);
        let audit = outcome.decision().expect("fallback guarantees a decision");

        assert_eq!(audit.selected_action, FALLBACK_ACTION_NAME);
        assert_eq!(audit.future_risk_e, 0.2);
        assert_eq!(audit.mitigations, vec!["Request critical facts".to_string()]);
        assert!(audit.why_not_others.is_empty());
    }
}

#[test]
fn given_twin_collateral_actions_when_only_one_is_mitigated_then_only_the_other_is_vetoed() {
    let risky = scores(0.1, 0.5, 0.1, 0.2, 0.2, 1.0);
    let actions = vec![
        action("Unmitigated", risky),
        action("Mitigated", risky).with_mitigations(["barrier"]),
    ];

    let outcome = evaluate(actions, false, 0.3);
    let audit = outcome.decision().expect("should decide");

    assert_eq!(
        audit.rejection_for("Unmitigated"),
        Some(RejectionReason::Collateral)
    );
    assert_eq!(
        audit.rejection_for("Mitigated"),
        Some(RejectionReason::HigherCost)
    );
    assert_eq!(audit.selected_action, FALLBACK_ACTION_NAME);
}

/// The injected fallback is feasible, harmless and collateral-free, so no
/// call through `evaluate` can end in an abort. Keep this test as a guard on
/// that invariant; an abort here means the fallback changed.
#[test]
fn given_every_candidate_vetoed_when_evaluating_then_fallback_prevents_abort() {
    let actions = vec![
        action("Infeasible", scores(0.0, 0.0, 1.0, 1.0, 1.0, 0.0)),
        action("Harmful", scores(1.0, 0.0, 1.0, 1.0, 1.0, 1.0)),
        action("Collateral", scores(0.1, 1.0, 0.0, 0.0, 0.0, 1.0)),
    ];

    let outcome = evaluate(actions, false, 0.5);

    assert!(!outcome.is_aborted(), "abort path must stay unreachable");
    let audit = outcome.decision().expect("should decide");
    assert_eq!(audit.selected_action, FALLBACK_ACTION_NAME);
    assert_eq!(
        audit.why_not_others,
        vec![
            WhyNot::new("Infeasible", RejectionReason::Infeasible),
            WhyNot::new("Harmful", RejectionReason::HighHarm),
            WhyNot::new("Collateral", RejectionReason::Collateral),
        ]
    );
}

#[test]
fn given_infeasible_caller_defer_when_evaluating_then_outcome_aborts() {
    // A caller-supplied defer action replaces the canonical fallback, so the
    // abort branch becomes reachable once it is vetoed too.
    let actions = vec![
        action("Defer (unavailable)", scores(0.0, 0.0, 0.0, 0.0, 0.0, 0.1)),
        action("Harmful", scores(0.9, 0.0, 1.0, 0.0, 0.0, 1.0)),
    ];

    let outcome = evaluate(actions, false, 0.1);

    match outcome {
        Outcome::Aborted(payload) => {
            assert!(payload.action_aborted);
            assert_eq!(payload.reason, "All options shut off");
        }
        Outcome::Decided(audit) => panic!("expected abort, got {audit:?}"),
    }
}

#[test]
fn given_identical_input_when_evaluating_twice_then_serialized_output_is_identical() {
    let build = || {
        vec![
            action("A", scores(0.3, 0.4, 0.2, 0.1, 0.5, 0.9)).with_mitigations(["m1", "m2"]),
            action("B", scores(0.1, 0.0, 0.9, 0.4, 0.4, 0.8)).with_future_risk(0.25),
            action("C", scores(0.8, 0.0, 0.9, 0.4, 0.4, 0.8)),
        ]
    };

    let first = serde_json::to_vec(&evaluate(build(), false, 0.3)).expect("serialize");
    let second = serde_json::to_vec(&evaluate(build(), false, 0.3)).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn given_shared_engine_when_evaluating_across_threads_then_results_match_serial_run() {
    let engine = EthicsEngine::default();
    let candidates = vec![
        action("A", scores(0.3, 0.4, 0.2, 0.1, 0.5, 0.9)),
        action("B", scores(0.1, 0.0, 0.9, 0.4, 0.4, 0.8)),
    ];
    let serial = engine.evaluate(candidates.clone(), &bounds(), false, 0.3);

    let results: Vec<Outcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let candidates = candidates.clone();
                let engine = &engine;
                scope.spawn(move || engine.evaluate(candidates, &bounds(), false, 0.3))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker should not panic"))
            .collect()
    });

    for outcome in results {
        assert_eq!(outcome, serial);
    }
}
