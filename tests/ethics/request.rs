use rtm_ethics::ethics::{EthicsErrorKind, EthicsFacade, EvaluationRequest, Thresholds};
use serde_json::json;

fn request(body: serde_json::Value) -> EvaluationRequest {
    serde_json::from_value(body).expect("request envelope should deserialize")
}

#[test]
fn given_record_without_action_name_when_validating_then_missing_field_names_the_record() {
    let err = request(json!({
        "candidate_actions": [
            {"action_name": "ok", "scores": {"H": 0.1}},
            {"scores": {"H": 0.1}}
        ],
        "alternatives_exhausted": false,
        "trajectory_e_before": 0.2
    }))
    .into_validated()
    .expect_err("missing action_name must fail");

    assert_eq!(err.kind, EthicsErrorKind::MissingField);
    assert_eq!(err.record_index, Some(1));
    assert_eq!(err.field.as_deref(), Some("action_name"));
    assert!(err.to_string().contains("#1"), "unexpected message: {err}");
}

#[test]
fn given_record_without_scores_when_validating_then_missing_field_is_reported() {
    let err = request(json!({
        "candidate_actions": [{"action_name": "lonely"}],
        "alternatives_exhausted": true,
        "trajectory_e_before": 0.0
    }))
    .into_validated()
    .expect_err("missing scores must fail");

    assert_eq!(err.kind, EthicsErrorKind::MissingField);
    assert_eq!(err.record_index, Some(0));
    assert_eq!(err.field.as_deref(), Some("scores"));
}

#[test]
fn given_non_object_record_when_validating_then_invalid_field_is_reported() {
    let err = request(json!({
        "candidate_actions": ["just a name"],
        "alternatives_exhausted": false,
        "trajectory_e_before": 0.0
    }))
    .into_validated()
    .expect_err("string record must fail");

    assert_eq!(err.kind, EthicsErrorKind::InvalidField);
    assert_eq!(err.record_index, Some(0));
}

#[test]
fn given_bad_mitigations_when_validating_then_invalid_field_is_reported() {
    let err = request(json!({
        "candidate_actions": [
            {"action_name": "a", "scores": {}, "mitigations": "barrier"}
        ],
        "alternatives_exhausted": false,
        "trajectory_e_before": 0.0
    }))
    .into_validated()
    .expect_err("string mitigations must fail");

    assert_eq!(err.kind, EthicsErrorKind::InvalidField);
    assert_eq!(err.field.as_deref(), Some("mitigations"));
}

#[test]
fn given_well_formed_records_when_validating_then_optional_fields_are_filled_in() {
    let validated = request(json!({
        "candidate_actions": [
            {"action_name": "a", "scores": {"H": 0.3, "F": 0.9, "X": 5.0}},
            {"action_name": "b", "scores": {}, "future_risk_e": 0.4, "mitigations": ["m"]}
        ],
        "bounds": {"budget": 10},
        "alternatives_exhausted": false,
        "trajectory_e_before": 0.25
    }))
    .into_validated()
    .expect("request should validate");

    assert_eq!(validated.candidate_actions.len(), 2);
    let a = &validated.candidate_actions[0];
    assert_eq!(a.scores.harm, 0.3);
    assert_eq!(a.scores.feasibility, 0.9);
    assert_eq!(a.scores.benefit, 0.0);
    assert!(a.future_risk_e.is_none());
    let b = &validated.candidate_actions[1];
    assert_eq!(b.future_risk_e, Some(0.4));
    assert_eq!(b.mitigations, vec!["m".to_string()]);
    assert_eq!(validated.trajectory_e_before, 0.25);
}

#[test]
fn given_facade_when_request_is_malformed_then_no_outcome_is_produced() {
    let facade = EthicsFacade::with_defaults();
    let result = facade.evaluate_request(
        "req-bad",
        request(json!({
            "candidate_actions": [{"action_name": "a"}],
            "alternatives_exhausted": false,
            "trajectory_e_before": 0.0
        })),
    );
    assert!(result.is_err());
}

#[test]
fn given_facade_when_request_is_valid_then_outcome_uses_configured_thresholds() {
    let facade = EthicsFacade::from_thresholds(Thresholds::default().with_feasibility_min(0.95));
    assert_eq!(facade.thresholds().feasibility_min(), 0.95);

    let outcome = facade
        .evaluate_request(
            "req-ok",
            request(json!({
                "candidate_actions": [
                    {"action_name": "Nearly", "scores": {"F": 0.9, "B": 1.0, "M": 1.0, "N": 1.0}}
                ],
                "alternatives_exhausted": true,
                "trajectory_e_before": 0.0
            })),
        )
        .expect("request should evaluate");

    let audit = outcome.decision().expect("should decide");
    assert_eq!(audit.selected_action, "Defer / gather info");
    assert_eq!(
        audit.rejection_for("Nearly"),
        Some(rtm_ethics::ethics::RejectionReason::Infeasible)
    );
}

#[test]
fn given_unknown_top_level_field_when_deserializing_request_then_it_is_rejected() {
    let err = serde_json::from_value::<EvaluationRequest>(json!({
        "candidate_actions": [],
        "alternatives_exhausted": false,
        "trajectory_e_before": 0.0,
        "trajectory_e_after": 0.5
    }))
    .expect_err("unknown field must be rejected");

    assert!(err.to_string().contains("trajectory_e_after"), "unexpected error: {err}");
}
