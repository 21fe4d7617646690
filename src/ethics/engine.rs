use crate::ethics::{
    defer::ensure_defer,
    policy::selection_pool,
    request::ValidatedRequest,
    selector::select_min_cost,
    shutoff::shutoff_reason,
    thresholds::Thresholds,
    types::{AbortPayload, Action, Bounds, DecisionAudit, Outcome, RejectionReason, WhyNot},
};

pub trait ActionArbiter: Send + Sync {
    fn thresholds(&self) -> &Thresholds;

    fn evaluate(
        &self,
        candidate_actions: Vec<Action>,
        bounds: &Bounds,
        alternatives_exhausted: bool,
        trajectory_e_before: f64,
    ) -> Outcome;

    fn evaluate_validated(&self, request: ValidatedRequest) -> Outcome {
        self.evaluate(
            request.candidate_actions,
            &request.bounds,
            request.alternatives_exhausted,
            request.trajectory_e_before,
        )
    }
}

/// Pure evaluation pipeline: defer injection, shutoff gate, policy gate,
/// minimum-cost selection and audit assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EthicsEngine {
    thresholds: Thresholds,
}

impl EthicsEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl ActionArbiter for EthicsEngine {
    fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    fn evaluate(
        &self,
        candidate_actions: Vec<Action>,
        _bounds: &Bounds,
        alternatives_exhausted: bool,
        trajectory_e_before: f64,
    ) -> Outcome {
        let actions = ensure_defer(candidate_actions);

        let mut why_not_others = Vec::new();
        let mut viable = Vec::with_capacity(actions.len());
        for action in &actions {
            match shutoff_reason(&self.thresholds, action, alternatives_exhausted) {
                Some(reason) => why_not_others.push(WhyNot::new(&action.action_name, reason)),
                None => viable.push(action),
            }
        }

        assemble_outcome(
            &self.thresholds,
            &viable,
            why_not_others,
            trajectory_e_before,
        )
    }
}

/// Terminal step: `Aborted` when nothing survived the shutoff gate,
/// `Decided` otherwise.
///
/// Viable actions dropped from the pool by the policy gate get no
/// `why_not_others` entry; only shutoff vetoes and outranked pool members
/// are explained.
pub fn assemble_outcome(
    thresholds: &Thresholds,
    viable: &[&Action],
    mut why_not_others: Vec<WhyNot>,
    trajectory_e_before: f64,
) -> Outcome {
    let pool = selection_pool(thresholds, viable);
    let Some(selection) = select_min_cost(&pool, trajectory_e_before) else {
        return Outcome::Aborted(AbortPayload::all_shut_off());
    };

    why_not_others.extend(
        selection
            .outranked
            .iter()
            .map(|action| WhyNot::new(&action.action_name, RejectionReason::HigherCost)),
    );

    Outcome::Decided(DecisionAudit {
        selected_action: selection.selected.action_name.clone(),
        scores: selection.selected.scores,
        future_risk_e: selection.effective_future_risk,
        mitigations: selection.selected.mitigations.clone(),
        why_not_others,
    })
}
