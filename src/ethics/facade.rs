use crate::ethics::{
    engine::{ActionArbiter, EthicsEngine},
    error::EthicsError,
    request::EvaluationRequest,
    thresholds::Thresholds,
    types::Outcome,
};

/// Runtime entry into the arbiter: validates raw requests, runs the pipeline
/// and records each outcome. The pipeline itself stays silent.
pub struct EthicsFacade {
    arbiter: Box<dyn ActionArbiter>,
}

impl Default for EthicsFacade {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EthicsFacade {
    pub fn new(arbiter: Box<dyn ActionArbiter>) -> Self {
        Self { arbiter }
    }

    pub fn with_defaults() -> Self {
        Self::from_thresholds(Thresholds::default())
    }

    pub fn from_thresholds(thresholds: Thresholds) -> Self {
        Self::new(Box::new(EthicsEngine::new(thresholds)))
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.arbiter.thresholds()
    }

    #[tracing::instrument(
        name = "ethics_evaluate",
        target = "ethics",
        skip(self, request),
        fields(
            request_id = %request_id,
            candidate_count = request.candidate_actions.len(),
            alternatives_exhausted = request.alternatives_exhausted
        )
    )]
    pub fn evaluate_request(
        &self,
        request_id: &str,
        request: EvaluationRequest,
    ) -> Result<Outcome, EthicsError> {
        let bounds_keys: Vec<String> = request.bounds.keys().cloned().collect();
        let validated = match request.into_validated() {
            Ok(validated) => validated,
            Err(err) => {
                tracing::warn!(
                    target: "ethics",
                    request_id = %request_id,
                    kind = ?err.kind,
                    record_index = ?err.record_index,
                    field = ?err.field,
                    error = %err,
                    "evaluation_rejected"
                );
                return Err(err);
            }
        };

        let outcome = self.arbiter.evaluate_validated(validated);
        match &outcome {
            Outcome::Decided(audit) => tracing::info!(
                target: "ethics",
                request_id = %request_id,
                selected_action = %audit.selected_action,
                future_risk_e = audit.future_risk_e,
                explained_count = audit.why_not_others.len(),
                vetoed_count = audit
                    .why_not_others
                    .iter()
                    .filter(|entry| entry.reason.is_shutoff())
                    .count(),
                bounds_keys = ?bounds_keys,
                "evaluation_decided"
            ),
            Outcome::Aborted(payload) => tracing::warn!(
                target: "ethics",
                request_id = %request_id,
                reason = %payload.reason,
                bounds_keys = ?bounds_keys,
                "evaluation_aborted"
            ),
        }

        Ok(outcome)
    }
}
