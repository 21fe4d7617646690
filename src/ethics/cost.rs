use crate::ethics::types::Scores;

pub const HARM_WEIGHT: f64 = 1.5;
pub const COLLATERAL_WEIGHT: f64 = 0.6;
pub const FUTURE_RISK_WEIGHT: f64 = 0.8;
pub const BENEFIT_WEIGHT: f64 = 1.0;
pub const MITIGATION_WEIGHT: f64 = 0.9;
pub const INFEASIBILITY_WEIGHT: f64 = 0.2;
pub const NON_NECESSITY_WEIGHT: f64 = 0.1;

/// Ranking cost of taking an action with `scores` and forward risk `e`.
/// Lower is better.
pub fn cost(scores: &Scores, e: f64) -> f64 {
    let burden = HARM_WEIGHT * scores.harm
        + COLLATERAL_WEIGHT * scores.collateral
        + FUTURE_RISK_WEIGHT * e;
    let relief = BENEFIT_WEIGHT * scores.benefit + MITIGATION_WEIGHT * scores.mitigation;

    burden - relief
        + INFEASIBILITY_WEIGHT * (1.0 - scores.feasibility)
        + NON_NECESSITY_WEIGHT * (1.0 - scores.necessity)
}
