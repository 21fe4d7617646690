mod request;
mod scenarios;
mod shutoff;

use rtm_ethics::ethics::{Action, ActionArbiter, Bounds, EthicsEngine, Outcome, Scores};

pub fn scores(h: f64, c: f64, n: f64, m: f64, b: f64, f: f64) -> Scores {
    Scores::new(h, c, n, m, b, f)
}

pub fn action(name: &str, scores: Scores) -> Action {
    Action::new(name, scores)
}

pub fn bounds() -> Bounds {
    serde_json::from_value(serde_json::json!({
        "time": "t",
        "budget": "b",
        "authority": "a",
        "risk_tolerance": "r"
    }))
    .expect("bounds should deserialize")
}

pub fn evaluate(actions: Vec<Action>, alternatives_exhausted: bool, e: f64) -> Outcome {
    EthicsEngine::default().evaluate(actions, &bounds(), alternatives_exhausted, e)
}
