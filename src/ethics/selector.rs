use crate::ethics::{cost::cost, types::Action};

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub selected: &'a Action,
    pub effective_future_risk: f64,
    /// Every other pool member, in pool order.
    pub outranked: Vec<&'a Action>,
}

/// Picks the minimum-cost member of `pool`. Ties keep the earliest member.
///
/// Members are tracked by position, so two actions sharing a name are still
/// told apart.
pub fn select_min_cost<'a>(pool: &[&'a Action], trajectory_e_before: f64) -> Option<Selection<'a>> {
    let (first, rest) = pool.split_first()?;

    let mut best_index = 0;
    let mut best_cost = cost(
        &first.scores,
        first.effective_future_risk(trajectory_e_before),
    );
    for (offset, action) in rest.iter().enumerate() {
        let candidate_cost = cost(
            &action.scores,
            action.effective_future_risk(trajectory_e_before),
        );
        if candidate_cost < best_cost {
            best_cost = candidate_cost;
            best_index = offset + 1;
        }
    }

    let selected = pool[best_index];
    let outranked = pool
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != best_index)
        .map(|(_, action)| *action)
        .collect();

    Some(Selection {
        selected,
        effective_future_risk: selected.effective_future_risk(trajectory_e_before),
        outranked,
    })
}
