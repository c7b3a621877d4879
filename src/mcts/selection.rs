//! Child scoring for UCT selection and action recommendation
//!
//! Both scores add a jitter of `u * EPSILON` (with `u` uniform in `[0, 1)`)
//! so exact ties are broken by the node's generator rather than by scan
//! order alone. The jitter is far below any meaningful score difference.

/// Added to visit counts to keep unvisited children finite, and scales the
/// tie-break jitter.
pub const EPSILON: f64 = 1e-6;

/// UCT score of a child
///
/// Formula: total / (n_child + ε) + sqrt(ln(n_parent + 1) / (n_child + ε)) + jitter
pub fn uct_score(parent_visits: u64, child_visits: u64, child_total: f64, jitter: f64) -> f64 {
    let n = child_visits as f64 + EPSILON;
    let exploitation = child_total / n;
    let exploration = ((parent_visits as f64 + 1.0).ln() / n).sqrt();
    exploitation + exploration + jitter * EPSILON
}

/// Exploitation-only score used to recommend an action
pub fn expected_value(child_visits: u64, child_total: f64, jitter: f64) -> f64 {
    child_total / (child_visits as f64 + EPSILON) + jitter * EPSILON
}

/// Index of the greatest score; a later index wins ties.
///
/// NaN scores never win. Returns `None` when no score is comparable,
/// including for an empty iterator.
pub fn argmax_last<I>(scores: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for (i, score) in scores.into_iter().enumerate() {
        if score >= best_score {
            best = Some(i);
            best_score = score;
        }
    }
    best
}
