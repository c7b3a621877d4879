//! Reward source boundary
//!
//! The tree never sees the decision process itself, only a capability that
//! answers "what immediate reward does this action yield from wherever the
//! process currently is". Successive calls during one `iterate` walk one step
//! deeper along the explored path, in order.

use std::convert::Infallible;

/// External reward source the search is parameterized over
pub trait RewardSource {
    /// Error raised by the source, handed back to the caller untouched
    type Error;

    /// Immediate reward for taking `action` (in `[0, N)`)
    fn reward(&mut self, action: usize) -> Result<f64, Self::Error>;
}

impl<F> RewardSource for F
where
    F: FnMut(usize) -> f64,
{
    type Error = Infallible;

    fn reward(&mut self, action: usize) -> Result<f64, Infallible> {
        Ok(self(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_reward_source() {
        let mut calls = Vec::new();
        let mut source = |action: usize| {
            calls.push(action);
            action as f64 * 0.5
        };

        assert_eq!(source.reward(2), Ok(1.0));
        assert_eq!(source.reward(0), Ok(0.0));
        drop(source);
        assert_eq!(calls, vec![2, 0]);
    }
}
