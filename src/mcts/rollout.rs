//! Bounded random rollout
//!
//! Estimates the return of a freshly expanded leaf without growing the tree:
//! draws uniformly random actions, asks the reward source for each immediate
//! reward, and sums them discounted by γ^t for at most `horizon` steps.

use crate::mcts::hyperparameters::NodeParams;
use crate::mcts::random::RandomSource;
use crate::mcts::reward::RewardSource;

/// Discounted sum Σ γ^t · r_t over `params.rollout_horizon()` random steps.
///
/// A zero horizon returns 0.0 without touching the reward source.
pub fn rollout<R, S>(params: &NodeParams, rng: &mut R, source: &mut S) -> Result<f64, S::Error>
where
    R: RandomSource,
    S: RewardSource + ?Sized,
{
    let mut value = 0.0;
    let mut weight = 1.0;
    for _ in 0..params.rollout_horizon() {
        let action = rng.next_index(params.action_count());
        value += weight * source.reward(action)?;
        weight *= params.discount();
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::random::SeededUniform;

    #[test]
    fn test_zero_horizon() {
        let params = NodeParams::new(3, 0.9, 0).unwrap();
        let mut rng = SeededUniform::new(1);
        let mut calls = 0;
        let mut source = |_action: usize| {
            calls += 1;
            1.0
        };
        let value = rollout(&params, &mut rng, &mut source).unwrap();
        assert_eq!(value, 0.0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_constant_reward_is_geometric_sum() {
        let params = NodeParams::new(4, 0.9, 50).unwrap();
        let mut rng = SeededUniform::new(1);
        let mut source = |_action: usize| 1.0;
        let value = rollout(&params, &mut rng, &mut source).unwrap();
        let expected = (1.0 - 0.9f64.powi(50)) / (1.0 - 0.9);
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_actions_stay_in_range() {
        let params = NodeParams::new(3, 1.0, 200).unwrap();
        let mut rng = SeededUniform::new(9);
        let mut source = |action: usize| {
            assert!(action < 3);
            action as f64
        };
        let value = rollout(&params, &mut rng, &mut source).unwrap();
        assert!((0.0..=400.0).contains(&value));
    }

    #[test]
    fn test_error_stops_rollout() {
        let params = NodeParams::new(2, 0.9, 10).unwrap();
        let mut rng = SeededUniform::new(1);
        let mut calls = 0;
        let mut source = FailingAfter { remaining: 3, calls: &mut calls };
        let result = rollout(&params, &mut rng, &mut source);
        assert_eq!(result, Err("exhausted"));
        assert_eq!(calls, 4);
    }

    struct FailingAfter<'a> {
        remaining: usize,
        calls: &'a mut usize,
    }

    impl RewardSource for FailingAfter<'_> {
        type Error = &'static str;

        fn reward(&mut self, _action: usize) -> Result<f64, Self::Error> {
            *self.calls += 1;
            if self.remaining == 0 {
                return Err("exhausted");
            }
            self.remaining -= 1;
            Ok(1.0)
        }
    }
}
