//! Multi-armed bandit used as a stand-in decision process
//!
//! Every pull returns `mean[arm] + noise * (u - 0.5)` with `u` uniform in
//! `[0, 1)`. The bandit has no state besides its generator, so every level of
//! the search tree faces the same arms.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::mcts::reward::RewardSource;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BanditError {
    #[error("Arm {arm} does not exist (bandit has {arms} arms)")]
    UnknownArm { arm: usize, arms: usize },
}

#[derive(Debug, Clone)]
pub struct SimpleBandit {
    means: Vec<f64>,
    noise: f64,
    rng: StdRng,
    pulls: u64,
}

impl SimpleBandit {
    /// Bandit with the given arm means and uniform noise of width `noise`
    pub fn new(means: Vec<f64>, noise: f64, seed: u64) -> Self {
        Self {
            means,
            noise,
            rng: StdRng::seed_from_u64(seed),
            pulls: 0,
        }
    }

    /// `arms` identical arms paying uniformly in `[0, 1)`
    pub fn uniform(arms: usize, seed: u64) -> Self {
        Self::new(vec![0.5; arms], 1.0, seed)
    }

    /// Arm means spread evenly over `[0, 1]`, best arm last
    pub fn linear(arms: usize, noise: f64, seed: u64) -> Self {
        let step = if arms > 1 { 1.0 / (arms - 1) as f64 } else { 0.0 };
        let means = (0..arms).map(|k| k as f64 * step).collect();
        Self::new(means, noise, seed)
    }

    pub fn arms(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Number of successful pulls so far
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    pub fn pull(&mut self, arm: usize) -> Result<f64, BanditError> {
        let mean = self.means.get(arm).copied().ok_or(BanditError::UnknownArm {
            arm,
            arms: self.means.len(),
        })?;
        self.pulls += 1;
        let u: f64 = self.rng.random();
        Ok(mean + self.noise * (u - 0.5))
    }
}

impl RewardSource for SimpleBandit {
    type Error = BanditError;

    fn reward(&mut self, action: usize) -> Result<f64, BanditError> {
        self.pull(action)
    }
}
