//! UCT search configuration
//!
//! `UctConfig` is the user-facing, serializable configuration. `NodeParams`
//! is the validated subset every node carries and passes down to its
//! children unchanged.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mcts::random::DEFAULT_SEED;
use crate::{Result, UctError};

/// Per-tree constants inherited by every node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeParams {
    action_count: usize,
    discount: f64,
    rollout_horizon: usize,
}

impl NodeParams {
    /// Validated parameters.
    ///
    /// Rejects an empty action set and any discount outside `(0, 1]`.
    pub fn new(action_count: usize, discount: f64, rollout_horizon: usize) -> Result<Self> {
        if action_count == 0 {
            return Err(UctError::InvalidActionCount(action_count));
        }
        if !discount.is_finite() || discount <= 0.0 || discount > 1.0 {
            return Err(UctError::InvalidDiscount(discount));
        }
        Ok(Self {
            action_count,
            discount,
            rollout_horizon,
        })
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn rollout_horizon(&self) -> usize {
        self.rollout_horizon
    }
}

/// UCT search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UctConfig {
    /// Number of actions available at every node (N)
    /// Default: 4
    pub action_count: usize,

    /// Discount factor γ applied per edge during backpropagation and per
    /// step inside rollouts
    /// Default: 0.9
    pub discount: f64,

    /// Maximum number of steps of a rollout
    /// Default: 50
    pub rollout_horizon: usize,

    /// Seed of the root generator
    pub seed: u64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            action_count: 4,
            discount: 0.9,
            rollout_horizon: 50,
            seed: DEFAULT_SEED,
        }
    }
}

impl UctConfig {
    pub fn new(action_count: usize) -> Self {
        Self {
            action_count,
            ..Self::default()
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_rollout_horizon(mut self, horizon: usize) -> Self {
        self.rollout_horizon = horizon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads a configuration from a JSON file. Missing fields take their
    /// default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.node_params().map(|_| ())
    }

    pub fn node_params(&self) -> Result<NodeParams> {
        NodeParams::new(self.action_count, self.discount, self.rollout_horizon)
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "actions[{}]_gamma[{:.3}]_horizon[{}]_seed[{}]",
            self.action_count, self.discount, self.rollout_horizon, self.seed
        )
    }
}
