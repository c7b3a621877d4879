//! # UCT Search Library
//!
//! Monte Carlo Tree Search with the UCT (Upper Confidence bound applied to
//! Trees) selection rule, for sequential decision processes with a small,
//! fixed set of discrete actions.
//!
//! ## Features
//!
//! - **Search tree**: owned nodes with visit counts and value sums, grown one
//!   level per iteration
//! - **Reward sources**: any `FnMut(usize) -> f64`, or a fallible type
//!   implementing [`RewardSource`]
//! - **Reproducibility**: explicitly seeded generators, derived per node
//! - **Diagnostics**: textual and JSON tree summaries
//!
//! ## Usage
//!
//! ```rust
//! use uct_search::UctNode;
//!
//! let mut tree = UctNode::new(3);
//! let mut reward = |action: usize| if action == 2 { 1.0 } else { 0.0 };
//! for _ in 0..50 {
//!     tree.iterate(&mut reward).unwrap();
//! }
//! assert_eq!(tree.num_of_nodes(), 1 + 3 * 50);
//! let action = tree.best_action();
//! assert!(action < 3);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// UCT search engine
pub mod mcts;

/// Stand-in reward sources for harnesses and tests
pub mod bandit;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use mcts::*;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the UCT search library
#[derive(Debug, thiserror::Error)]
pub enum UctError {
    #[error("Action count must be at least 1, got {0}")]
    InvalidActionCount(usize),

    #[error("Discount factor must lie in (0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UctError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
