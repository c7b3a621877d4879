pub mod hyperparameters;
pub mod node;
pub mod random;
pub mod reward;
pub mod rollout;
pub mod selection;
pub mod summary;

pub use hyperparameters::{NodeParams, UctConfig};
pub use node::UctNode;
pub use random::{RandomSource, SeededUniform, DEFAULT_SEED};
pub use reward::RewardSource;
pub use summary::{ChildSummary, TreeSummary};
