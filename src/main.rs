// main.rs - regression harness: UCT tree against a stand-in bandit
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, warn};

use uct_search::bandit::SimpleBandit;
use uct_search::mcts::selection::argmax_last;
use uct_search::{TreeSummary, UctConfig, UctNode};

mod logging;

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum BanditKind {
    /// Every arm pays uniformly in [0, 1)
    Uniform,
    /// Arm means spread over [0, 1], best arm last
    Linear,
}

#[derive(Parser, Debug)]
#[command(name = "uct_search", version, about)]
struct Config {
    /// Number of actions at every node
    #[arg(short = 'a', long)]
    actions: Option<usize>,

    /// Number of MCTS iterations to run
    #[arg(short = 'i', long, default_value_t = 10)]
    iterations: usize,

    /// Discount factor γ in (0, 1]
    #[arg(long)]
    discount: Option<f64>,

    /// Maximum rollout length
    #[arg(long)]
    horizon: Option<usize>,

    /// Seed of the tree generator (the bandit uses seed + 1)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON file holding a search configuration; flags above override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Reward process to search
    #[arg(long, value_enum, default_value = "uniform")]
    bandit: BanditKind,

    /// Noise width of the linear bandit
    #[arg(long, default_value_t = 0.2)]
    noise: f64,

    /// Print the final tree summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write logs to rotated files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum HarnessError {
    #[error("Wrong best action {reported} - should be: {expected}")]
    WrongBestAction { reported: usize, expected: usize },

    #[error("Unexpected number of nodes {actual}. Should be: {expected}")]
    UnexpectedNodeCount { actual: usize, expected: usize },
}

impl Config {
    fn search_config(&self) -> uct_search::Result<UctConfig> {
        let mut search = match &self.config {
            Some(path) => UctConfig::from_json_file(path)?,
            None => UctConfig::default(),
        };
        if let Some(actions) = self.actions {
            search.action_count = actions;
        }
        if let Some(discount) = self.discount {
            search.discount = discount;
        }
        if let Some(horizon) = self.horizon {
            search.rollout_horizon = horizon;
        }
        if let Some(seed) = self.seed {
            search.seed = seed;
        }
        search.validate()?;
        Ok(search)
    }
}

/// The action with the highest mean value among the root children, later
/// action winning ties. `None` while some root action is still unvisited.
fn true_best_action<R>(tree: &UctNode<R>) -> Option<usize> {
    if tree.is_leaf() {
        return None;
    }
    let q_values: Option<Vec<f64>> = tree.children().iter().map(|c| c.mean_value()).collect();
    argmax_last(q_values?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _logger = logging::setup_logging("info", config.log_dir.as_deref())?;

    let search = config.search_config()?;
    info!("Search configuration: {}", search.to_config_string());

    let mut bandit = match config.bandit {
        BanditKind::Uniform => SimpleBandit::uniform(search.action_count, search.seed.wrapping_add(1)),
        BanditKind::Linear => {
            SimpleBandit::linear(search.action_count, config.noise, search.seed.wrapping_add(1))
        }
    };
    let mut tree = UctNode::with_config(&search)?;

    for k in 0..config.iterations {
        debug!("tree: {}", tree);
        debug!("iteration: {}", k);
        tree.iterate(&mut bandit)?;
    }
    debug!("tree: {:#}", tree);

    let best_action = tree.best_action();
    let n_nodes = tree.num_of_nodes();
    let max_depth = tree.depth();
    info!("Best Action: {}", best_action);
    info!("Number of Nodes: {}", n_nodes);
    info!("Max Depth: {}", max_depth);
    info!("Bandit pulls: {}", bandit.pulls());

    if config.json {
        println!("{}", serde_json::to_string_pretty(&TreeSummary::of(&tree))?);
    }

    match true_best_action(&tree) {
        Some(expected) if expected != best_action => {
            return Err(HarnessError::WrongBestAction {
                reported: best_action,
                expected,
            }
            .into());
        }
        Some(_) => info!("Correct best action"),
        None => warn!("Some root actions are unvisited, best action not checked"),
    }

    let expected_nodes = 1 + search.action_count * config.iterations;
    if expected_nodes != n_nodes {
        return Err(HarnessError::UnexpectedNodeCount {
            actual: n_nodes,
            expected: expected_nodes,
        }
        .into());
    }
    info!("Number of nodes is correct: {}", expected_nodes);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Config::parse_from(["uct_search"]);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.bandit, BanditKind::Uniform);
        let search = config.search_config().unwrap();
        assert_eq!(search, UctConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::parse_from([
            "uct_search",
            "--actions",
            "6",
            "--discount",
            "0.5",
            "--horizon",
            "5",
            "--seed",
            "3",
            "--bandit",
            "linear",
        ]);
        let search = config.search_config().unwrap();
        assert_eq!(search.action_count, 6);
        assert_eq!(search.discount, 0.5);
        assert_eq!(search.rollout_horizon, 5);
        assert_eq!(search.seed, 3);
        assert_eq!(config.bandit, BanditKind::Linear);
    }

    #[test]
    fn test_cli_rejects_bad_discount() {
        let config = Config::parse_from(["uct_search", "--discount", "1.5"]);
        assert!(config.search_config().is_err());
    }

    #[test]
    fn test_true_best_action() {
        let mut tree = UctNode::new(3);
        assert_eq!(true_best_action(&tree), None);

        let mut reward = |action: usize| if action == 0 { 1.0 } else { 0.0 };
        tree.iterate(&mut reward).unwrap();
        // Only one root action has been visited
        assert_eq!(true_best_action(&tree), None);

        for _ in 0..20 {
            tree.iterate(&mut reward).unwrap();
        }
        assert!(true_best_action(&tree).is_some());
    }
}
