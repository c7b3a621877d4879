//! UCT search tree node
//!
//! A node owns either no children (leaf) or exactly one child per action
//! (internal). The only operation that adds children creates all of them at
//! once, so a partially expanded node cannot exist.
//!
//! One call to [`UctNode::iterate`] runs the four MCTS phases from the node
//! it is called on:
//! - Selection: descend by UCT score until a leaf is reached
//! - Expansion: give that leaf one child per action and step into one
//! - Simulation: bounded random rollout from the new leaf
//! - Backpropagation: fold per-edge rewards and γ into the value on the way
//!   back up, updating visit counts and value sums along the path

use log::trace;

use crate::mcts::hyperparameters::{NodeParams, UctConfig};
use crate::mcts::random::{RandomSource, SeededUniform};
use crate::mcts::reward::RewardSource;
use crate::mcts::rollout::rollout;
use crate::mcts::selection::{argmax_last, expected_value, uct_score};
use crate::Result;

/// A node in the UCT tree
#[derive(Debug)]
pub struct UctNode<R> {
    /// Empty for a leaf, one entry per action otherwise
    children: Vec<UctNode<R>>,

    /// Number of backpropagation passes through this node
    visit_count: u64,

    /// Sum of all discounted values backpropagated through this node
    total_value: f64,

    /// Tree-wide constants, copied into every child
    params: NodeParams,

    /// Tie-break and rollout generator owned by this node
    rng: R,
}

impl UctNode<SeededUniform> {
    /// Creates a root leaf with γ = 0.9, a rollout horizon of 50 and the
    /// default seeded generator.
    ///
    /// # Panics
    /// Panics if `action_count` is zero.
    pub fn new(action_count: usize) -> Self {
        assert!(action_count > 0, "a UCT tree needs at least one action");
        let config = UctConfig::new(action_count);
        match config.node_params() {
            Ok(params) => Self::with_rng(params, SeededUniform::new(config.seed)),
            Err(e) => panic!("default UCT parameters rejected: {e}"),
        }
    }

    /// Creates a root leaf from a validated configuration
    pub fn with_config(config: &UctConfig) -> Result<Self> {
        let params = config.node_params()?;
        Ok(Self::with_rng(params, SeededUniform::new(config.seed)))
    }
}

impl<R> UctNode<R> {
    /// Creates a root leaf with an injected generator
    pub fn with_rng(params: NodeParams, rng: R) -> Self {
        Self {
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            params,
            rng,
        }
    }

    /// True iff no children have been allocated yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn params(&self) -> &NodeParams {
        &self.params
    }

    pub fn action_count(&self) -> usize {
        self.params.action_count()
    }

    pub fn discount(&self) -> f64 {
        self.params.discount()
    }

    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Children in action order; empty for a leaf
    pub fn children(&self) -> &[UctNode<R>] {
        &self.children
    }

    pub fn child(&self, action: usize) -> Option<&UctNode<R>> {
        self.children.get(action)
    }

    /// Mean backpropagated value, `None` while unvisited
    pub fn mean_value(&self) -> Option<f64> {
        if self.visit_count == 0 {
            None
        } else {
            Some(self.total_value / self.visit_count as f64)
        }
    }

    fn update_stats(&mut self, value: f64) {
        self.visit_count += 1;
        self.total_value += value;
    }

    /// Mean value of the child reached by `action`
    ///
    /// # Panics
    /// Panics if this node is a leaf, `action` is out of range, or the child
    /// has never been visited.
    pub fn q_value(&self, action: usize) -> f64 {
        assert!(!self.is_leaf(), "q_value called on a leaf node");
        assert!(
            action < self.params.action_count(),
            "action {} out of range (N = {})",
            action,
            self.params.action_count()
        );
        match self.children[action].mean_value() {
            Some(q) => q,
            None => panic!("q_value of unvisited action {action}"),
        }
    }

    /// Mean value of this node
    ///
    /// # Panics
    /// Panics if the node has never been visited.
    pub fn v_value(&self) -> f64 {
        match self.mean_value() {
            Some(v) => v,
            None => panic!("v_value of an unvisited node"),
        }
    }

    /// Number of nodes in the subtree rooted here, this node included
    pub fn num_of_nodes(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// Depth of the deepest leaf, counted from `parent_depth`: a leaf
    /// contributes `parent_depth + 1`.
    pub fn max_depth(&self, parent_depth: usize) -> usize {
        let mut deepest = parent_depth + 1;
        let mut pending = vec![(self, parent_depth + 1)];
        while let Some((node, depth)) = pending.pop() {
            if node.is_leaf() {
                deepest = deepest.max(depth);
            } else {
                pending.extend(node.children.iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }

    /// `max_depth(0)`
    pub fn depth(&self) -> usize {
        self.max_depth(0)
    }
}

impl<R: RandomSource> UctNode<R> {
    /// Picks the child to descend into by UCT score
    ///
    /// # Panics
    /// Panics if called on a leaf.
    pub(crate) fn select_action(&mut self) -> usize {
        assert!(!self.is_leaf(), "select_action called on a leaf node");
        let parent_visits = self.visit_count;
        let rng = &mut self.rng;
        let scores = self.children.iter().map(|child| {
            uct_score(
                parent_visits,
                child.visit_count,
                child.total_value,
                rng.next_uniform(),
            )
        });
        match argmax_last(scores) {
            Some(action) => action,
            None => panic!("no child has a comparable score"),
        }
    }

    /// Gives a leaf one fresh leaf child per action. No-op on an internal
    /// node.
    pub fn expand(&mut self) {
        if !self.is_leaf() {
            return;
        }
        let n = self.params.action_count();
        trace!("expanding leaf into {} children", n);
        self.children.reserve_exact(n);
        for _ in 0..n {
            let child = Self::with_rng(self.params, self.rng.fork());
            self.children.push(child);
        }
    }

    /// Runs one MCTS iteration with this node as the root.
    ///
    /// Grows the tree by one level along the selected path and updates the
    /// statistics of every node on that path. Errors from the reward source
    /// are returned as-is; statistics are only written once every reward has
    /// been obtained, so a failed call leaves them untouched.
    pub fn iterate<S>(&mut self, source: &mut S) -> std::result::Result<(), S::Error>
    where
        S: RewardSource + ?Sized,
    {
        let discount = self.params.discount();
        let mut path: Vec<usize> = Vec::new();
        let mut rewards: Vec<f64> = vec![0.0];

        let mut node: &mut Self = self;
        while !node.is_leaf() {
            let action = node.select_action();
            node = &mut node.children[action];
            path.push(action);
            rewards.push(source.reward(action)?);
        }

        node.expand();
        let action = node.select_action();
        let leaf = &mut node.children[action];
        path.push(action);
        rewards.push(source.reward(action)?);

        let mut value = rollout(&leaf.params, &mut leaf.rng, source)?;
        trace!("rollout at depth {} returned {:.6}", path.len(), value);

        // backups[i] is the value received by the node at depth i
        let mut backups = vec![0.0; rewards.len()];
        for (backup, reward) in backups.iter_mut().zip(&rewards).rev() {
            value = reward + discount * value;
            *backup = value;
        }

        let mut node: &mut Self = self;
        node.update_stats(backups[0]);
        for (&action, &backup) in path.iter().zip(&backups[1..]) {
            node = &mut node.children[action];
            node.update_stats(backup);
        }
        Ok(())
    }

    /// Current recommendation: the child with the best mean value, without
    /// exploration bonus. A leaf has no information and answers with a
    /// uniformly random action.
    pub fn best_action(&mut self) -> usize {
        if self.is_leaf() {
            return self.rng.next_index(self.params.action_count());
        }
        let rng = &mut self.rng;
        let scores = self
            .children
            .iter()
            .map(|child| expected_value(child.visit_count, child.total_value, rng.next_uniform()));
        match argmax_last(scores) {
            Some(action) => action,
            None => panic!("no child has a comparable score"),
        }
    }
}

impl<R: Clone> UctNode<R> {
    fn copy_stats(&self, children: Vec<UctNode<R>>) -> Self {
        Self {
            children,
            visit_count: self.visit_count,
            total_value: self.total_value,
            params: self.params,
            rng: self.rng.clone(),
        }
    }
}

impl<R: Clone> Clone for UctNode<R> {
    /// Deep copy, built bottom-up with an explicit stack so tree depth does
    /// not translate into call depth.
    fn clone(&self) -> Self {
        let mut pending: Vec<(&Self, bool)> = vec![(self, false)];
        let mut built: Vec<Self> = Vec::new();
        while let Some((node, children_built)) = pending.pop() {
            if children_built || node.is_leaf() {
                let children = built.split_off(built.len() - node.children.len());
                built.push(node.copy_stats(children));
            } else {
                pending.push((node, true));
                pending.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }
        match built.pop() {
            Some(root) => root,
            None => unreachable!("clone always builds the root"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.children.clear();
        self.children.extend(source.children.iter().cloned());
        self.visit_count = source.visit_count;
        self.total_value = source.total_value;
        self.params = source.params;
        self.rng.clone_from(&source.rng);
    }
}

impl<R> Drop for UctNode<R> {
    // Flattens the subtree first: every node is dropped with no children left.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
