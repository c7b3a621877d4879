//! Integration tests for the UCT search library public API

use uct_search::{
    TreeSummary, UctConfig, UctError, UctNode, Result, DESCRIPTION, NAME, VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "uct_search");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let err = UctError::InvalidActionCount(0);
    assert!(matches!(err, UctError::InvalidActionCount(0)));
    assert_eq!(err.to_string(), "Action count must be at least 1, got 0");

    let err = UctError::InvalidDiscount(1.5);
    assert!(err.to_string().contains("1.5"));
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert!(success.is_ok());

    let failure: Result<UctNode<_>> = UctNode::with_config(&UctConfig::new(0));
    assert!(matches!(failure, Err(UctError::InvalidActionCount(0))));
}

#[test]
fn test_summary_after_search() {
    let mut tree = UctNode::with_config(&UctConfig::new(3).with_rollout_horizon(5)).unwrap();
    let mut reward = |action: usize| action as f64 / 2.0;
    for _ in 0..12 {
        tree.iterate(&mut reward).unwrap();
    }

    let summary = TreeSummary::of(&tree);
    assert_eq!(summary.visits, 12);
    assert_eq!(summary.nodes, 1 + 3 * 12);
    assert_eq!(summary.children.len(), 3);
    assert_eq!(
        summary.children.iter().map(|c| c.visits).sum::<u64>(),
        12
    );

    let text = tree.to_string();
    assert!(text.starts_with("[V="));
    assert!(text.contains("Q0="));
    assert!(text.contains("Q2="));
}
