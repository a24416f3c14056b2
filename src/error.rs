use thiserror::Error;

use crate::types::Item;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("capacity must be positive, got {capacity}")]
    InvalidCapacity { capacity: i64 },

    #[error("{} cannot be placed: longer than capacity {capacity}", join_items(.items))]
    OversizedItem { items: Vec<Item>, capacity: u32 },

    #[error("{size} items left to place, exhaustive search is limited to {limit}")]
    ScaleLimitExceeded { size: usize, limit: usize },
}

fn join_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|it| it.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rejections from the input collection layer, before any planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid length '{0}', expected a positive whole number")]
    InvalidLength(String),

    #[error("invalid item '{0}', expected LENGTH or LABEL=LENGTH")]
    InvalidItem(String),

    #[error("the following nodes are out of bounds (max {max}): {}", .labels.join(", "))]
    OutOfBounds { labels: Vec<String>, max: u32 },
}
