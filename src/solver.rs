use std::collections::HashSet;

use crate::error::PlanError;
use crate::subset::{DEFAULT_MAX_POOL, find_closest_subset_within};
use crate::types::{Group, Item, Plan};

/// Splits a whole input into groups with [`Solver`] defaults.
pub fn partition_into_groups(items: &[Item], capacity: u32) -> Result<Plan, PlanError> {
    Solver::new(capacity, items.to_vec()).solve()
}

pub struct Solver {
    capacity: u32,
    max_pool: usize,
    items: Vec<Item>,
}

impl Solver {
    pub fn new(capacity: u32, items: Vec<Item>) -> Self {
        Self {
            capacity,
            max_pool: DEFAULT_MAX_POOL,
            items,
        }
    }

    pub fn with_max_pool(mut self, max_pool: usize) -> Self {
        self.max_pool = max_pool;
        self
    }

    /// Repeatedly takes the best-fitting subset of what is left until every
    /// item belongs to a group. Either every item ends up in exactly one
    /// group or an error is returned and no groups at all.
    pub fn solve(&self) -> Result<Plan, PlanError> {
        if self.capacity == 0 {
            return Err(PlanError::InvalidCapacity { capacity: 0 });
        }

        let mut pool = self.items.clone();
        let mut groups = Vec::new();

        while !pool.is_empty() {
            let subset = find_closest_subset_within(&pool, self.capacity, self.max_pool)
                .inspect_err(|e| tracing::warn!(remaining = pool.len(), "{e}"))?;

            if subset.is_empty() {
                return Err(self.stuck(pool));
            }

            let taken: HashSet<usize> = subset.iter().map(|it| it.index).collect();
            pool.retain(|it| !taken.contains(&it.index));

            let group = Group::new(groups.len() + 1, subset);
            tracing::debug!(
                id = group.id,
                items = group.items.len(),
                sum = group.sum,
                remaining = pool.len(),
                "group formed"
            );
            groups.push(group);
        }

        Ok(Plan {
            groups,
            capacity: self.capacity,
        })
    }

    fn stuck(&self, pool: Vec<Item>) -> PlanError {
        let items: Vec<Item> = pool
            .into_iter()
            .filter(|it| it.value > self.capacity)
            .collect();
        tracing::warn!(count = items.len(), capacity = self.capacity, "items exceed capacity");
        PlanError::OversizedItem {
            items,
            capacity: self.capacity,
        }
    }
}
