use crate::error::PlanError;
use crate::types::Item;

/// Pool size above which the exhaustive search is refused by default.
pub const DEFAULT_MAX_POOL: usize = 24;

/// Hard ceiling for any configured limit; masks are `u64` and 2^32 subsets
/// is already far beyond interactive use.
pub const MAX_ENUMERABLE: usize = 32;

/// Finds the subset of `items` with the largest sum not exceeding `capacity`,
/// using the default scale limit.
pub fn find_closest_subset(items: &[Item], capacity: u32) -> Result<Vec<Item>, PlanError> {
    find_closest_subset_within(items, capacity, DEFAULT_MAX_POOL)
}

/// Exhaustive best-fit search over every subset of `items`.
///
/// Subsets are visited in increasing bitmask order, bit `j` standing for
/// `items[j]`, and a candidate only replaces the current best when its sum is
/// strictly greater. Among equally good subsets the first one visited wins.
/// The returned items keep their relative input order. An empty result means
/// nothing fits.
pub fn find_closest_subset_within(
    items: &[Item],
    capacity: u32,
    max_pool: usize,
) -> Result<Vec<Item>, PlanError> {
    if capacity == 0 {
        return Err(PlanError::InvalidCapacity { capacity: 0 });
    }
    let limit = max_pool.min(MAX_ENUMERABLE);
    let n = items.len();
    if n > limit {
        return Err(PlanError::ScaleLimitExceeded { size: n, limit });
    }

    let target = capacity as u64;
    let mut best: Option<(u64, u64)> = None;

    for mask in 1u64..(1u64 << n) {
        let sum: u64 = (0..n)
            .filter(|&j| mask & (1 << j) != 0)
            .map(|j| items[j].value as u64)
            .sum();
        if sum > target {
            continue;
        }
        if best.is_none_or(|(best_sum, _)| sum > best_sum) {
            best = Some((sum, mask));
            if sum == target {
                break;
            }
        }
    }

    Ok(match best {
        Some((_, mask)) => (0..n)
            .filter(|&j| mask & (1 << j) != 0)
            .map(|j| items[j].clone())
            .collect(),
        None => Vec::new(),
    })
}
