use serde::Serialize;

/// A measured cable length together with the node it was measured for.
///
/// `index` is the position in the original input and is the item's identity:
/// two items with the same value are still different items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub index: usize,
    pub label: String,
    pub value: u32,
}

impl Item {
    pub fn new(index: usize, value: u32) -> Self {
        Self {
            index,
            label: format!("Node {}", index + 1),
            value,
        }
    }

    pub fn labelled(index: usize, label: impl Into<String>, value: u32) -> Self {
        Self {
            index,
            label: label.into(),
            value,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

pub fn items_from_lengths(lengths: &[u32]) -> Vec<Item> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, &v)| Item::new(i, v))
        .collect()
}

pub fn sum_of(items: &[Item]) -> u64 {
    items.iter().map(|it| it.value as u64).sum()
}

/// One spool's worth of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: usize,
    pub items: Vec<Item>,
    pub sum: u64,
}

impl Group {
    pub fn new(id: usize, items: Vec<Item>) -> Self {
        let sum = sum_of(&items);
        Self { id, items, sum }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|it| it.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<u32> {
        self.items.iter().map(|it| it.value).collect()
    }

    pub fn waste(&self, capacity: u32) -> u64 {
        (capacity as u64).saturating_sub(self.sum)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub groups: Vec<Group>,
    pub capacity: u32,
}

impl Plan {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_length(&self) -> u64 {
        self.groups.iter().map(|g| g.sum).sum()
    }

    pub fn total_waste(&self) -> u64 {
        self.groups.iter().map(|g| g.waste(self.capacity)).sum()
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock = self.capacity as u64 * self.groups.len() as u64;
        if total_stock == 0 {
            return 0.0;
        }
        self.total_waste() as f64 / total_stock as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_are_one_based() {
        let items = items_from_lengths(&[10, 20]);
        assert_eq!(items[0].label, "Node 1");
        assert_eq!(items[1].label, "Node 2");
        assert_eq!(items[1].index, 1);
    }

    #[test]
    fn test_items_with_equal_values_stay_distinct() {
        let items = items_from_lengths(&[50, 50]);
        assert_ne!(items[0], items[1]);
    }

    #[test]
    fn test_waste_percent() {
        let plan = Plan {
            groups: vec![
                Group::new(1, items_from_lengths(&[100])),
                Group::new(2, items_from_lengths(&[200])),
            ],
            capacity: 200,
        };
        assert_eq!(plan.total_length(), 300);
        assert_eq!(plan.total_waste(), 100);
        assert!((plan.total_waste_percent() - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_plan_has_no_waste() {
        let plan = Plan {
            groups: vec![],
            capacity: 305,
        };
        assert_eq!(plan.group_count(), 0);
        assert_eq!(plan.total_waste_percent(), 0.0);
    }
}
