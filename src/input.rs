//! Turns raw user input into validated [`Item`]s.

use crate::error::InputError;
use crate::types::Item;

pub fn parse_length(s: &str) -> Result<u32, InputError> {
    match s.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(InputError::InvalidLength(s.to_string())),
    }
}

/// Parses `LENGTH` or `LABEL=LENGTH`. Unlabelled items are named after their
/// position.
pub fn parse_item(index: usize, s: &str) -> Result<Item, InputError> {
    match s.split_once('=') {
        Some((label, length)) => {
            let label = label.trim();
            if label.is_empty() {
                return Err(InputError::InvalidItem(s.to_string()));
            }
            Ok(Item::labelled(index, label, parse_length(length)?))
        }
        None => Ok(Item::new(index, parse_length(s)?)),
    }
}

pub fn parse_items<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Item>, InputError> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| parse_item(i, s.as_ref()))
        .collect()
}

/// Rejects the whole input if any node is longer than `max`, naming all of
/// them.
pub fn check_bounds(items: &[Item], max: u32) -> Result<(), InputError> {
    let labels: Vec<String> = items
        .iter()
        .filter(|it| it.value > max)
        .map(|it| it.label.clone())
        .collect();
    if labels.is_empty() {
        Ok(())
    } else {
        Err(InputError::OutOfBounds { labels, max })
    }
}
