//! Integer storage selection
//!
//! Per FORMAT.md §4.1: one pass for min/max and missingness, then the
//! narrowest rung of the width ladder whose range contains `[min, max]`.
//! With missing values the placeholder is the first of {rung maximum, rung
//! minimum, zero} not present in the data, escalating one rung when all
//! three are taken; at i32 the native marker `i32::MIN` is used with no
//! further search.

use std::collections::HashSet;

use tracing::trace;

use super::types::{ContainerType, Placeholder, StorageEncoding};

/// The width ladder, narrowest first.
pub(super) const INTEGER_LADDER: [ContainerType; 6] = [
    ContainerType::U8,
    ContainerType::I8,
    ContainerType::U16,
    ContainerType::I16,
    ContainerType::U32,
    ContainerType::I32,
];

/// Index of the narrowest rung whose range contains `[min, max]`.
pub(super) fn narrowest_fit(min: i64, max: i64) -> usize {
    INTEGER_LADDER
        .iter()
        .position(|container| {
            // Every rung has a range by construction
            let (lo, hi) = match container.integer_range() {
                Some(range) => range,
                None => return false,
            };
            min >= lo && max <= hi
        })
        .unwrap_or(INTEGER_LADDER.len() - 1)
}

/// Searches ladder rungs `start..end` for an unused max/min/zero sentinel.
pub(super) fn sentinel_search(
    observed: &HashSet<i64>,
    start: usize,
    end: usize,
) -> Option<(ContainerType, i64)> {
    for container in &INTEGER_LADDER[start..end] {
        let (lo, hi) = match container.integer_range() {
            Some(range) => range,
            None => continue,
        };
        for candidate in [hi, lo, 0] {
            if !observed.contains(&candidate) {
                return Some((container.clone(), candidate));
            }
        }
    }
    None
}

/// Selects the smallest exact integer container for the collection.
///
/// Empty and all-missing inputs take u8. The result always round-trips: the
/// placeholder, when present, never equals an observed value.
pub fn optimize_integers(values: &[Option<i32>]) -> StorageEncoding {
    let mut observed: HashSet<i64> = HashSet::new();
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut any_missing = false;

    for value in values {
        match value {
            Some(v) => {
                let v = *v as i64;
                min = min.min(v);
                max = max.max(v);
                observed.insert(v);
            }
            None => any_missing = true,
        }
    }

    let start = if observed.is_empty() {
        0
    } else {
        narrowest_fit(min, max)
    };

    let encoding = if !any_missing {
        StorageEncoding {
            container: INTEGER_LADDER[start].clone(),
            placeholder: None,
        }
    } else {
        // Stop short of i32: the final rung takes the native marker instead
        // of searching.
        match sentinel_search(&observed, start, INTEGER_LADDER.len() - 1) {
            Some((container, sentinel)) => StorageEncoding {
                container,
                placeholder: Some(Placeholder::Integer(sentinel)),
            },
            None => StorageEncoding {
                container: ContainerType::I32,
                placeholder: Some(Placeholder::Integer(i32::MIN as i64)),
            },
        }
    };

    trace!(container = %encoding.container, missing = any_missing, "selected integer storage");
    encoding
}
