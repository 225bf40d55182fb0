//! Real-number storage selection
//!
//! Per FORMAT.md §4.2: collections that are secretly integral reuse the
//! integer width ladder before falling back to double precision. At double
//! precision the placeholder candidates are NaN (unless NaN occurs as a
//! value), the infinities, and the finite extremes; when all of those occur
//! in the data, adjacent observed values are bisected for an unused
//! representable double.

use std::collections::HashSet;

use tracing::trace;

use super::errors::{EncodingError, EncodingResult};
use super::integer::{narrowest_fit, sentinel_search, INTEGER_LADDER};
use super::types::{ContainerType, Placeholder, StorageEncoding};

/// Selects the smallest exact container for a collection of doubles.
///
/// # Errors
///
/// `PlaceholderExhausted` if even the double-precision bisection finds no
/// unused value; unreachable for any finite set of distinct observed
/// doubles.
pub fn optimize_reals(values: &[Option<f64>]) -> EncodingResult<StorageEncoding> {
    let present: Vec<f64> = values.iter().copied().flatten().collect();
    let any_missing = values.len() != present.len();

    let integral = present
        .iter()
        .all(|v| v.is_finite() && v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64);

    if integral {
        if let Some(encoding) = integral_encoding(&present, any_missing) {
            trace!(container = %encoding.container, "selected integral real storage");
            return Ok(encoding);
        }
    }

    let placeholder = if any_missing {
        match float_placeholder(&present) {
            Some(value) => Some(Placeholder::Real(value)),
            None => {
                return Err(EncodingError::PlaceholderExhausted {
                    container: ContainerType::F64.type_name(),
                })
            }
        }
    } else {
        None
    };

    trace!(missing = any_missing, "selected double-precision storage");
    Ok(StorageEncoding {
        container: ContainerType::F64,
        placeholder,
    })
}

/// Runs the integer ladder over integral doubles.
///
/// Unlike the pure integer path, exhaustion at i32 returns `None` and the
/// caller widens to double precision; doubles have no native integer
/// missing marker to fall back on.
fn integral_encoding(present: &[f64], any_missing: bool) -> Option<StorageEncoding> {
    let observed: HashSet<i64> = present.iter().map(|v| *v as i64).collect();

    let start = if observed.is_empty() {
        0
    } else {
        let min = present.iter().fold(i64::MAX, |acc, v| acc.min(*v as i64));
        let max = present.iter().fold(i64::MIN, |acc, v| acc.max(*v as i64));
        narrowest_fit(min, max)
    };

    if !any_missing {
        return Some(StorageEncoding {
            container: INTEGER_LADDER[start].clone(),
            placeholder: None,
        });
    }

    sentinel_search(&observed, start, INTEGER_LADDER.len()).map(|(container, sentinel)| {
        StorageEncoding {
            container,
            placeholder: Some(Placeholder::Integer(sentinel)),
        }
    })
}

/// Finds an unused double to stand in for "missing."
fn float_placeholder(present: &[f64]) -> Option<f64> {
    // NaN is free whenever the data holds no actual NaN values
    if !present.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }

    for candidate in [f64::INFINITY, f64::NEG_INFINITY, f64::MIN, f64::MAX] {
        if !present.iter().any(|v| *v == candidate) {
            return Some(candidate);
        }
    }

    // Bisect adjacent observed values; doubles are dense enough that some
    // unused midpoint exists for any finite set of distinct values
    let mut finite: Vec<f64> = present.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(|a, b| a.total_cmp(b));
    finite.dedup();

    for pair in finite.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let mid = a / 2.0 + b / 2.0;
        if a < mid && mid < b {
            return Some(mid);
        }
    }

    None
}
