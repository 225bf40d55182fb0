//! Storage-Encoding Selection Tests
//!
//! Scenario coverage for the container-type ladder and sentinel search:
//! - narrowest exact container wins
//! - sentinels are never observed values
//! - escalation when a rung's sentinels are all taken
//! - text width covers both data and placeholder

use objdir::encoding::{
    optimize_booleans, optimize_integers, optimize_reals, optimize_text, ContainerType,
    EncodingError, Placeholder, TextEncoding,
};

// =============================================================================
// Integer ladder
// =============================================================================

/// A full byte range with one value missing keeps u8 and reclaims the
/// unused maximum as the sentinel.
#[test]
fn test_byte_range_with_one_missing_stays_u8() {
    let mut values: Vec<Option<i32>> = (0..=254).map(Some).collect();
    values.push(None);

    let encoding = optimize_integers(&values);
    assert_eq!(encoding.container, ContainerType::U8);
    assert_eq!(encoding.placeholder, Some(Placeholder::Integer(255)));
}

/// Adding a real 255 back occupies every u8 sentinel, forcing u16 with the
/// u16 maximum as the sentinel.
#[test]
fn test_full_byte_range_with_missing_escalates_to_u16() {
    let mut values: Vec<Option<i32>> = (0..=255).map(Some).collect();
    values.push(None);

    let encoding = optimize_integers(&values);
    assert_eq!(encoding.container, ContainerType::U16);
    assert_eq!(encoding.placeholder, Some(Placeholder::Integer(65_535)));
}

/// Without missing values, no rung narrower than the returned one holds the
/// observed range.
#[test]
fn test_no_narrower_rung_would_suffice() {
    let cases: [(&[i32], ContainerType); 4] = [
        (&[0, 200], ContainerType::U8),
        (&[-100, 100], ContainerType::I8),
        (&[0, 40_000], ContainerType::U16),
        (&[-40_000, 0], ContainerType::I32),
    ];

    for (values, expected) in cases {
        let values: Vec<Option<i32>> = values.iter().copied().map(Some).collect();
        let encoding = optimize_integers(&values);
        assert_eq!(encoding.container, expected, "for {:?}", values);
        assert!(encoding.placeholder.is_none());
    }
}

/// The final rung never searches: i32 with missing values takes the native
/// marker.
#[test]
fn test_i32_rung_takes_native_marker() {
    let values = vec![Some(-40_000), Some(i32::MAX), Some(0), None];

    let encoding = optimize_integers(&values);
    assert_eq!(encoding.container, ContainerType::I32);
    assert_eq!(
        encoding.placeholder,
        Some(Placeholder::Integer(i32::MIN as i64))
    );
}

// =============================================================================
// Real-number ladder
// =============================================================================

/// Integral doubles within i32 range reuse the integer ladder.
#[test]
fn test_integral_doubles_take_integer_containers() {
    let values: Vec<Option<f64>> = vec![Some(0.0), Some(42.0), Some(255.0)];
    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(encoding.container, ContainerType::U8);
}

/// A fractional value anywhere forces double precision.
#[test]
fn test_fraction_forces_doubles() {
    let values: Vec<Option<f64>> = vec![Some(0.0), Some(42.5)];
    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(encoding.container, ContainerType::F64);
}

/// Missing values in a clean double collection take NaN as the sentinel.
#[test]
fn test_double_missing_takes_nan_first() {
    let values: Vec<Option<f64>> = vec![Some(0.5), None];
    let encoding = optimize_reals(&values).unwrap();
    let Some(Placeholder::Real(sentinel)) = encoding.placeholder else {
        panic!("expected a real placeholder");
    };
    assert!(sentinel.is_nan());
}

/// When NaN occurs as an actual value the sentinel walks the candidate
/// order: +inf, -inf, lowest finite, highest finite.
#[test]
fn test_double_sentinel_candidate_order() {
    let mut values: Vec<Option<f64>> = vec![Some(0.5), Some(f64::NAN), None];
    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(encoding.placeholder, Some(Placeholder::Real(f64::INFINITY)));

    values.push(Some(f64::INFINITY));
    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(
        encoding.placeholder,
        Some(Placeholder::Real(f64::NEG_INFINITY))
    );

    values.push(Some(f64::NEG_INFINITY));
    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(encoding.placeholder, Some(Placeholder::Real(f64::MIN)));
}

/// With every named candidate observed, bisection finds an unused double
/// strictly between two adjacent observed values.
#[test]
fn test_double_sentinel_bisection() {
    let values: Vec<Option<f64>> = vec![
        Some(1.0e10),
        Some(2.0e10),
        Some(f64::NAN),
        Some(f64::INFINITY),
        Some(f64::NEG_INFINITY),
        Some(f64::MIN),
        Some(f64::MAX),
        None,
    ];

    let encoding = optimize_reals(&values).unwrap();
    assert_eq!(encoding.container, ContainerType::F64);
    let Some(Placeholder::Real(sentinel)) = encoding.placeholder else {
        panic!("expected a real placeholder");
    };
    assert!(sentinel.is_finite());
    assert!(!values.iter().flatten().any(|v| *v == sentinel));
}

// =============================================================================
// Text
// =============================================================================

/// Buffer width is the longer of the longest observed value and the chosen
/// placeholder.
#[test]
fn test_text_width_covers_data_and_placeholder() {
    let values = vec![Some("a"), None];
    let encoding = optimize_text(&values, TextEncoding::Ascii).unwrap();
    assert_eq!(
        encoding.container,
        ContainerType::Text {
            width: 2,
            encoding: TextEncoding::Ascii
        }
    );

    let values = vec![Some("abcdefgh"), None];
    let encoding = optimize_text(&values, TextEncoding::Ascii).unwrap();
    assert_eq!(
        encoding.container,
        ContainerType::Text {
            width: 8,
            encoding: TextEncoding::Ascii
        }
    );
}

/// The placeholder grows one underscore per collision until unused.
#[test]
fn test_text_placeholder_escapes_collisions() {
    let values = vec![Some("NA"), Some("_NA"), Some("__NA"), None];
    let encoding = optimize_text(&values, TextEncoding::Utf8).unwrap();
    assert_eq!(
        encoding.placeholder,
        Some(Placeholder::Text("___NA".into()))
    );
    assert_eq!(
        encoding.container,
        ContainerType::Text {
            width: 5,
            encoding: TextEncoding::Utf8
        }
    );
}

/// A declared character set outside ASCII/UTF-8 is rejected before any
/// width computation.
#[test]
fn test_unsupported_character_set_rejected() {
    let err = TextEncoding::from_tag("latin1").unwrap_err();
    assert!(matches!(err, EncodingError::UnsupportedTextEncoding { .. }));
}

// =============================================================================
// Booleans
// =============================================================================

#[test]
fn test_booleans_always_i8_with_minus_one_sentinel() {
    let encoding = optimize_booleans(&[Some(true), Some(false)]);
    assert_eq!(encoding.container, ContainerType::I8);
    assert!(encoding.placeholder.is_none());

    let encoding = optimize_booleans(&[Some(true), None, Some(false)]);
    assert_eq!(encoding.placeholder, Some(Placeholder::Integer(-1)));
}
