//! Boolean storage selection
//!
//! Per FORMAT.md §4.4: booleans are always stored as i8 (`0`/`1`), with
//! `-1` standing in for missing values.

use super::types::{ContainerType, Placeholder, StorageEncoding};

/// Selects the boolean container for the collection.
pub fn optimize_booleans(values: &[Option<bool>]) -> StorageEncoding {
    let any_missing = values.iter().any(Option::is_none);

    StorageEncoding {
        container: ContainerType::I8,
        placeholder: any_missing.then_some(Placeholder::Integer(-1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_are_i8() {
        let encoding = optimize_booleans(&[Some(true), Some(false)]);
        assert_eq!(encoding.container, ContainerType::I8);
        assert!(encoding.placeholder.is_none());
    }

    #[test]
    fn test_missing_takes_minus_one() {
        let encoding = optimize_booleans(&[Some(true), None]);
        assert_eq!(encoding.container, ContainerType::I8);
        assert_eq!(encoding.placeholder, Some(Placeholder::Integer(-1)));
    }
}
