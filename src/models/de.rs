//! Field-level deserialization helpers.
//!
//! The collection job occasionally writes `null` where a value is expected.
//! These helpers let a single bad field fall back to its default instead of
//! rejecting the whole document.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
    }

    #[test]
    fn test_null_and_missing_fall_back() {
        let sample: Sample = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_present_values_kept() {
        let sample: Sample = serde_json::from_str(r#"{"name": "a", "count": 3}"#).unwrap();
        assert_eq!(sample.name, "a");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn test_wrong_type_still_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"count": "three"}"#).is_err());
    }
}
