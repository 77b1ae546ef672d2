//! Broadcasting one instruction value across a selection.
//!
//! A field in an update command carries one raw value for the whole
//! selection. The value is split on `,` into parts, and style `i` of `n` gets
//! part `i % parts.len()`:
//!
//! ```rust
//! use restyle::broadcast::expand;
//!
//! assert_eq!(expand("Bold", 3), ["Bold", "Bold", "Bold"]);
//! assert_eq!(expand("Bold, Light", 3), ["Bold", "Light", "Bold"]);
//! assert_eq!(expand("a,b,c", 2), ["a", "b"]);
//! ```
//!
//! An empty part means "no instruction" for that style only.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::convert::parse_number;
use crate::error::ReconcileError;

/// Splits `raw` on commas and fills exactly `n` slots with the parts, cycling.
pub fn expand(raw: &str, n: usize) -> Vec<String> {
    let parts: Vec<String> = raw.split(',').map(|p| p.trim().to_string()).collect();
    std::iter::repeat(parts)
        .take(n)
        .flatten()
        .take(n)
        .collect()
}

/// A raw instruction value as sent by the UI.
///
/// Strings are kept as-is. Numbers and booleans are coerced to their plain
/// text form (`150`, `0.5`, `true`) before splitting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Broadcast(String);

impl Broadcast {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part for the style at `index` of `total`, or `None` when that part
    /// is empty or `index` is out of range.
    pub fn slot(&self, index: usize, total: usize) -> Option<String> {
        expand(&self.0, total)
            .into_iter()
            .nth(index)
            .filter(|part| !part.is_empty())
    }

    /// The numeric part for the style at `index`, or `None` when empty.
    pub fn number(
        &self,
        field: &'static str,
        index: usize,
        total: usize,
    ) -> Result<Option<f64>, ReconcileError> {
        self.slot(index, total)
            .map(|value| {
                parse_number(&value).map_err(|_| ReconcileError::InvalidNumber { field, value })
            })
            .transpose()
    }
}

impl fmt::Display for Broadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Broadcast {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for Broadcast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Broadcast {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BroadcastVisitor;

        impl Visitor<'_> for BroadcastVisitor {
            type Value = Broadcast;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Broadcast, E> {
                Ok(Broadcast::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Broadcast, E> {
                Ok(Broadcast(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Broadcast, E> {
                Ok(Broadcast(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Broadcast, E> {
                Ok(Broadcast(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Broadcast, E> {
                Ok(Broadcast(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Broadcast, E> {
                Ok(Broadcast(v.to_string()))
            }
        }

        deserializer.deserialize_any(BroadcastVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_expand_examples() {
        assert_eq!(expand("a", 1), ["a"]);
        assert_eq!(expand("a,b", 3), ["a", "b", "a"]);
        assert_eq!(expand(" a , b ,c", 5), ["a", "b", "c", "a", "b"]);
        assert!(expand("a,b", 0).is_empty());
    }

    #[test]
    fn test_expand_keeps_empty_parts() {
        assert_eq!(expand("Bold,,Light", 3), ["Bold", "", "Light"]);
        assert_eq!(expand("", 2), ["", ""]);
    }

    #[test]
    fn test_slot_skips_empty_parts() {
        let value = Broadcast::from("Bold,,Light");
        assert_eq!(value.slot(0, 3).as_deref(), Some("Bold"));
        assert_eq!(value.slot(1, 3), None);
        assert_eq!(value.slot(2, 3).as_deref(), Some("Light"));
    }

    #[test]
    fn test_number_slots() {
        let value = Broadcast::from("12, 1.5, x");
        assert_eq!(value.number("fontSize", 0, 3), Ok(Some(12.0)));
        assert_eq!(value.number("fontSize", 1, 3), Ok(Some(1.5)));
        assert_eq!(
            value.number("fontSize", 2, 3),
            Err(ReconcileError::InvalidNumber {
                field: "fontSize",
                value: "x".into()
            })
        );
        assert_eq!(Broadcast::from("").number("fontSize", 0, 1), Ok(None));
    }

    #[test]
    fn test_deserialize_coerces_scalars() {
        let cases = [
            (json!("150%"), "150%"),
            (json!(150), "150"),
            (json!(0.5), "0.5"),
            (json!(-2), "-2"),
            (json!(true), "true"),
        ];
        for (input, expected) in cases {
            let value: Broadcast = serde_json::from_value(input).unwrap();
            assert_eq!(value.as_str(), expected);
        }
        assert!(serde_json::from_value::<Broadcast>(json!(["a"])).is_err());
    }

    proptest! {
        #[test]
        fn expand_always_fills_n(parts in prop::collection::vec("[a-z0-9 ]{0,4}", 1..6), n in 0usize..40) {
            let raw = parts.join(",");
            prop_assert_eq!(expand(&raw, n).len(), n);
        }

        #[test]
        fn expand_matches_modulo_indexing(parts in prop::collection::vec("[a-z0-9]{1,4}", 1..6), n in 1usize..40) {
            let raw = parts.join(",");
            let slots = expand(&raw, n);
            let value = Broadcast::new(raw);
            for (i, slot) in slots.iter().enumerate() {
                prop_assert_eq!(slot, &parts[i % parts.len()]);
                let got = value.slot(i, n);
                prop_assert_eq!(got.as_ref(), Some(slot));
            }
        }
    }
}
