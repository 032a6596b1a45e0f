//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a product on the listing page.
///
/// Storefront ids are numeric strings assigned in creation order, which is
/// what the "newest" sort relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, `0` when it isn't a number.
    pub fn numeric(&self) -> u64 {
        self.0.trim().parse().unwrap_or(0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// Product feeds send ids either as strings or as bare numbers.
impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("123");
        assert_eq!(id.as_str(), "123");
        assert_eq!(id.numeric(), 123);
    }

    #[test]
    fn test_non_numeric_id() {
        assert_eq!(ProductId::new("prod-9").numeric(), 0);
        assert_eq!(ProductId::new("").numeric(), 0);
    }

    #[test]
    fn test_id_from_number() {
        let id: ProductId = 42u64.into();
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_id_deserializes_from_number_or_string() {
        let a: ProductId = serde_json::from_str("7").unwrap();
        let b: ProductId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(a, b);
    }
}
