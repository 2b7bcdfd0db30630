//! Canonical keys for unordered node pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An unordered node pair stored with the lexicographically smaller label
/// first. Displays and serializes as `"A-B"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    /// Canonical key for the pair `{u, v}`.
    #[must_use]
    pub fn new(u: &str, v: &str) -> Self {
        let (low, high) = if u <= v { (u, v) } else { (v, u) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub fn low(&self) -> &str {
        &self.low
    }

    /// The larger endpoint.
    #[must_use]
    pub fn high(&self) -> &str {
        &self.high
    }

    /// Both endpoints, smaller first.
    #[must_use]
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// `true` when `label` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, label: &str) -> bool {
        self.low == label || self.high == label
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Error returned when a string is not of the form `"U-V"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid edge key {0:?}: expected \"U-V\"")]
pub struct ParseEdgeKeyError(String);

impl FromStr for EdgeKey {
    type Err = ParseEdgeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((u, v)) if !u.is_empty() && !v.is_empty() && !v.contains('-') => {
                Ok(Self::new(u, v))
            }
            _ => Err(ParseEdgeKeyError(s.to_string())),
        }
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
