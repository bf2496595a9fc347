//! Data model for volume claims and placed volumes.
//!
//! A [`VolumeClaim`] is created sparse by the caller and enriched in place by
//! the pipeline stages. The label map is the only channel stages use to hand
//! values forward, and [`Labels::set_if_absent`] is the single primitive that
//! enforces the set-once rule for every stage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Ordered string-to-string label map with set-once semantics.
///
/// A key holding an empty string counts as unset: stages treat it exactly
/// like a missing key, so providers cannot be blocked by a blank value an
/// earlier layer left behind.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    /// Creates an empty label map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true when `key` holds a non-empty value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }

    /// Sets `key` to `value` unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets `key` to `value` only when the key is unset or empty.
    ///
    /// Returns true when the value was written. Every merge and assignment
    /// stage goes through this method so the no-overwrite invariant is
    /// enforced in one place.
    pub fn set_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let owned_key = key.into();
        if self.is_set(&owned_key) {
            return false;
        }
        self.0.insert(owned_key, value.into());
        true
    }

    /// Iterates over all key/value pairs in key order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries, including empty-valued ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the map holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raised when a quantity string cannot be parsed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid quantity '{0}'")]
pub struct ParseQuantityError(
    /// The text that failed to parse.
    pub String,
);

/// A requested size: numeric value plus a unit suffix such as `Gi`.
///
/// Quantities render and parse as the familiar compact form (`10Gi`,
/// `512Mi`). The pipeline only ever copies them and checks their sign; unit
/// arithmetic belongs to the orchestration backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quantity {
    /// Numeric component. May be non-positive on input; the defaulting stage
    /// rejects non-positive base sizes.
    pub value: i64,
    /// Unit suffix, possibly empty (plain byte count).
    pub unit: String,
}

impl Quantity {
    /// Creates a quantity from a value and unit suffix.
    #[must_use]
    pub fn new(value: i64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Returns true when the value is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.value > 0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let digits_end = trimmed
            .char_indices()
            .find(|&(index, ch)| !(ch.is_ascii_digit() || (index == 0 && ch == '-')))
            .map_or(trimmed.len(), |(index, _)| index);
        let (digits, unit) = trimmed.split_at(digits_end);
        let value = digits
            .parse::<i64>()
            .map_err(|_| ParseQuantityError(text.to_owned()))?;
        Ok(Self::new(value, unit))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A request for network-attached replicated storage.
///
/// Claims arrive sparse from the orchestration layer and are filled in by
/// the pipeline; once a label carries a non-empty value no later stage may
/// change it. Each claim is owned exclusively by one provisioning call.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolumeClaim {
    /// Caller-chosen name for the volume.
    #[serde(default)]
    pub name: String,
    /// Label map through which all stages communicate.
    #[serde(default)]
    pub labels: Labels,
    /// Requested sizes keyed by dimension (`storage`, `frontend-size`, ...).
    #[serde(default)]
    pub requested_sizes: BTreeMap<String, Quantity>,
}

impl VolumeClaim {
    /// Creates a claim with empty labels and no requested sizes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
            requested_sizes: BTreeMap::new(),
        }
    }

    /// Adds a label, replacing any existing value for the key.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.set(key, value);
        self
    }

    /// Adds a requested size for the given dimension.
    #[must_use]
    pub fn with_request(mut self, dimension: impl Into<String>, quantity: Quantity) -> Self {
        self.requested_sizes.insert(dimension.into(), quantity);
        self
    }
}

/// A volume as reported by the orchestration backend.
///
/// Opaque to the pipeline beyond being the result of placement and the
/// subject of describe and removal calls.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Volume {
    /// Backend-assigned volume name.
    pub name: String,
    /// Labels the backend recorded for the volume.
    #[serde(default)]
    pub labels: Labels,
}
