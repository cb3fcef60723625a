//! Common settings types shared across the crate.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::constants::reasoning;

/// Requested computation intensity for a model.
///
/// This is a closed set: anything outside `low`/`medium`/`high` fails to
/// parse and callers are expected to keep whatever value they already had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    /// Low reasoning effort.
    Low,
    /// Medium reasoning effort.
    Medium,
    /// High reasoning effort.
    High,
}

impl EffortLevel {
    /// Return the textual representation expected by downstream APIs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => reasoning::LOW,
            Self::Medium => reasoning::MEDIUM,
            Self::High => reasoning::HIGH,
        }
    }

    /// Attempt to parse an effort level from user input.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        if normalized.eq_ignore_ascii_case(reasoning::LOW) {
            Some(Self::Low)
        } else if normalized.eq_ignore_ascii_case(reasoning::MEDIUM) {
            Some(Self::Medium)
        } else if normalized.eq_ignore_ascii_case(reasoning::HIGH) {
            Some(Self::High)
        } else {
            None
        }
    }

    /// Enumerate the allowed configuration values for validation and messaging.
    pub fn allowed_values() -> &'static [&'static str] {
        reasoning::ALLOWED_LEVELS
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EffortLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown effort level '{raw}', expected one of {:?}",
                Self::allowed_values()
            ))
        })
    }
}
