//! Catalog exclusion policy and fallback merging.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::constants::models;

static DEFAULT_FINE_TUNE: Lazy<Regex> =
    Lazy::new(|| Regex::new(models::FINE_TUNE_PATTERN).expect("fine-tune pattern is valid"));

/// Decides which remote ids are allowed into the merged model list.
///
/// The rules are policy data: the defaults come from
/// [`config::constants::models`](crate::config::constants::models) but a
/// custom pattern and deprecated set can be supplied.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    fine_tune: Regex,
    deprecated: HashSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            fine_tune: DEFAULT_FINE_TUNE.clone(),
            deprecated: models::DEPRECATED_MODELS
                .iter()
                .map(|id| (*id).to_string())
                .collect(),
        }
    }
}

impl ExclusionPolicy {
    /// Build a policy with a custom fine-tune pattern and deprecated set.
    pub fn new(fine_tune: Regex, deprecated: impl IntoIterator<Item = String>) -> Self {
        Self {
            fine_tune,
            deprecated: deprecated.into_iter().collect(),
        }
    }

    /// Whether an id survives the exclusion rules.
    pub fn allows(&self, id: &str) -> bool {
        !self.fine_tune.is_match(id) && !self.deprecated.contains(id)
    }

    /// Union the filtered remote ids with the fallback list.
    ///
    /// Fallback ids come first in their fixed order, then remote ids in
    /// response order; duplicates are dropped. The result is always a
    /// superset of the fallback list.
    pub fn merge_with_fallbacks(&self, remote: &[String]) -> Vec<String> {
        let mut merged = fallback_models();
        let mut seen: HashSet<String> = merged.iter().cloned().collect();

        for id in remote {
            if !self.allows(id) {
                continue;
            }
            if seen.insert(id.clone()) {
                merged.push(id.clone());
            }
        }

        merged
    }
}

/// The fallback list on its own, as owned strings.
pub fn fallback_models() -> Vec<String> {
    models::FALLBACK_MODELS
        .iter()
        .map(|id| (*id).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_drops_fine_tunes_and_deprecated_ids() {
        let policy = ExclusionPolicy::default();
        assert!(policy.allows("gpt-zeta"));
        assert!(!policy.allows("ft:gpt-4o:acme::abc123"));
        assert!(!policy.allows("gpt-4-0314"));
    }

    #[test]
    fn merge_keeps_fallbacks_first_and_dedupes() {
        let policy = ExclusionPolicy::default();
        let remote = vec![
            "gpt-zeta".to_string(),
            "gpt-4o".to_string(),
            "ft:skip-me".to_string(),
            "gpt-zeta".to_string(),
        ];

        let merged = policy.merge_with_fallbacks(&remote);

        assert_eq!(&merged[..crate::config::constants::models::FALLBACK_MODELS.len()],
            fallback_models().as_slice());
        assert_eq!(merged.iter().filter(|id| *id == "gpt-zeta").count(), 1);
        assert_eq!(merged.iter().filter(|id| *id == "gpt-4o").count(), 1);
        assert!(!merged.iter().any(|id| id.starts_with("ft:")));
    }

    #[test]
    fn custom_policy_overrides_the_defaults() {
        let policy = ExclusionPolicy::new(
            Regex::new("^legacy-").expect("valid pattern"),
            ["retired-model".to_string()],
        );
        assert!(policy.allows("ft:now-allowed"));
        assert!(!policy.allows("legacy-chat"));
        assert!(!policy.allows("retired-model"));
    }
}
