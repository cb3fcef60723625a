//! Constant namespaces shared across the crate to avoid hardcoding strings.

/// Environment variable names.
pub mod env {
    /// Preferred credential variable; takes priority over [`OPENAI_API_KEY`].
    pub const API_KEY: &str = "PROMPTDECK_API_KEY";
    /// Standard OpenAI credential variable, honored as a fallback.
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Override for the catalog endpoint base URL.
    pub const BASE_URL: &str = "OPENAI_BASE_URL";
}

/// URL constants for API endpoints.
pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
}

/// Model catalog policy data: fallback ids and exclusion defaults.
///
/// These are policy, not logic: the store accepts a custom
/// [`ExclusionPolicy`](crate::ExclusionPolicy) when the defaults do not fit.
pub mod models {
    /// Always-available model ids, returned even when the remote catalog is
    /// unreachable. Order is the order they appear in pickers.
    pub const FALLBACK_MODELS: &[&str] = &[
        "gpt-4o",
        "gpt-4o-mini",
        "gpt-4.1",
        "gpt-4.1-mini",
        "o4-mini",
    ];

    /// Retired ids some accounts still see in `/models` responses.
    pub const DEPRECATED_MODELS: &[&str] = &[
        "gpt-3.5-turbo-0301",
        "gpt-4-0314",
        "gpt-4-32k-0314",
        "text-davinci-003",
        "text-davinci-002",
    ];

    /// Fine-tuned derivatives are account-specific and never listed.
    pub const FINE_TUNE_PATTERN: &str = "^ft:";
}

/// Reasoning effort configuration constants.
pub mod reasoning {
    pub const LOW: &str = "low";
    pub const MEDIUM: &str = "medium";
    pub const HIGH: &str = "high";

    /// Allowed values for the `effort` setting, for validation and messaging.
    pub const ALLOWED_LEVELS: &[&str] = &[LOW, MEDIUM, HIGH];
}
