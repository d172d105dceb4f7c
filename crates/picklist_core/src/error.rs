//! Core error types

use thiserror::Error;

/// Errors raised while resolving options or loading settings
#[derive(Error, Debug)]
pub enum PicklistError {
    /// An option value has no usable key strategy.
    ///
    /// This is a wiring defect in the caller's configuration, surfaced at the
    /// first resolution with real data. It is never retried or swallowed.
    #[error("unresolvable option key for {value}: {reason}")]
    UnresolvableKey {
        /// Debug rendering of the offending value
        value: String,
        /// Why no key could be derived
        reason: UnresolvableReason,
    },

    /// Settings could not be parsed
    #[error("invalid dropdown settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("failed to encode dropdown settings: {0}")]
    SettingsEncode(#[from] toml::ser::Error),
}

impl PicklistError {
    /// Whether this is an [`PicklistError::UnresolvableKey`] fault
    pub fn is_unresolvable_key(&self) -> bool {
        matches!(self, PicklistError::UnresolvableKey { .. })
    }
}

/// Diagnostic attached to [`PicklistError::UnresolvableKey`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// No explicit strategy was given and the value exposes neither a key
    /// capability nor a string/number representation
    #[error(
        "value is neither a string nor a number; provide an option key strategy \
         or implement `OptionValue::key` for the value type"
    )]
    NoStrategy,

    /// The configured accessor does not name a field present on the value
    #[error("accessor `{0}` is not present on the value")]
    MissingField(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, PicklistError>;
