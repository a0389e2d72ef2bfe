#![forbid(unsafe_code)]

//! Error types for the windowed list engine.
//!
//! The windowing math itself is total and never fails. The only errors are
//! construction-time configuration errors (programmer errors, surfaced
//! immediately) and host capability errors (recovered inside the tracker).

use std::fmt;

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Failure to subscribe to a host signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveError {
    /// The host environment has no size-observation mechanism.
    Unavailable,
    /// The host refused the subscription.
    Rejected(String),
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "resize observation unavailable in host"),
            Self::Rejected(reason) => write!(f, "resize observation rejected: {reason}"),
        }
    }
}

impl std::error::Error for ObserveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_names_field_and_value() {
        let err = ConfigError::new("item_height", "0", "must be > 0");
        assert_eq!(err.to_string(), "item_height=0 (must be > 0)");
    }

    #[test]
    fn observe_error_display() {
        assert_eq!(
            ObserveError::Unavailable.to_string(),
            "resize observation unavailable in host"
        );
        assert_eq!(
            ObserveError::Rejected("detached".into()).to_string(),
            "resize observation rejected: detached"
        );
    }
}
