#![forbid(unsafe_code)]

//! JSON glue between the JS host and the list engine.
//!
//! The frontend passes list options as a JSON string
//! (`{"itemHeight": 60, "overscan": 5, "containerHeight": 600}`, every field
//! optional) and reads window snapshots back as JSON. Both directions are
//! plain Rust so they are testable off-wasm.

use std::fmt;

use serde::Serialize;
use tally_virtual::{ConfigError, WindowConfig};

/// Failure to turn host options into a usable config.
#[derive(Debug)]
pub enum OptionsError {
    /// The options string is not valid JSON for [`WindowConfig`].
    Json(serde_json::Error),
    /// The options parsed but violate a config constraint.
    Invalid(ConfigError),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid list options: {err}"),
            Self::Invalid(err) => write!(f, "invalid list options: {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Parse host options. `None` or an empty string yields the defaults.
pub fn config_from_json(options: Option<&str>) -> Result<WindowConfig, OptionsError> {
    let config = match options.map(str::trim) {
        None | Some("") => WindowConfig::default(),
        Some(json) => serde_json::from_str::<WindowConfig>(json).map_err(OptionsError::Json)?,
    };
    config.check().map_err(OptionsError::Invalid)?;
    Ok(config)
}

/// What the JS side needs to lay out one frame of the list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub start_index: usize,
    pub end_index: usize,
    pub total_height: f64,
    pub item_height: f64,
    pub scroll_offset: f64,
    pub viewport_height: f64,
}

impl WindowSnapshot {
    /// Encode as JSON for the host.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Only numbers; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_options_use_defaults() {
        assert_eq!(config_from_json(None).unwrap(), WindowConfig::default());
        assert_eq!(config_from_json(Some("  ")).unwrap(), WindowConfig::default());
    }

    #[test]
    fn partial_options_merge_with_defaults() {
        let config = config_from_json(Some(r#"{"itemHeight": 48}"#)).unwrap();
        assert_eq!(config, WindowConfig::default().with_item_height(48.0));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = config_from_json(Some("{itemHeight: 48")).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
        assert!(err.to_string().starts_with("invalid list options:"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from_json(Some(r#"{"itemHeight": -1}"#)).unwrap_err();
        match err {
            OptionsError::Invalid(inner) => assert_eq!(inner.field, "item_height"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn snapshot_json_is_camel_case() {
        let snapshot = WindowSnapshot {
            start_index: 45,
            end_index: 65,
            total_height: 60_000.0,
            item_height: 60.0,
            scroll_offset: 3000.0,
            viewport_height: 600.0,
        };
        assert_eq!(
            snapshot.to_json(),
            r#"{"startIndex":45,"endIndex":65,"totalHeight":60000.0,"itemHeight":60.0,"scrollOffset":3000.0,"viewportHeight":600.0}"#
        );
    }
}
