#![forbid(unsafe_code)]

//! Windowed list configuration.
//!
//! [`WindowConfig`] holds the three tuning knobs exposed to the host
//! application. Values can come from code (builder methods), from JSON options
//! passed by the host (`serde` feature, camelCase field names), or from
//! environment overrides via [`WindowConfig::from_env`].
//!
//! # Environment variables
//!
//! | Variable | Field | Expected |
//! |----------|-------|----------|
//! | `TALLY_LIST_ITEM_HEIGHT` | `item_height` | finite px > 0 |
//! | `TALLY_LIST_OVERSCAN` | `overscan` | row count |
//! | `TALLY_LIST_CONTAINER_HEIGHT` | `container_height` | finite px > 0 |
//!
//! Unparseable or out-of-domain values are reported in
//! [`WindowConfigParse::errors`] and the default is kept.

use std::env;

use crate::error::ConfigError;

/// Default row height in pixels.
pub const DEFAULT_ITEM_HEIGHT: f64 = 60.0;
/// Default overscan in rows, applied on each side of the visible region.
pub const DEFAULT_OVERSCAN: usize = 5;
/// Default viewport height in pixels, used until the container is measured.
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 600.0;

const ENV_ITEM_HEIGHT: &str = "TALLY_LIST_ITEM_HEIGHT";
const ENV_OVERSCAN: &str = "TALLY_LIST_OVERSCAN";
const ENV_CONTAINER_HEIGHT: &str = "TALLY_LIST_CONTAINER_HEIGHT";

/// Tuning knobs for a windowed list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct WindowConfig {
    /// Fixed height of every row, in pixels.
    pub item_height: f64,

    /// Extra rows rendered above and below the visible region to reduce
    /// blank flashes during fast scrolling.
    pub overscan: usize,

    /// Viewport height used before the container has been measured, and
    /// permanently when the host cannot observe size changes.
    pub container_height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            container_height: DEFAULT_CONTAINER_HEIGHT,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct WindowConfigParse {
    pub config: WindowConfig,
    pub errors: Vec<ConfigError>,
}

impl WindowConfig {
    /// Set the row height.
    #[must_use]
    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    /// Set the overscan row count.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Set the default container height.
    #[must_use]
    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> WindowConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> WindowConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_extent("item_height", self.item_height, &mut errors);
        validate_extent("container_height", self.container_height, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and return the first violation, if any.
    ///
    /// Used at construction time, where a malformed config is a programmer
    /// error and should fail fast.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(mut errors) => Err(errors.swap_remove(0)),
        }
    }
}

fn from_env_with<F>(mut get: F) -> WindowConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = WindowConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_ITEM_HEIGHT) {
        match parse_extent(&value) {
            Some(parsed) => config.item_height = parsed,
            None => errors.push(ConfigError::new(
                "item_height",
                value,
                "expected finite px > 0",
            )),
        }
    }

    if let Some(value) = get(ENV_OVERSCAN) {
        match parse_usize(&value) {
            Some(parsed) => config.overscan = parsed,
            None => errors.push(ConfigError::new(
                "overscan",
                value,
                "expected non-negative row count",
            )),
        }
    }

    if let Some(value) = get(ENV_CONTAINER_HEIGHT) {
        match parse_extent(&value) {
            Some(parsed) => config.container_height = parsed,
            None => errors.push(ConfigError::new(
                "container_height",
                value,
                "expected finite px > 0",
            )),
        }
    }

    #[cfg(feature = "tracing")]
    for err in &errors {
        tracing::warn!(field = err.field, value = %err.value, "rejected list config override");
    }

    WindowConfigParse { config, errors }
}

#[inline]
fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

#[inline]
fn parse_extent(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
    trimmed
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px > 0.0)
}

fn validate_extent(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ConfigError::new(
            field,
            value.to_string(),
            "must be finite and > 0",
        ));
    }
}
