#![forbid(unsafe_code)]

//! Windowed list engine for Tally's transaction tables.
//!
//! # Role in Tally
//! `tally-virtual` keeps long lists (thousands of transactions, budget lines,
//! goal contributions) cheap to display. Given fixed-height rows and a
//! viewport, it decides which rows exist in the render tree and where each one
//! sits. The host UI only ever realizes a small, bounded slice.
//!
//! # Primary responsibilities
//! - **Windowing math** ([`range`]): `(count, height, offset, viewport,
//!   overscan)` to `start..end`. Pure, O(1), total.
//! - **Materialization** ([`window`]): positioned rows with stable identity
//!   keys.
//! - **Viewport tracking** ([`tracker`]): scroll and resize signals from an
//!   injected host ([`host`]) into a [`ViewportState`].
//! - **Controller** ([`WindowedList`]): the query and command surface.
//!
//! # How it fits in the system
//! Hosts implement [`ScrollContainer`] and [`ResizeSource`] for their
//! toolkit. `tally-web` does so for DOM elements and `ResizeObserver`;
//! [`headless`] provides in-memory versions for tests and native hosts.
//!
//! # Features
//! - `tracing`: spans around materialization, events for scroll/resize
//!   signals and degraded capabilities.
//! - `serde`: (de)serialize [`WindowConfig`] with camelCase field names.
//! - `state-persistence`: save/restore [`ViewportState`] across remounts.

pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod list;
pub mod range;
pub mod tracker;
pub mod window;

pub use config::{WindowConfig, WindowConfigParse};
pub use error::{ConfigError, ObserveError};
pub use host::{ResizeCallback, ResizeSource, ScrollCallback, ScrollContainer};
pub use list::WindowedList;
pub use range::{total_height, visible_range, window_range};
pub use tracker::{TrackerPhase, ViewportState, ViewportTracker};
pub use window::{ItemId, Keyed, Rendered, RowKey, Window, WindowItem, materialize};
