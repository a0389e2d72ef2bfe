#![forbid(unsafe_code)]

//! Viewport tracking: scroll and resize signals into [`ViewportState`].
//!
//! # Design
//!
//! - The tracker owns the host [`ScrollContainer`] and [`ResizeSource`] and
//!   subscribes to both at mount.
//! - Signal callbacks share an `Rc` with the tracker and write the viewport
//!   state through `Cell`s. The tracker is the only writer; readers get
//!   `Copy` snapshots.
//! - Scroll commands write through the container. The resulting scroll
//!   signal, not the command, updates the state, so programmatic and
//!   user-driven scrolling take the same path.
//! - Dropping the tracker disconnects the resize source and removes the
//!   scroll listener.
//!
//! # Phases
//!
//! ```text
//!            valid height (mount or resize)
//! Measuring ────────────────────────────────▶ Ready
//!
//! resize source unavailable ──▶ Static (default height, permanently)
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{ResizeSource, ScrollContainer};
use crate::range::clamp_extent;

/// Scroll position and viewport height, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ViewportState {
    /// Scroll distance from the top of the content (`>= 0`).
    pub scroll_offset: f64,
    /// Height of the visible region (`> 0`).
    pub viewport_height: f64,
}

/// Measurement state of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No valid container height observed yet; the default is in use.
    Measuring,
    /// The container has been measured at least once.
    Ready,
    /// The host cannot observe size changes; the default is used permanently.
    Static,
}

impl TrackerPhase {
    /// Stable lowercase name, for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Measuring => "measuring",
            Self::Ready => "ready",
            Self::Static => "static",
        }
    }
}

#[derive(Debug)]
struct Shared {
    state: Cell<ViewportState>,
    phase: Cell<TrackerPhase>,
}

impl Shared {
    fn apply_scroll(&self, offset: f64) {
        let mut state = self.state.get();
        state.scroll_offset = clamp_extent(offset);
        self.state.set(state);

        #[cfg(feature = "tracing")]
        tracing::trace!(scroll_offset = state.scroll_offset, "viewport scroll");
    }

    fn apply_resize(&self, height: f64) {
        if !is_measured(height) {
            // Detached or display:none containers report 0; keep the last
            // known height.
            return;
        }
        let mut state = self.state.get();
        state.viewport_height = height;
        self.state.set(state);
        let from = self.phase.replace(TrackerPhase::Ready);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            viewport_height = height,
            from = from.as_str(),
            "viewport resize"
        );
        let _ = from;
    }
}

#[inline]
fn is_measured(height: f64) -> bool {
    height.is_finite() && height > 0.0
}

/// Tracks the viewport of one mounted list.
#[derive(Debug)]
pub struct ViewportTracker<C: ScrollContainer, R: ResizeSource> {
    container: C,
    resize: R,
    shared: Rc<Shared>,
    /// False when the container refused a scroll listener; the state is then
    /// pulled from the container on every read.
    scroll_listening: bool,
    resize_observing: bool,
}

impl<C: ScrollContainer, R: ResizeSource> ViewportTracker<C, R> {
    /// Mount on `container`, measuring it once and subscribing to both
    /// signals.
    ///
    /// `default_height` is used while the container reports no valid height,
    /// and forever if `resize` is unavailable. Missing capabilities are
    /// logged, never returned.
    pub fn mount(mut container: C, mut resize: R, default_height: f64) -> Self {
        let shared = Rc::new(Shared {
            state: Cell::new(ViewportState {
                scroll_offset: 0.0,
                viewport_height: default_height,
            }),
            phase: Cell::new(TrackerPhase::Measuring),
        });

        let on_resize = Rc::clone(&shared);
        let resize_observing = match resize.observe(Box::new(move |height| {
            on_resize.apply_resize(height);
        })) {
            Ok(()) => {
                shared.apply_resize(container.client_height());
                true
            }
            Err(err) => {
                shared.phase.set(TrackerPhase::Static);
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %err,
                    default_height,
                    "resize observation unavailable; using default viewport height"
                );
                let _ = err;
                false
            }
        };

        let on_scroll = Rc::clone(&shared);
        let scroll_listening = match container.listen(Box::new(move |offset| {
            on_scroll.apply_scroll(offset);
        })) {
            Ok(()) => true,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "scroll listener refused; polling container");
                let _ = err;
                false
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            phase = shared.phase.get().as_str(),
            viewport_height = shared.state.get().viewport_height,
            "viewport tracker mounted"
        );

        Self {
            container,
            resize,
            shared,
            scroll_listening,
            resize_observing,
        }
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        if !self.scroll_listening {
            self.shared.apply_scroll(self.container.scroll_offset());
        }
        self.shared.state.get()
    }

    /// Current measurement phase.
    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.shared.phase.get()
    }

    /// Write a scroll distance through the container.
    ///
    /// The state updates when the container raises its scroll signal.
    pub fn scroll_to(&mut self, offset: f64) {
        self.container.set_scroll_offset(clamp_extent(offset));
    }

    /// Shared access to the host container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Whether the resize source accepted the subscription.
    #[must_use]
    pub fn is_observing_resize(&self) -> bool {
        self.resize_observing
    }

    /// Release both subscriptions and drop the tracker.
    pub fn unmount(self) {
        drop(self);
    }

    /// Snapshot of the viewport for saving across remounts.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn save_state(&self) -> ViewportState {
        self.viewport()
    }

    /// Restore a saved scroll position by writing it through the container.
    ///
    /// The saved viewport height is ignored: the live container is the source
    /// of truth for its own size.
    #[cfg(feature = "state-persistence")]
    pub fn restore_state(&mut self, state: ViewportState) {
        self.scroll_to(state.scroll_offset);
    }
}

impl<C: ScrollContainer, R: ResizeSource> Drop for ViewportTracker<C, R> {
    fn drop(&mut self) {
        if self.resize_observing {
            self.resize.disconnect();
        }
        if self.scroll_listening {
            self.container.unlisten();
        }
    }
}
