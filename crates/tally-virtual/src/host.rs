#![forbid(unsafe_code)]

//! Host capabilities consumed by the viewport tracker.
//!
//! The engine never talks to a concrete UI toolkit. Instead the host injects:
//!
//! - a [`ScrollContainer`]: the scrollable element (scroll distance, client
//!   height, and a scroll-event subscription), and
//! - a [`ResizeSource`]: a size-observation mechanism for that element.
//!
//! Browser bindings live in the `tally-web` crate; [`crate::headless`] has
//! in-memory implementations for tests and non-browser hosts.
//!
//! Callbacks are plain `FnMut` boxes. Signal delivery is single-threaded and
//! sequential, so none of these types need to be `Send`.

use crate::error::ObserveError;

/// Callback receiving the container's current scroll distance in pixels.
pub type ScrollCallback = Box<dyn FnMut(f64)>;

/// Callback receiving the container's new rendered height in pixels.
pub type ResizeCallback = Box<dyn FnMut(f64)>;

/// A scrollable host element.
pub trait ScrollContainer {
    /// Current scroll distance from the top, in pixels.
    fn scroll_offset(&self) -> f64;

    /// Write the scroll distance.
    ///
    /// The container may clamp the value to its scrollable extent. A real
    /// container raises its scroll signal afterwards; the tracker relies on
    /// that rather than updating itself.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Current rendered height of the container, in pixels.
    ///
    /// Zero or non-finite values mean "not laid out yet".
    fn client_height(&self) -> f64;

    /// Subscribe to scroll events. Replaces any previous listener.
    fn listen(&mut self, on_scroll: ScrollCallback) -> Result<(), ObserveError>;

    /// Drop the scroll listener, if any.
    fn unlisten(&mut self);
}

/// A size-observation mechanism for the container.
pub trait ResizeSource {
    /// Start delivering height changes to `on_resize`.
    ///
    /// Returns [`ObserveError::Unavailable`] when the host has no such
    /// mechanism; the tracker then keeps its default height permanently.
    fn observe(&mut self, on_resize: ResizeCallback) -> Result<(), ObserveError>;

    /// Stop observing. Must be safe to call when not observing.
    fn disconnect(&mut self);
}
