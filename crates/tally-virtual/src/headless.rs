#![forbid(unsafe_code)]

//! In-memory host implementations.
//!
//! - [`HeadlessContainer`] behaves like a browser scroll container: writes are
//!   clamped to `0..=content_height - client_height` and the scroll listener
//!   fires after every write that lands.
//! - [`ManualResize`] delivers heights only when told to.
//! - [`NoResize`] models a host without size observation.
//!
//! Handles are cheap clones sharing the same state, so a test (or a
//! non-browser host loop) can keep one handle while the tracker owns another.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ObserveError;
use crate::host::{ResizeCallback, ResizeSource, ScrollCallback, ScrollContainer};
use crate::range::clamp_extent;

struct ContainerInner {
    scroll_offset: f64,
    client_height: f64,
    content_height: Option<f64>,
    listener: Option<ScrollCallback>,
    events: u64,
}

/// Scroll container backed by plain memory.
#[derive(Clone)]
pub struct HeadlessContainer {
    inner: Rc<RefCell<ContainerInner>>,
}

impl fmt::Debug for HeadlessContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HeadlessContainer")
            .field("scroll_offset", &inner.scroll_offset)
            .field("client_height", &inner.client_height)
            .field("content_height", &inner.content_height)
            .field("listening", &inner.listener.is_some())
            .field("events", &inner.events)
            .finish()
    }
}

impl HeadlessContainer {
    /// Create a container with the given client height and unbounded content.
    #[must_use]
    pub fn new(client_height: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContainerInner {
                scroll_offset: 0.0,
                client_height,
                content_height: None,
                listener: None,
                events: 0,
            })),
        }
    }

    /// Bound the scrollable extent, as a spacer element of this height would.
    #[must_use]
    pub fn with_content_height(self, content_height: f64) -> Self {
        self.set_content_height(content_height);
        self
    }

    /// Update the scrollable extent. Re-clamps the current scroll distance
    /// without raising a scroll event.
    pub fn set_content_height(&self, content_height: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.content_height = Some(clamp_extent(content_height));
        let landed = clamp_to(&inner, inner.scroll_offset);
        inner.scroll_offset = landed;
    }

    /// Change the client height. Resize sources are separate; pair this with
    /// [`ManualResize::resize`] to simulate a layout change.
    pub fn set_client_height(&self, client_height: f64) {
        self.inner.borrow_mut().client_height = client_height;
    }

    /// Simulate a user-driven scroll to `offset`.
    pub fn user_scroll(&self, offset: f64) {
        self.write(offset);
    }

    /// Whether a scroll listener is currently attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.inner.borrow().listener.is_some()
    }

    /// Number of scroll events delivered so far.
    #[must_use]
    pub fn scroll_events(&self) -> u64 {
        self.inner.borrow().events
    }

    fn write(&self, offset: f64) {
        let (landed, listener) = {
            let mut inner = self.inner.borrow_mut();
            let landed = clamp_to(&inner, offset);
            inner.scroll_offset = landed;
            inner.events += 1;
            (landed, inner.listener.take())
        };
        // The listener runs without the borrow held so it may read back.
        if let Some(mut listener) = listener {
            listener(landed);
            let mut inner = self.inner.borrow_mut();
            if inner.listener.is_none() {
                inner.listener = Some(listener);
            }
        }
    }
}

fn clamp_to(inner: &ContainerInner, offset: f64) -> f64 {
    let offset = clamp_extent(offset);
    match inner.content_height {
        Some(content) => offset.min(clamp_extent(content - clamp_extent(inner.client_height))),
        None => offset,
    }
}

impl ScrollContainer for HeadlessContainer {
    fn scroll_offset(&self) -> f64 {
        self.inner.borrow().scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.write(offset);
    }

    fn client_height(&self) -> f64 {
        self.inner.borrow().client_height
    }

    fn listen(&mut self, on_scroll: ScrollCallback) -> Result<(), ObserveError> {
        self.inner.borrow_mut().listener = Some(on_scroll);
        Ok(())
    }

    fn unlisten(&mut self) {
        self.inner.borrow_mut().listener = None;
    }
}

/// Resize source driven explicitly via [`ManualResize::resize`].
#[derive(Clone, Default)]
pub struct ManualResize {
    callback: Rc<RefCell<Option<ResizeCallback>>>,
}

impl fmt::Debug for ManualResize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualResize")
            .field("observing", &self.is_observing())
            .finish()
    }
}

impl ManualResize {
    /// Create a source with no observer attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a new height to the observer. No-op when disconnected.
    pub fn resize(&self, height: f64) {
        let callback = self.callback.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback(height);
            let mut slot = self.callback.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    /// Whether an observer is attached.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

impl ResizeSource for ManualResize {
    fn observe(&mut self, on_resize: ResizeCallback) -> Result<(), ObserveError> {
        *self.callback.borrow_mut() = Some(on_resize);
        Ok(())
    }

    fn disconnect(&mut self) {
        *self.callback.borrow_mut() = None;
    }
}

/// Resize source for hosts without size observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResize;

impl ResizeSource for NoResize {
    fn observe(&mut self, _on_resize: ResizeCallback) -> Result<(), ObserveError> {
        Err(ObserveError::Unavailable)
    }

    fn disconnect(&mut self) {}
}
