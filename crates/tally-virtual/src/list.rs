#![forbid(unsafe_code)]

//! The windowed list controller.
//!
//! [`WindowedList`] ties a validated [`WindowConfig`] to a mounted
//! [`ViewportTracker`] and exposes the query and command surface used by the
//! host's list component:
//!
//! - queries: [`window`](WindowedList::window), [`range`](WindowedList::range),
//!   [`start_index`](WindowedList::start_index),
//!   [`end_index`](WindowedList::end_index),
//!   [`total_height`](WindowedList::total_height);
//! - commands: [`scroll_to_index`](WindowedList::scroll_to_index),
//!   [`scroll_to_top`](WindowedList::scroll_to_top), and the paging helpers.
//!
//! The list does not own its rows. The host passes the backing slice on each
//! render; the last seen length is cached for queries and commands that need
//! an item count between renders.
//!
//! # Example
//!
//! ```
//! use tally_virtual::headless::{HeadlessContainer, ManualResize};
//! use tally_virtual::{WindowConfig, WindowedList};
//!
//! let rows: Vec<String> = (0..1000).map(|i| format!("row {i}")).collect();
//! let container = HeadlessContainer::new(600.0);
//! let mut list = WindowedList::new(WindowConfig::default(), container, ManualResize::new())
//!     .expect("default config is valid");
//!
//! let window = list.window(&rows);
//! assert_eq!(window.range(), 0..20);
//!
//! list.scroll_to_index(200);
//! assert_eq!(list.start_index(), 195);
//! ```

use std::cell::Cell;
use std::ops::Range;

use crate::config::WindowConfig;
use crate::error::ConfigError;
use crate::host::{ResizeSource, ScrollContainer};
use crate::range::{max_scroll_offset, row_offset, total_height, visible_range, window_range};
use crate::tracker::{TrackerPhase, ViewportState, ViewportTracker};
use crate::window::{Keyed, Rendered, Window, materialize};

/// Windowed list over fixed-height rows.
#[derive(Debug)]
pub struct WindowedList<C: ScrollContainer, R: ResizeSource> {
    config: WindowConfig,
    tracker: ViewportTracker<C, R>,
    /// Length of the backing sequence (cached from the last render).
    item_count: Cell<usize>,
}

impl<C: ScrollContainer, R: ResizeSource> WindowedList<C, R> {
    /// Validate `config` and mount on `container`.
    ///
    /// Fails fast on a malformed config (non-positive or non-finite heights).
    pub fn new(config: WindowConfig, container: C, resize: R) -> Result<Self, ConfigError> {
        config.check()?;
        let tracker = ViewportTracker::mount(container, resize, config.container_height);
        Ok(Self {
            config,
            tracker,
            item_count: Cell::new(0),
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.tracker.viewport()
    }

    /// Current measurement phase.
    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.tracker.phase()
    }

    /// The mounted tracker.
    #[must_use]
    pub fn tracker(&self) -> &ViewportTracker<C, R> {
        &self.tracker
    }

    /// Length of the backing sequence as of the last render.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count.get()
    }

    /// Record the backing sequence length without rendering.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count.set(item_count);
    }

    /// Row range to realize, including overscan.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let viewport = self.viewport();
        window_range(
            self.item_count.get(),
            self.config.item_height,
            viewport.scroll_offset,
            viewport.viewport_height,
            self.config.overscan,
        )
    }

    /// Rows actually intersecting the viewport (no overscan).
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let viewport = self.viewport();
        visible_range(
            self.item_count.get(),
            self.config.item_height,
            viewport.scroll_offset,
            viewport.viewport_height,
        )
    }

    /// First realized index (inclusive).
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.range().start
    }

    /// Last realized index (exclusive).
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.range().end
    }

    /// Height of the scrollable spacer: `item_count * item_height`.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        total_height(self.item_count.get(), self.config.item_height)
    }

    /// Materialize the current window over `items`.
    #[must_use]
    pub fn window<'a, T: Keyed>(&self, items: &'a [T]) -> Window<'a, T> {
        self.item_count.set(items.len());
        materialize(items, self.range(), self.config.item_height)
    }

    /// Render the current window, calling `render(item, offset_px, height_px)`
    /// once per realized row.
    pub fn render<'a, T, Out, F>(&self, items: &'a [T], render: F) -> Vec<Out>
    where
        T: Keyed,
        F: FnMut(&'a T, f64, f64) -> Out,
    {
        self.window(items).render(render)
    }

    /// Like [`render`](Self::render), but produces `empty()` when the backing
    /// sequence is empty.
    pub fn render_or_else<'a, T, Out, F, E>(
        &self,
        items: &'a [T],
        render: F,
        empty: E,
    ) -> Rendered<Out>
    where
        T: Keyed,
        F: FnMut(&'a T, f64, f64) -> Out,
        E: FnOnce() -> Out,
    {
        if items.is_empty() {
            self.item_count.set(0);
            return Rendered::Empty(empty());
        }
        Rendered::Rows(self.render(items, render))
    }

    /// Scroll so row `index` sits at the top: writes `index * item_height`
    /// to the container.
    pub fn scroll_to_index(&mut self, index: usize) {
        let offset = row_offset(index, self.config.item_height);
        self.tracker.scroll_to(offset);
    }

    /// Scroll to the top.
    pub fn scroll_to_top(&mut self) {
        self.tracker.scroll_to(0.0);
    }

    /// Scroll so the last row sits at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self) {
        let viewport = self.viewport();
        let offset = max_scroll_offset(
            self.item_count.get(),
            self.config.item_height,
            viewport.viewport_height,
        );
        self.tracker.scroll_to(offset);
    }

    /// Scroll by a signed number of rows (positive = down).
    pub fn scroll_by_rows(&mut self, delta: isize) {
        let current = self.viewport().scroll_offset;
        let offset = current + delta as f64 * self.config.item_height;
        self.tracker.scroll_to(offset.max(0.0));
    }

    /// Scroll up by one page of whole rows.
    pub fn page_up(&mut self) {
        let rows = self.rows_per_page();
        self.scroll_by_rows(-rows);
    }

    /// Scroll down by one page of whole rows.
    pub fn page_down(&mut self) {
        let rows = self.rows_per_page();
        self.scroll_by_rows(rows);
    }

    /// Whether the last row is inside the viewport.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        let count = self.item_count.get();
        count == 0 || self.visible_range().end == count
    }

    /// Release the container and resize subscriptions.
    pub fn unmount(self) {
        drop(self);
    }

    /// Snapshot of the viewport for saving across remounts.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn save_state(&self) -> ViewportState {
        self.tracker.save_state()
    }

    /// Restore a saved scroll position through the container.
    #[cfg(feature = "state-persistence")]
    pub fn restore_state(&mut self, state: ViewportState) {
        self.tracker.restore_state(state);
    }

    fn rows_per_page(&self) -> isize {
        let rows = (self.viewport().viewport_height / self.config.item_height).floor() as isize;
        rows.max(1)
    }
}
