#![forbid(unsafe_code)]

//! DOM bindings for the list engine.
//!
//! - [`DomScrollContainer`]: an `HtmlElement` as a [`ScrollContainer`]
//!   (`scrollTop`, `clientHeight`, `scroll` events).
//! - [`DomResizeObserver`]: a `ResizeObserver` on the same element as a
//!   [`ResizeSource`]. Reports unavailable when the global scope has no
//!   `ResizeObserver`, which makes the tracker fall back to its default
//!   height.
//! - [`TallyWindow`]: the JS-facing handle wrapping a mounted
//!   [`WindowedList`].

use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver, ResizeObserverEntry};

use tally_virtual::{
    ObserveError, ResizeCallback, ResizeSource, ScrollCallback, ScrollContainer, WindowedList,
};

use crate::options::{WindowSnapshot, config_from_json};

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn read_scroll_top(element: &HtmlElement) -> f64 {
    Reflect::get(element, &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

/// Whether the host exposes `ResizeObserver`.
#[must_use]
pub fn resize_observer_supported() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("ResizeObserver")).unwrap_or(false)
}

/// Scrollable DOM element.
pub struct DomScrollContainer {
    element: HtmlElement,
    listener: Option<Closure<dyn FnMut()>>,
}

impl DomScrollContainer {
    /// Wrap `element`. Nothing is subscribed until the tracker mounts.
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listener: None,
        }
    }
}

impl ScrollContainer for DomScrollContainer {
    fn scroll_offset(&self) -> f64 {
        read_scroll_top(&self.element)
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        // The browser clamps and raises `scroll` asynchronously.
        if let Err(err) = Reflect::set(
            &self.element,
            &JsValue::from_str("scrollTop"),
            &JsValue::from_f64(offset),
        ) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %describe(&err), "failed to write scrollTop");
            let _ = err;
        }
    }

    fn client_height(&self) -> f64 {
        f64::from(self.element.client_height())
    }

    fn listen(&mut self, mut on_scroll: ScrollCallback) -> Result<(), ObserveError> {
        self.unlisten();
        let element = self.element.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            on_scroll(read_scroll_top(&element));
        });
        self.element
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .map_err(|err| ObserveError::Rejected(describe(&err)))?;
        self.listener = Some(closure);
        Ok(())
    }

    fn unlisten(&mut self) {
        if let Some(closure) = self.listener.take() {
            let _ = self
                .element
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
    }
}

/// `ResizeObserver` watching one element.
pub struct DomResizeObserver {
    element: HtmlElement,
    active: Option<(ResizeObserver, Closure<dyn FnMut(Array)>)>,
}

impl DomResizeObserver {
    /// Observe `element` once the tracker mounts.
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            active: None,
        }
    }
}

impl ResizeSource for DomResizeObserver {
    fn observe(&mut self, mut on_resize: ResizeCallback) -> Result<(), ObserveError> {
        self.disconnect();
        if !resize_observer_supported() {
            return Err(ObserveError::Unavailable);
        }
        let closure = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            // Only the latest entry matters; all of them describe our element.
            let latest = entries
                .iter()
                .last()
                .and_then(|entry| entry.dyn_into::<ResizeObserverEntry>().ok());
            if let Some(entry) = latest {
                on_resize(f64::from(entry.target().client_height()));
            }
        });
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|err| ObserveError::Rejected(describe(&err)))?;
        observer.observe(&self.element);
        self.active = Some((observer, closure));
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some((observer, _closure)) = self.active.take() {
            observer.disconnect();
        }
    }
}

/// JS handle for a windowed list mounted on a scroll container.
///
/// Rows stay on the JS side; the handle answers which of them to render and
/// where. Calling `free()` from JS unmounts and releases both subscriptions.
#[wasm_bindgen]
pub struct TallyWindow {
    list: WindowedList<DomScrollContainer, DomResizeObserver>,
}

#[wasm_bindgen]
impl TallyWindow {
    /// Mount on `element` with optional JSON options.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: Option<String>) -> Result<TallyWindow, JsValue> {
        let config = config_from_json(options.as_deref())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let list = WindowedList::new(
            config,
            DomScrollContainer::new(element.clone()),
            DomResizeObserver::new(element),
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self { list })
    }

    /// Tell the handle how many rows the backing sequence holds.
    #[wasm_bindgen(js_name = setItemCount)]
    pub fn set_item_count(&mut self, item_count: usize) {
        self.list.set_item_count(item_count);
    }

    #[wasm_bindgen(js_name = startIndex)]
    pub fn start_index(&self) -> usize {
        self.list.start_index()
    }

    #[wasm_bindgen(js_name = endIndex)]
    pub fn end_index(&self) -> usize {
        self.list.end_index()
    }

    #[wasm_bindgen(js_name = totalHeight)]
    pub fn total_height(&self) -> f64 {
        self.list.total_height()
    }

    /// Offset of row `index`, for absolute positioning.
    #[wasm_bindgen(js_name = rowOffset)]
    pub fn row_offset(&self, index: usize) -> f64 {
        index as f64 * self.list.config().item_height
    }

    /// Full layout snapshot as JSON.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        let range = self.list.range();
        let viewport = self.list.viewport();
        WindowSnapshot {
            start_index: range.start,
            end_index: range.end,
            total_height: self.list.total_height(),
            item_height: self.list.config().item_height,
            scroll_offset: viewport.scroll_offset,
            viewport_height: viewport.viewport_height,
        }
        .to_json()
    }

    #[wasm_bindgen(js_name = scrollToIndex)]
    pub fn scroll_to_index(&mut self, index: usize) {
        self.list.scroll_to_index(index);
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&mut self) {
        self.list.scroll_to_top();
    }

    #[wasm_bindgen(js_name = scrollToBottom)]
    pub fn scroll_to_bottom(&mut self) {
        self.list.scroll_to_bottom();
    }

    /// Measurement phase: `"measuring"`, `"ready"`, or `"static"`.
    pub fn phase(&self) -> String {
        self.list.phase().as_str().to_string()
    }
}
