#![forbid(unsafe_code)]

//! Window materialization: turning an index range into positioned rows.
//!
//! A [`Window`] borrows the backing slice and is rebuilt from scratch every
//! time it is requested. It is never cached or patched in place.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::range::row_offset;

/// Identifier an item can expose for stable row keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId<'a> {
    /// Numeric identifier (database row id, sequence number).
    Num(u64),
    /// String identifier (UUID, external reference).
    Str(Cow<'a, str>),
}

impl fmt::Display for ItemId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

/// Stable identity key for a rendered row.
///
/// Hosts use this to reconcile row elements across windows: the same key in
/// two consecutive windows refers to the same logical row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey<'a> {
    /// The item's own identifier.
    Id(ItemId<'a>),
    /// Positional fallback for items without an identifier.
    Index(usize),
}

impl fmt::Display for RowKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Items that may carry their own identifier.
///
/// The default implementation reports no identifier, so rows fall back to
/// their index.
pub trait Keyed {
    /// Identifier of this item, if it has one.
    fn item_id(&self) -> Option<ItemId<'_>> {
        None
    }
}

impl Keyed for String {}
impl Keyed for &str {}
impl Keyed for u64 {
    fn item_id(&self) -> Option<ItemId<'_>> {
        Some(ItemId::Num(*self))
    }
}

/// One materialized row.
#[derive(Debug, Clone)]
pub struct WindowItem<'a, T> {
    /// Index in the backing sequence.
    pub index: usize,
    /// Absolute offset from the top of the scrollable area: `index * height`.
    pub offset: f64,
    /// Row height in pixels.
    pub height: f64,
    /// Stable identity key.
    pub key: RowKey<'a>,
    /// The backing item.
    pub item: &'a T,
}

/// The currently materialized slice of a larger sequence.
#[derive(Debug, Clone)]
pub struct Window<'a, T> {
    /// First realized index (inclusive).
    pub start: usize,
    /// Last realized index (exclusive).
    pub end: usize,
    /// Rows in `start..end`, in order.
    pub items: Vec<WindowItem<'a, T>>,
    /// Height of the whole scrollable area, for sizing the spacer element.
    pub total_height: f64,
}

impl<'a, T> Window<'a, T> {
    /// Number of realized rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no rows are realized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index range of the realized rows.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Iterate over the realized rows.
    pub fn iter(&self) -> std::slice::Iter<'_, WindowItem<'a, T>> {
        self.items.iter()
    }

    /// Invoke `render(item, offset_px, height_px)` once per realized row.
    pub fn render<R, F>(&self, mut render: F) -> Vec<R>
    where
        F: FnMut(&'a T, f64, f64) -> R,
    {
        self.items
            .iter()
            .map(|row| render(row.item, row.offset, row.height))
            .collect()
    }
}

impl<'w, 'a, T> IntoIterator for &'w Window<'a, T> {
    type Item = &'w WindowItem<'a, T>;
    type IntoIter = std::slice::Iter<'w, WindowItem<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Render output: rows, or the caller's empty state for an empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<R> {
    /// One rendered row per realized item.
    Rows(Vec<R>),
    /// The backing sequence is empty.
    Empty(R),
}

impl<R> Rendered<R> {
    /// Whether the empty state was produced.
    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Build the window for `range` over `items`.
///
/// The range is clamped to the slice, so a stale range computed before the
/// sequence shrank still yields a consistent window. The slice is never
/// mutated.
#[must_use]
pub fn materialize<'a, T: Keyed>(
    items: &'a [T],
    range: Range<usize>,
    item_height: f64,
) -> Window<'a, T> {
    let end = range.end.min(items.len());
    let start = range.start.min(end);

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "materialize_window",
        start,
        end,
        items = items.len()
    )
    .entered();

    let rows = items[start..end]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = start + i;
            WindowItem {
                index,
                offset: row_offset(index, item_height),
                height: item_height,
                key: item.item_id().map_or(RowKey::Index(index), RowKey::Id),
                item,
            }
        })
        .collect();

    Window {
        start,
        end,
        items: rows,
        total_height: crate::range::total_height(items.len(), item_height),
    }
}
