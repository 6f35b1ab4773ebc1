//! Scroll geometry for the result list.
//!
//! Pure functions over heights in any unit (terminal rows here). The
//! scrollbar thumb is expressed in percentages of the track so it can be
//! projected onto any track size.

/// Inputs of the scrollbar computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Total height of all stacked items.
    pub content_height: usize,
    pub viewport_height: usize,
    pub scroll_offset: usize,
}

/// Derived scrollbar thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub height_pct: f64,
    pub top_pct: f64,
    pub visible: bool,
}

impl Thumb {
    pub const HIDDEN: Thumb = Thumb {
        height_pct: 0.0,
        top_pct: 0.0,
        visible: false,
    };

    /// Projects the thumb onto a track of `track` cells.
    ///
    /// Returns `(top, height)`; a visible thumb is at least one cell tall and
    /// never runs past the track.
    pub fn project(&self, track: usize) -> Option<(usize, usize)> {
        if !self.visible || track == 0 {
            return None;
        }
        let height = ((self.height_pct * track as f64 / 100.0).round() as usize).clamp(1, track);
        let top = ((self.top_pct * track as f64 / 100.0).round() as usize).min(track - height);
        Some((top, height))
    }
}

impl ScrollMetrics {
    pub fn new(content_height: usize, viewport_height: usize, scroll_offset: usize) -> Self {
        Self {
            content_height,
            viewport_height,
            scroll_offset,
        }
    }

    /// Computes the thumb; hidden when everything fits in the viewport.
    pub fn thumb(&self) -> Thumb {
        if self.content_height <= self.viewport_height {
            return Thumb::HIDDEN;
        }
        let total = self.content_height as f64;
        Thumb {
            height_pct: 100.0 * self.viewport_height as f64 / total,
            top_pct: 100.0 * self.scroll_offset as f64 / total,
            visible: true,
        }
    }

    /// Range of content offsets currently inside the viewport.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.scroll_offset.min(self.content_height);
        let end = (self.scroll_offset + self.viewport_height).min(self.content_height);
        start..end
    }
}

/// Returns the scroll offset that brings an item fully into view.
///
/// `item_top` is measured from the top of the content. An item below the
/// viewport scrolls down by exactly its overflow, an item above scrolls up
/// by exactly the deficit, and a visible item leaves the offset unchanged.
pub fn ensure_visible(
    item_top: usize,
    item_height: usize,
    viewport_height: usize,
    current_scroll: usize,
) -> usize {
    let item_bottom = item_top + item_height;
    let viewport_bottom = current_scroll + viewport_height;

    if item_bottom > viewport_bottom {
        current_scroll + (item_bottom - viewport_bottom)
    } else if item_top < current_scroll {
        item_top
    } else {
        current_scroll
    }
}

/// Clamps a scroll offset so the viewport never starts past the content.
pub fn clamp_scroll(scroll: usize, content_height: usize, viewport_height: usize) -> usize {
    scroll.min(content_height.saturating_sub(viewport_height))
}
