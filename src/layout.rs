//! Justified row layout.
//!
//! Packs photos of varying aspect ratio into rows that exactly fill a
//! container's width, keeping every row close to a target height.
//!
//! ## Algorithm
//!
//! Items are added greedily to a pending row while tracking the sum of their
//! aspect ratios. After each addition (once the row holds at least two items)
//! the row's usable width is
//!
//! ```text
//! available = max(min_available, container_width - gap * (count - 1))
//! ```
//!
//! When `aspect_sum * target_height >= available` the row is closed and
//! **stretched**: its height becomes `available / aspect_sum`, so the items'
//! ideal widths sum to `available`. Widths are floored except the last, which
//! takes whatever is left. The rendered widths therefore add up to
//! `available` exactly, with no gap or overflow from rounding.
//!
//! Whatever is pending when the input runs out becomes the **last row**. It is
//! not stretched (a sparse trailing row would blow up); each item is rendered
//! at the target height and the row is centered.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::config::LayoutConfig;
use crate::types::PhotoItem;

/// One photo entering a layout pass.
#[derive(Debug, Clone, Copy)]
pub struct RowLayoutItem<'a> {
    pub item: &'a PhotoItem,
    /// Position in the full manifest, used as the lightbox target.
    pub original_index: usize,
    pub aspect_ratio: f64,
}

/// Container geometry for a layout pass, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub container_width: u32,
    pub target_row_height: u32,
    pub gap: u32,
    /// Floor for a row's usable width.
    pub min_available: u32,
}

impl LayoutParams {
    /// Build params from config for a container and viewport width.
    ///
    /// A container width of `0` (not yet measured) falls back to the
    /// configured default.
    pub fn from_config(config: &LayoutConfig, container_width: u32, viewport_width: u32) -> Self {
        let container_width = if container_width == 0 {
            config.fallback_container_width
        } else {
            container_width
        };
        Self {
            container_width,
            target_row_height: target_row_height(config, viewport_width),
            gap: config.gap,
            min_available: config.min_available_width,
        }
    }

    /// Usable width for a row of `count` items.
    pub fn available_width(&self, count: usize) -> u32 {
        let gaps = self.gap.saturating_mul(count.saturating_sub(1) as u32);
        self.container_width
            .saturating_sub(gaps)
            .max(self.min_available)
    }
}

/// Pick the target row height for a viewport width.
///
/// Breakpoints are checked in ascending order; the first whose `max_width`
/// covers the viewport wins. Wider viewports use `row_height`.
pub fn target_row_height(config: &LayoutConfig, viewport_width: u32) -> u32 {
    config
        .breakpoints
        .iter()
        .find(|b| viewport_width <= b.max_width)
        .map(|b| b.row_height)
        .unwrap_or(config.row_height)
}

/// A single placed photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub original_index: usize,
    pub width: u32,
    pub height: u32,
}

/// A laid-out row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Exact row height before rounding to whole pixels.
    pub height: f64,
    /// Trailing row: unstretched and horizontally centered.
    pub is_last: bool,
}

impl Row {
    /// Sum of cell widths, excluding gaps.
    pub fn content_width(&self) -> u32 {
        self.cells.iter().map(|c| c.width).sum()
    }

    /// Sum of cell widths plus the gaps between them.
    pub fn total_width(&self, gap: u32) -> u32 {
        self.content_width() + gap * self.cells.len().saturating_sub(1) as u32
    }
}

/// Partition items into justified rows.
///
/// Returns an empty vector for empty input. A lone item is never stretched;
/// it can only end up in the (unstretched) last row.
pub fn layout(items: &[RowLayoutItem<'_>], params: &LayoutParams) -> Vec<Row> {
    let target = params.target_row_height as f64;
    let mut rows = Vec::new();
    let mut pending: Vec<&RowLayoutItem<'_>> = Vec::new();
    let mut aspect_sum = 0.0;

    for item in items {
        pending.push(item);
        aspect_sum += item.aspect_ratio;

        let available = params.available_width(pending.len());
        if pending.len() >= 2 && aspect_sum * target >= available as f64 {
            rows.push(stretched_row(&pending, aspect_sum, available));
            pending.clear();
            aspect_sum = 0.0;
        }
    }

    if !pending.is_empty() {
        rows.push(last_row(&pending, params.target_row_height));
    }
    rows
}

fn stretched_row(items: &[&RowLayoutItem<'_>], aspect_sum: f64, available: u32) -> Row {
    let height = available as f64 / aspect_sum;
    let cell_height = height.round() as u32;
    let last = items.len() - 1;

    let mut cells = Vec::with_capacity(items.len());
    let mut used: u32 = 0;
    for (i, item) in items.iter().enumerate() {
        let width = if i == last {
            available.saturating_sub(used).max(1)
        } else {
            ((height * item.aspect_ratio).floor() as u32).max(1)
        };
        used += width;
        cells.push(Cell {
            original_index: item.original_index,
            width,
            height: cell_height,
        });
    }

    Row {
        cells,
        height,
        is_last: false,
    }
}

fn last_row(items: &[&RowLayoutItem<'_>], target_row_height: u32) -> Row {
    let height = target_row_height as f64;
    let cells = items
        .iter()
        .map(|item| Cell {
            original_index: item.original_index,
            width: ((height * item.aspect_ratio).round() as u32).max(1),
            height: target_row_height,
        })
        .collect();
    Row {
        cells,
        height,
        is_last: true,
    }
}
