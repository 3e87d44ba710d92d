//! Flat 2D bar chart mapping

use crate::color::{heat_color, Rgb};
use spectra_analysis::{bin_window, RangeLimits, SamplingParams};

/// Bar width multiplier relative to an even split of the canvas
pub const BAR_WIDTH_FACTOR: f32 = 1.6;

/// Horizontal gap between consecutive bars, in canvas units
pub const BAR_GAP: f32 = 1.0;

/// One bar in canvas coordinates (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    /// Top edge: `canvas_height - height`
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Normalized magnitude (value / 255)
    pub level: f32,
    pub color: Rgb,
}

/// Lay out a slice of bins as left-to-right bars
///
/// Bars past the right edge are still emitted; clipping is the renderer's job.
pub fn map_bars(slice: &[u8], canvas_width: f32, canvas_height: f32) -> Vec<Bar> {
    if slice.is_empty() {
        return Vec::new();
    }

    let width = canvas_width / slice.len() as f32 * BAR_WIDTH_FACTOR;
    let mut x = 0.0;
    slice
        .iter()
        .map(|&value| {
            let level = value as f32 / 255.0;
            let height = level * canvas_height;
            let bar = Bar {
                x,
                y: canvas_height - height,
                width,
                height,
                level,
                color: heat_color(level),
            };
            x += width + BAR_GAP;
            bar
        })
        .collect()
}

/// Restrict a snapshot to the selected range, then lay it out
pub fn map_range_bars(
    snapshot: &[u8],
    params: &SamplingParams,
    limits: &RangeLimits,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec<Bar> {
    let window = bin_window(params, limits, snapshot.len());
    map_bars(&snapshot[window], canvas_width, canvas_height)
}
