//! Scrolling height field for the 3D spectrum surface
//!
//! Each row is one historical snapshot slice (row 0 = newest), each column
//! one frequency bin. Every push rewrites the full height/color buffers so
//! a renderer can upload them wholesale.

use crate::color::{heat_color, Rgb};
use crate::tier::FieldDimensions;
use std::collections::VecDeque;

/// Default vertical scale applied to normalized magnitudes
pub const DEFAULT_HEIGHT_SCALE: f32 = 4.0;

/// History grid of per-bin magnitudes
#[derive(Debug, Clone)]
pub struct HeightField {
    dims: FieldDimensions,
    height_scale: f32,
    /// Raw slices, newest first; each at most `spectrum_width` long
    rows: VecDeque<Vec<u8>>,
    /// Dense `history_depth * spectrum_width` buffers, row-major
    heights: Vec<f32>,
    colors: Vec<Rgb>,
}

impl HeightField {
    pub fn new(dims: FieldDimensions, height_scale: f32) -> Self {
        let mut field = Self {
            dims,
            height_scale,
            rows: VecDeque::with_capacity(dims.history_depth + 1),
            heights: Vec::new(),
            colors: Vec::new(),
        };
        field.allocate();
        field
    }

    fn allocate(&mut self) {
        let cells = self.dims.cells();
        self.rows.clear();
        self.heights = vec![0.0; cells];
        self.colors = vec![heat_color(0.0); cells];
    }

    pub fn dimensions(&self) -> FieldDimensions {
        self.dims
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Tear down and reallocate the grid with new dimensions
    pub fn resize(&mut self, dims: FieldDimensions) {
        tracing::debug!(
            width = dims.spectrum_width,
            depth = dims.history_depth,
            "height field reallocated"
        );
        self.dims = dims;
        self.rows = VecDeque::with_capacity(dims.history_depth + 1);
        self.allocate();
    }

    /// Shift in a new snapshot as row 0, evicting the oldest past the depth
    pub fn push(&mut self, snapshot: &[u8]) {
        if self.dims.history_depth == 0 {
            return;
        }
        let take = snapshot.len().min(self.dims.spectrum_width);
        self.rows.push_front(snapshot[..take].to_vec());
        self.rows.truncate(self.dims.history_depth);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let width = self.dims.spectrum_width;
        for row in 0..self.dims.history_depth {
            for col in 0..width {
                let intensity = self.intensity(row, col);
                let idx = row * width + col;
                self.heights[idx] = intensity * self.height_scale;
                self.colors[idx] = heat_color(intensity);
            }
        }
    }

    /// Number of rows currently holding history
    pub fn populated(&self) -> usize {
        self.rows.len()
    }

    /// Raw slice for a row, `None` past the populated history
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Normalized magnitude of a cell (0 for unpopulated cells)
    pub fn intensity(&self, row: usize, col: usize) -> f32 {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|&v| v as f32 / 255.0)
            .unwrap_or(0.0)
    }

    /// Scaled height of a cell
    pub fn height(&self, row: usize, col: usize) -> f32 {
        self.cell_index(row, col)
            .map(|i| self.heights[i])
            .unwrap_or(0.0)
    }

    /// Heat color of a cell
    pub fn color(&self, row: usize, col: usize) -> Rgb {
        self.cell_index(row, col)
            .map(|i| self.colors[i])
            .unwrap_or_else(|| heat_color(0.0))
    }

    /// Dense row-major height buffer
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Dense row-major color buffer
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.dims.history_depth && col < self.dims.spectrum_width)
            .then(|| row * self.dims.spectrum_width + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: usize, depth: usize) -> HeightField {
        HeightField::new(FieldDimensions::new(width, depth), DEFAULT_HEIGHT_SCALE)
    }

    #[test]
    fn test_new_field_is_flat() {
        let f = field(8, 4);
        assert_eq!(f.populated(), 0);
        assert_eq!(f.heights().len(), 32);
        assert!(f.heights().iter().all(|&h| h == 0.0));
        assert_eq!(f.color(3, 7), heat_color(0.0));
    }

    #[test]
    fn test_push_truncates_to_width() {
        let mut f = field(4, 3);
        f.push(&[255, 128, 0, 51, 200, 200]);
        assert_eq!(f.row(0).unwrap(), &[255, 128, 0, 51]);
        assert!((f.height(0, 0) - DEFAULT_HEIGHT_SCALE).abs() < 1e-6);
        assert!((f.height(0, 3) - 0.2 * DEFAULT_HEIGHT_SCALE).abs() < 1e-6);
        assert_eq!(f.color(0, 0), heat_color(1.0));
        // Unpopulated rows stay at zero
        assert_eq!(f.height(1, 0), 0.0);
    }

    #[test]
    fn test_short_snapshot_pads_with_zero() {
        let mut f = field(4, 2);
        f.push(&[255]);
        assert_eq!(f.intensity(0, 0), 1.0);
        assert_eq!(f.intensity(0, 3), 0.0);
        assert_eq!(f.height(0, 3), 0.0);
    }

    #[test]
    fn test_scrolling_keeps_most_recent_depth() {
        let depth = 5;
        let mut f = field(2, depth);
        for k in 0..12u8 {
            f.push(&[k, k]);
        }
        assert_eq!(f.populated(), depth);
        // Newest first: 11, 10, 9, 8, 7
        for row in 0..depth {
            let expected = 11 - row as u8;
            assert_eq!(f.row(row).unwrap(), &[expected, expected]);
        }
        assert!(f.row(depth).is_none());
    }

    #[test]
    fn test_dense_buffers_follow_scroll() {
        let mut f = field(1, 2);
        f.push(&[255]);
        f.push(&[0]);
        assert_eq!(f.heights(), &[0.0, DEFAULT_HEIGHT_SCALE]);
        assert_eq!(f.colors()[1], heat_color(1.0));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut f = field(4, 4);
        f.push(&[255; 4]);
        f.resize(FieldDimensions::new(8, 2));
        assert_eq!(f.populated(), 0);
        assert_eq!(f.heights().len(), 16);
        assert!(f.heights().iter().all(|&h| h == 0.0));
        assert_eq!(f.dimensions(), FieldDimensions::new(8, 2));
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let f = field(2, 2);
        assert_eq!(f.height(5, 5), 0.0);
        assert_eq!(f.color(5, 0), heat_color(0.0));
        assert_eq!(f.intensity(0, 9), 0.0);
    }
}
