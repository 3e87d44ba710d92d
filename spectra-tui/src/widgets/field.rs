//! Height-field views: waterfall and receding surface

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use spectra_viz::HeightField;

/// Shade characters by intensity
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// How the field is projected onto the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldProjection {
    /// Newest row at the bottom, history scrolling upward
    #[default]
    Waterfall,
    /// Rows recede toward a vanishing line, columns rise with height
    Surface,
}

pub struct HeightFieldWidget<'a> {
    field: &'a HeightField,
    theme: &'a Theme,
    projection: FieldProjection,
    title: &'a str,
}

impl<'a> HeightFieldWidget<'a> {
    pub fn new(field: &'a HeightField, theme: &'a Theme) -> Self {
        Self {
            field,
            theme,
            projection: FieldProjection::Waterfall,
            title: " 3D ",
        }
    }

    pub fn projection(mut self, projection: FieldProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn shade(intensity: f32) -> char {
        let idx = (intensity.clamp(0.0, 1.0) * (SHADES.len() - 1) as f32).round() as usize;
        SHADES[idx]
    }

    fn render_waterfall(&self, inner: Rect, buf: &mut Buffer) {
        let dims = self.field.dimensions();
        if dims.spectrum_width == 0 || dims.history_depth == 0 {
            return;
        }
        let rows = (inner.height as usize).min(dims.history_depth);

        for screen_row in 0..rows {
            // Bottom line shows row 0 (newest)
            let field_row = screen_row * dims.history_depth / rows;
            let y = inner.y + inner.height - 1 - screen_row as u16;
            for col in 0..inner.width as usize {
                let field_col = col * dims.spectrum_width / inner.width as usize;
                let intensity = self.field.intensity(field_row, field_col);
                if intensity <= 0.0 {
                    continue;
                }
                let style = self.theme.heat(self.field.color(field_row, field_col));
                buf[(inner.x + col as u16, y)]
                    .set_char(Self::shade(intensity))
                    .set_style(style);
            }
        }
    }

    fn render_surface(&self, inner: Rect, buf: &mut Buffer) {
        let dims = self.field.dimensions();
        let populated = self.field.populated();
        if dims.spectrum_width == 0 || populated == 0 {
            return;
        }

        let width = inner.width as f32;
        let height = inner.height as f32;
        let scale = self.field.height_scale().max(f32::EPSILON);
        // Rows recede over the upper half of the panel
        let depth_span = (height * 0.5).max(1.0);
        let rise_span = height - depth_span;

        // Painter's order: oldest first so newer rows overdraw
        for row in (0..populated).rev() {
            let depth = row as f32 / dims.history_depth.max(1) as f32;
            let shrink = 1.0 - 0.5 * depth;
            let baseline = height - 1.0 - depth * depth_span;
            let row_width = width * shrink;
            let left = (width - row_width) / 2.0;

            for col in 0..dims.spectrum_width {
                let h = self.field.height(row, col) / scale;
                if h <= 0.0 {
                    continue;
                }
                let x = left + (col as f32 + 0.5) / dims.spectrum_width as f32 * row_width;
                let top = baseline - h * rise_span * shrink;
                let style = self.theme.heat(self.field.color(row, col));

                let px = inner.x + (x as u16).min(inner.width - 1);
                let y_top = top.max(0.0) as u16;
                let y_base = (baseline.max(0.0) as u16).min(inner.height - 1);
                for y in y_top..=y_base {
                    let ch = if y == y_top { '▄' } else { '█' };
                    buf[(px, inner.y + y)].set_char(ch).set_style(style);
                }
            }
        }
    }
}

impl Widget for HeightFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 2 {
            return;
        }

        for y in inner.y..inner.y + inner.height {
            for x in inner.x..inner.x + inner.width {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(self.theme.bg));
            }
        }

        match self.projection {
            FieldProjection::Waterfall => self.render_waterfall(inner, buf),
            FieldProjection::Surface => self.render_surface(inner, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_viz::{FieldDimensions, DEFAULT_HEIGHT_SCALE};

    fn field_with(rows: &[u8]) -> HeightField {
        let mut field = HeightField::new(FieldDimensions::new(4, 4), DEFAULT_HEIGHT_SCALE);
        for &v in rows {
            field.push(&[v; 4]);
        }
        field
    }

    #[test]
    fn test_waterfall_newest_at_bottom() {
        // Oldest 0, newest 255
        let field = field_with(&[0, 255]);
        let area = Rect::new(0, 0, 6, 6);
        let mut buf = Buffer::empty(area);
        HeightFieldWidget::new(&field, &Theme::default()).render(area, &mut buf);
        assert_eq!(buf[(1, 4)].symbol(), "█");
        assert_eq!(buf[(1, 3)].symbol(), " ");
    }

    #[test]
    fn test_surface_draws_newest_row() {
        let field = field_with(&[255]);
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        HeightFieldWidget::new(&field, &Theme::default())
            .projection(FieldProjection::Surface)
            .render(area, &mut buf);
        let bottom = (1..9).filter(|&x| buf[(x, 8)].symbol() == "█").count();
        assert!(bottom > 0);
    }

    #[test]
    fn test_empty_field_renders_blank() {
        let field = field_with(&[]);
        let area = Rect::new(0, 0, 8, 5);
        let mut buf = Buffer::empty(area);
        HeightFieldWidget::new(&field, &Theme::default())
            .projection(FieldProjection::Surface)
            .render(area, &mut buf);
        assert_eq!(buf[(3, 2)].symbol(), " ");
    }
}
