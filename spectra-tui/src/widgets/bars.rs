//! 2D spectrum bar chart

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use spectra_viz::{Bar, Rgb};

/// Characters for vertical bar rendering (8 levels)
const BAR_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Canvas units per terminal cell, both axes
pub const CELL_UNITS: u16 = 8;

/// Widget drawing bars laid out by [`spectra_viz::map_bars`]
///
/// Bars must be mapped onto a canvas of `inner.width * CELL_UNITS` by
/// `inner.height * CELL_UNITS` units; see [`SpectrumBarsWidget::canvas_size`].
pub struct SpectrumBarsWidget<'a> {
    bars: &'a [Bar],
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> SpectrumBarsWidget<'a> {
    pub fn new(bars: &'a [Bar], theme: &'a Theme) -> Self {
        Self {
            bars,
            theme,
            title: " SPECTRUM ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Canvas size for a widget occupying `area`
    pub fn canvas_size(area: Rect) -> (f32, f32) {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        (
            (inner.width * CELL_UNITS) as f32,
            (inner.height * CELL_UNITS) as f32,
        )
    }

    /// Tallest bar per column, in eighths, with its color
    fn columns(&self, width: u16) -> Vec<Option<(usize, Rgb)>> {
        let mut columns: Vec<Option<(usize, Rgb)>> = vec![None; width as usize];
        for bar in self.bars {
            let first = (bar.x / CELL_UNITS as f32) as usize;
            let last = ((bar.x + bar.width) / CELL_UNITS as f32) as usize;
            let eighths = bar.height.round() as usize;
            for col in first..=last.min(first + 1) {
                let Some(slot) = columns.get_mut(col) else {
                    break;
                };
                if slot.map_or(true, |(h, _)| eighths > h) {
                    *slot = Some((eighths, bar.color));
                }
            }
        }
        columns
    }
}

impl Widget for SpectrumBarsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height < 1 {
            return;
        }

        for y in inner.y..inner.y + inner.height {
            for x in inner.x..inner.x + inner.width {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(self.theme.bg));
            }
        }

        let height = inner.height as usize;
        for (col, entry) in self.columns(inner.width).into_iter().enumerate() {
            let Some((eighths, color)) = entry else {
                continue;
            };
            let full = eighths / 8;
            let partial = eighths % 8;
            let style = self.theme.heat(color);
            let x = inner.x + col as u16;

            // Render from bottom to top
            for row in 0..height {
                let ch = if row < full {
                    '█'
                } else if row == full && partial > 0 {
                    BAR_CHARS[partial]
                } else {
                    break;
                };
                let y = inner.y + inner.height - 1 - row as u16;
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}
