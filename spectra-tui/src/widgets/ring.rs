//! Bar ring seen from above: each bar grows outward from the circle

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use spectra_viz::{heat_color, BarRing};

/// Terminal cells are roughly twice as tall as wide
const CELL_ASPECT: f32 = 2.0;

pub struct RingWidget<'a> {
    ring: &'a BarRing,
    heights: &'a [f32],
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> RingWidget<'a> {
    pub fn new(ring: &'a BarRing, heights: &'a [f32], theme: &'a Theme) -> Self {
        Self {
            ring,
            heights,
            theme,
            title: " RING ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for RingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 6 || inner.height < 3 {
            return;
        }

        for y in inner.y..inner.y + inner.height {
            for x in inner.x..inner.x + inner.width {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(self.theme.bg));
            }
        }

        let cfg = self.ring.config();
        let outer = cfg.radius + cfg.base_height + cfg.height_range;
        // World units -> cells, fitting the outermost possible tip
        let half_w = (inner.width as f32 - 1.0) / 2.0;
        let half_h = (inner.height as f32 - 1.0) / 2.0;
        let scale = (half_w / CELL_ASPECT).min(half_h) / outer.max(f32::EPSILON);
        let cx = inner.x as f32 + half_w;
        let cy = inner.y as f32 + half_h;

        let plot = |wx: f32, wz: f32| -> Option<(u16, u16)> {
            let px = (cx + wx * scale * CELL_ASPECT).round();
            let py = (cy - wz * scale).round();
            let inside = px >= inner.x as f32
                && px < (inner.x + inner.width) as f32
                && py >= inner.y as f32
                && py < (inner.y + inner.height) as f32;
            inside.then_some((px as u16, py as u16))
        };

        for (bar, &h) in self.ring.positions().iter().zip(self.heights) {
            let (dx, dz) = (bar.angle.cos(), bar.angle.sin());
            let level = ((h - cfg.base_height) / cfg.height_range.max(f32::EPSILON)).clamp(0.0, 1.0);
            let style = self.theme.heat(heat_color(level));

            // Trace from the circle to the tip, one sample per half cell
            let steps = ((h * scale * CELL_ASPECT).ceil() as usize * 2).max(1);
            for step in 0..=steps {
                let r = cfg.radius + h * step as f32 / steps as f32;
                if let Some((px, py)) = plot(dx * r, dz * r) {
                    let ch = if step == steps { '●' } else { '·' };
                    buf[(px, py)].set_char(ch).set_style(style);
                }
            }
        }
    }
}
