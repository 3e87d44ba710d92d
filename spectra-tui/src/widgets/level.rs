//! Input level meter

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use spectra_analysis::Loudness;

/// Horizontal meter filled to the loudness percentage
///
/// The caption reads the raw RMS of the byte snapshot with a "dB" suffix;
/// it is a relative level, not a calibrated decibel value. Silence reads `-- dB`.
pub struct LevelWidget<'a> {
    loudness: Loudness,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> LevelWidget<'a> {
    pub fn new(loudness: Loudness, theme: &'a Theme) -> Self {
        Self {
            loudness,
            theme,
            title: " LEVEL ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn caption(&self) -> String {
        if self.loudness.rms > 0.0 {
            format!("{:.0} dB", self.loudness.rms)
        } else {
            "-- dB".to_string()
        }
    }
}

impl Widget for LevelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 10 || inner.height < 1 {
            return;
        }

        let caption = self.caption();
        let caption_width = caption.chars().count() as u16 + 1;
        let meter_width = inner.width.saturating_sub(caption_width + 2);
        let y = inner.y + inner.height / 2;

        // Brackets
        buf[(inner.x, y)].set_char('┃').set_style(self.theme.dim());
        buf[(inner.x + meter_width + 1, y)]
            .set_char('┃')
            .set_style(self.theme.dim());

        let fraction = (self.loudness.percent / 100.0).clamp(0.0, 1.0);
        let filled = (fraction * meter_width as f32).round() as u16;
        for i in 0..meter_width {
            let x = inner.x + 1 + i;
            if i < filled {
                let position = (i + 1) as f32 / meter_width as f32;
                buf[(x, y)]
                    .set_char('█')
                    .set_style(self.theme.meter_style(position));
            } else {
                buf[(x, y)].set_char('·').set_style(self.theme.dim());
            }
        }

        let caption_x = inner.x + meter_width + 3;
        for (i, ch) in caption.chars().enumerate() {
            let x = caption_x + i as u16;
            if x >= inner.x + inner.width {
                break;
            }
            buf[(x, y)].set_char(ch).set_style(self.theme.value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_caption_shows_rounded_rms() {
        let loudness = Loudness {
            rms: 63.6,
            percent: 29.9,
        };
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        LevelWidget::new(loudness, &Theme::default()).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("64 dB"));
    }

    #[test]
    fn test_silence_shows_placeholder() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        LevelWidget::new(Loudness::default(), &Theme::default()).render(area, &mut buf);
        let text = row_text(&buf, 1);
        assert!(text.contains("-- dB"));
        assert!(!text.contains("0 dB"));
    }

    #[test]
    fn test_full_level_fills_meter() {
        let loudness = Loudness {
            rms: 255.0,
            percent: 100.0,
        };
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        LevelWidget::new(loudness, &Theme::default()).render(area, &mut buf);
        let text = row_text(&buf, 1);
        assert!(!text.contains('·'));
        assert!(text.contains('█'));
    }
}
