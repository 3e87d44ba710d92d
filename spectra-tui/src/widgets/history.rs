//! Recent readings table

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use spectra_analysis::{HistoryLog, NO_NOTE};

/// Most recent readings, newest first, limited to the log's display cap
pub struct HistoryWidget<'a> {
    log: &'a HistoryLog,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(log: &'a HistoryLog, theme: &'a Theme) -> Self {
        Self {
            log,
            theme,
            title: " HISTORY ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for HistoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.title()));

        let header = Line::from(Span::styled(
            format!("{:>9} {:>9} {:>9} {:>5}", "ms", "Hz", "max", "note"),
            self.theme.dim(),
        ));

        let mut lines = vec![header];
        lines.extend(self.log.recent().map(|r| {
            let note = r
                .note
                .map(|n| n.to_string())
                .unwrap_or_else(|| NO_NOTE.to_string());
            Line::from(vec![
                Span::styled(format!("{:>9}", r.timestamp_ms), self.theme.dim()),
                Span::styled(format!(" {:>9.1}", r.frequency_hz), self.theme.value()),
                Span::styled(format!(" {:>9.1}", r.frozen_max_hz), self.theme.normal()),
                Span::styled(format!(" {:>5}", note), self.theme.normal()),
            ])
        }));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
