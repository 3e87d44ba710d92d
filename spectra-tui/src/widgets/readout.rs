//! Frequency, note and peak readout

use crate::i18n::Labels;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use spectra_analysis::NO_NOTE;
use spectra_viz::{FrameToggles, Readout};

pub struct ReadoutWidget<'a> {
    readout: &'a Readout,
    samples: usize,
    toggles: FrameToggles,
    labels: &'a Labels,
    theme: &'a Theme,
}

impl<'a> ReadoutWidget<'a> {
    pub fn new(readout: &'a Readout, labels: &'a Labels, theme: &'a Theme) -> Self {
        Self {
            readout,
            samples: 0,
            toggles: FrameToggles::default(),
            labels,
            theme,
        }
    }

    /// Number of readings recorded this session
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn toggles(mut self, toggles: FrameToggles) -> Self {
        self.toggles = toggles;
        self
    }

    fn frequency_text(&self) -> String {
        match self.readout.frequency_hz {
            Some(hz) => format!("{:.1} Hz", hz),
            None => "-- Hz".to_string(),
        }
    }

    fn note_text(&self) -> String {
        self.readout
            .note
            .map(|n| n.to_string())
            .unwrap_or_else(|| NO_NOTE.to_string())
    }

    fn state_text(&self) -> Option<&'static str> {
        if !self.toggles.running {
            Some(self.labels.stopped)
        } else if self.toggles.paused {
            Some(self.labels.paused)
        } else {
            None
        }
    }
}

impl Widget for ReadoutWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = vec![Span::styled(
            format!(" {} ", self.labels.frequency.to_uppercase()),
            self.theme.title(),
        )];
        if let Some(state) = self.state_text() {
            title.push(Span::styled(format!("[{}] ", state), self.theme.dim()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Line::from(title));

        let label = |text: &str| Span::styled(format!("{:<10}", text), self.theme.dim());

        let max_style = if self.toggles.frozen {
            self.theme.highlight()
        } else {
            self.theme.value()
        };
        let mut max_line = vec![
            label(self.labels.max),
            Span::styled(format!("{:.1} Hz", self.readout.frozen_max_hz), max_style),
        ];
        if self.toggles.frozen {
            max_line.push(Span::styled(format!(" ({})", self.labels.frozen), self.theme.dim()));
        }

        let lines = vec![
            Line::from(vec![
                label(self.labels.frequency),
                Span::styled(self.frequency_text(), self.theme.value()),
            ]),
            Line::from(vec![
                label(self.labels.note),
                Span::styled(self.note_text(), self.theme.value()),
            ]),
            Line::from(max_line),
            Line::from(vec![
                label(self.labels.samples),
                Span::styled(self.samples.to_string(), self.theme.normal()),
            ]),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
