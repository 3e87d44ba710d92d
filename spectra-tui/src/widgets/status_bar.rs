//! Status bar widget - mode indicator, command line and session summary

use crate::app::MessageType;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use spectra_input::Mode;

/// Widget for displaying the status bar with mode and command input
pub struct StatusBarWidget<'a> {
    mode: Mode,
    command_buffer: &'a str,
    message: Option<&'a str>,
    message_type: MessageType,
    idle_hint: &'a str,
    summary: String,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(mode: Mode, command_buffer: &'a str, theme: &'a Theme) -> Self {
        Self {
            mode,
            command_buffer,
            message: None,
            message_type: MessageType::Info,
            idle_hint: "Ready. Press ? for help, : for commands",
            summary: String::new(),
            theme,
        }
    }

    pub fn message(mut self, msg: Option<&'a str>, msg_type: MessageType) -> Self {
        self.message = msg;
        self.message_type = msg_type;
        self
    }

    /// Text shown when there is no message
    pub fn idle_hint(mut self, hint: &'a str) -> Self {
        self.idle_hint = hint;
        self
    }

    /// Right-hand summary, e.g. source, range and tier
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    fn mode_string(&self) -> (&'static str, Style) {
        match self.mode {
            Mode::Normal => (self.mode.display_name(), self.theme.highlight()),
            Mode::Command => (self.mode.display_name(), Style::from(self.theme.accent)),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let summary_width = (self.summary.chars().count() as u16 + 1).min(area.width / 2);
        let chunks = Layout::horizontal([
            Constraint::Length(10), // Mode indicator
            Constraint::Min(20),    // Command/message area
            Constraint::Length(summary_width),
        ])
        .split(area);

        let (mode_text, mode_style) = self.mode_string();
        let mode_line = Line::from(vec![
            Span::raw("["),
            Span::styled(mode_text, mode_style),
            Span::raw("]"),
        ]);
        Paragraph::new(mode_line).render(chunks[0], buf);

        let content = if self.mode == Mode::Command {
            Line::from(vec![
                Span::styled(":", Style::from(self.theme.accent)),
                Span::styled(self.command_buffer, self.theme.normal()),
                Span::styled("█", self.theme.highlight()), // Cursor
            ])
        } else if let Some(msg) = self.message {
            let msg_style = match self.message_type {
                MessageType::Info => self.theme.dim(),
                MessageType::Success => Style::from(self.theme.accent),
                MessageType::Warning => Style::default().fg(self.theme.warning),
                MessageType::Error => Style::default().fg(self.theme.danger),
            };
            Line::from(Span::styled(msg, msg_style))
        } else {
            Line::from(Span::styled(self.idle_hint, self.theme.dim()))
        };
        Paragraph::new(content).render(chunks[1], buf);

        let summary_line = Line::from(Span::styled(self.summary, self.theme.dim()));
        Paragraph::new(summary_line).render(chunks[2], buf);
    }
}

/// Help panel listing keys and commands
pub struct HelpWidget<'a> {
    theme: &'a Theme,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn help_lines() -> Vec<&'static str> {
        vec![
            "╔══════════════════════════════════╗",
            "║ MEASUREMENT                      ║",
            "║   s        Start capture         ║",
            "║   x        Stop                  ║",
            "║   p/Space  Pause / resume        ║",
            "║   f        Freeze max            ║",
            "║   e        Export CSV            ║",
            "║   D        Demo tone sweep       ║",
            "╠──────────────────────────────────╣",
            "║ VIEW                             ║",
            "║   3        Toggle 3D panel       ║",
            "║   v        Waterfall/surface/ring║",
            "║   m        Teacher/student mode  ║",
            "║   t        Dark / light theme    ║",
            "║   l        Español / English     ║",
            "║   a / A    AR / VR session       ║",
            "╠──────────────────────────────────╣",
            "║ ANALYSIS                         ║",
            "║   r        Range full/voice/music║",
            "║   P        Performance tier      ║",
            "║   d        Next input device     ║",
            "╠──────────────────────────────────╣",
            "║ COMMANDS (:)                     ║",
            "║   :export [path]                 ║",
            "║   :range full|voice|music        ║",
            "║   :perf low|balanced|high        ║",
            "║   :device <name>                 ║",
            "║   :theme dark|light              ║",
            "║   :lang es|en                    ║",
            "║   :q                             ║",
            "╠══════════════════════════════════╣",
            "║  ? close help     Ctrl-Q quit    ║",
            "╚══════════════════════════════════╝",
        ]
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear background
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(self.theme.normal());
            }
        }

        for (i, line) in Self::help_lines()
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            for (j, ch) in line.chars().enumerate() {
                let x = area.x + j as u16;
                if x >= area.x + area.width {
                    break;
                }

                let style = if matches!(ch, '║' | '╔' | '╗' | '╚' | '╝' | '═' | '╠' | '╣' | '─') {
                    self.theme.border()
                } else {
                    self.theme.normal()
                };

                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}
