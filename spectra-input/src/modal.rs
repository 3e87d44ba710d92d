//! Modal state machine for keyboard input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::commands::{Command, Language, PerformanceTier, RangeMode, ThemeChoice};

/// Input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Command,
}

impl Mode {
    /// Get display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Command => "COMMAND",
        }
    }
}

/// Handles keyboard input and converts to commands
pub struct InputHandler {
    mode: Mode,
    command_buffer: String,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            command_buffer: String::new(),
        }
    }

    /// Get current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get current command buffer (for display)
    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    /// Handle a key event and return a command if applicable
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.mode {
            Mode::Normal => self.handle_normal_mode(key),
            Mode::Command => self.handle_command_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => Some(Command::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(':') => {
                self.mode = Mode::Command;
                self.command_buffer.clear();
                Some(Command::EnterCommandMode)
            }
            KeyCode::Char('?') => Some(Command::ToggleHelp),

            // Capture
            KeyCode::Char('s') => Some(Command::Start),
            KeyCode::Char('x') => Some(Command::Stop),
            KeyCode::Char('D') => Some(Command::ToggleDemo),

            // Measurement
            KeyCode::Char('f') => Some(Command::ToggleFreeze),
            KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::TogglePause),
            KeyCode::Char('e') => Some(Command::Export(None)),

            // View
            KeyCode::Char('m') => Some(Command::ToggleTeacherMode),
            KeyCode::Char('3') => Some(Command::Toggle3d),
            KeyCode::Char('v') => Some(Command::CycleView3d),

            // Analysis
            KeyCode::Char('r') => Some(Command::CycleRange),
            KeyCode::Char('P') => Some(Command::CyclePerformance),
            KeyCode::Char('d') => Some(Command::CycleDevice),

            // Appearance
            KeyCode::Char('t') => Some(Command::ToggleTheme),
            KeyCode::Char('l') => Some(Command::ToggleLanguage),

            // Immersive
            KeyCode::Char('a') => Some(Command::BeginAr),
            KeyCode::Char('A') => Some(Command::BeginVr),

            KeyCode::Esc => Some(Command::Cancel),

            _ => None,
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Enter => {
                let cmd = self.parse_command();
                self.mode = Mode::Normal;
                let buffer = std::mem::take(&mut self.command_buffer);
                cmd.or(Some(Command::ExecuteCommand(buffer)))
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.command_buffer.clear();
                Some(Command::EnterNormalMode)
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
                if self.command_buffer.is_empty() {
                    self.mode = Mode::Normal;
                    Some(Command::EnterNormalMode)
                } else {
                    None
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
                None
            }
            _ => None,
        }
    }

    fn parse_command(&self) -> Option<Command> {
        let input = self.command_buffer.trim();
        let (name, arg) = match input.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, unquote(arg.trim())),
            None => (input, ""),
        };

        match (name, arg) {
            ("q" | "quit", "") => Some(Command::Quit),
            ("help", "") => Some(Command::ToggleHelp),
            ("start", "") => Some(Command::Start),
            ("stop", "") => Some(Command::Stop),
            ("demo", "") => Some(Command::ToggleDemo),
            ("export", "") => Some(Command::Export(None)),
            ("export", path) => Some(Command::Export(Some(path.into()))),
            ("range", "") => Some(Command::CycleRange),
            ("range", mode) => mode.parse::<RangeMode>().ok().map(Command::SetRange),
            ("perf", "") => Some(Command::CyclePerformance),
            ("perf", tier) => tier.parse::<PerformanceTier>().ok().map(Command::SetPerformance),
            ("device", "") => Some(Command::CycleDevice),
            ("device", device) => Some(Command::SetDevice(device.to_string())),
            ("theme", "") => Some(Command::ToggleTheme),
            ("theme", theme) => theme.parse::<ThemeChoice>().ok().map(Command::SetTheme),
            ("lang", "") => Some(Command::ToggleLanguage),
            ("lang", lang) => lang.parse::<Language>().ok().map(Command::SetLanguage),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip one pair of surrounding quotes
fn unquote(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
