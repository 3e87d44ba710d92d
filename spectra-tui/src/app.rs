//! Application state management (Elm architecture)

use crate::i18n::{labels, Labels};
use crate::theme::Theme;
use spectra_analysis::RangeMode;
use spectra_input::Mode;
use spectra_settings::{Language, Settings, ThemeChoice};
use spectra_viz::{FrameToggles, PerformanceTier};

/// Which 3D view fills the lower panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View3d {
    /// Top-down scrolling history
    #[default]
    Waterfall,
    /// Height field seen from the front, older rows receding
    Surface,
    /// Circular bars
    Ring,
}

impl View3d {
    pub fn next(self) -> Self {
        match self {
            View3d::Waterfall => View3d::Surface,
            View3d::Surface => View3d::Ring,
            View3d::Ring => View3d::Waterfall,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View3d::Waterfall => "waterfall",
            View3d::Surface => "surface",
            View3d::Ring => "ring",
        }
    }
}

/// Message severity for the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Application state
pub struct AppState {
    // Measurement toggles (read by the frame pipeline)
    pub toggles: FrameToggles,
    /// Name of the active source, `None` when stopped
    pub source_name: Option<String>,
    pub demo: bool,

    // Analysis selections
    pub range: RangeMode,
    pub tier: PerformanceTier,
    pub input_device: Option<String>,

    // UI state
    pub mode: Mode,
    pub command_buffer: String,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub show_help: bool,
    pub teacher_mode: bool,
    pub show_3d: bool,
    pub view_3d: View3d,

    // Appearance
    pub theme_choice: ThemeChoice,
    pub theme: Theme,
    pub language: Language,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore persisted preferences
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            toggles: FrameToggles::default(),
            source_name: None,
            demo: false,
            range: settings.range,
            tier: settings.performance,
            input_device: settings.input_device.clone(),
            mode: Mode::Normal,
            command_buffer: String::new(),
            message: None,
            message_type: MessageType::Info,
            show_help: settings.help_open,
            teacher_mode: settings.teacher_mode,
            show_3d: true,
            view_3d: View3d::default(),
            theme_choice: settings.theme,
            theme: Theme::for_choice(settings.theme),
            language: settings.language,
        }
    }

    /// Snapshot of the preferences worth persisting
    pub fn settings(&self) -> Settings {
        Settings {
            theme: self.theme_choice,
            language: self.language,
            input_device: self.input_device.clone(),
            performance: self.tier,
            range: self.range,
            teacher_mode: self.teacher_mode,
            help_open: self.show_help,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        labels(self.language)
    }

    /// Set current mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode != Mode::Command {
            self.command_buffer.clear();
        }
    }

    /// Mark capture as running from `source`
    pub fn start(&mut self, source: impl Into<String>, demo: bool) {
        self.toggles.running = true;
        self.toggles.paused = false;
        self.source_name = Some(source.into());
        self.demo = demo;
    }

    /// Mark capture as stopped; freeze and pause reset with it
    pub fn stop(&mut self) {
        self.toggles = FrameToggles::default();
        self.source_name = None;
        self.demo = false;
    }

    pub fn toggle_freeze(&mut self) {
        self.toggles.frozen = !self.toggles.frozen;
    }

    pub fn toggle_pause(&mut self) {
        self.toggles.paused = !self.toggles.paused;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Teacher mode hides the history table
    pub fn toggle_teacher_mode(&mut self) {
        self.teacher_mode = !self.teacher_mode;
    }

    pub fn toggle_3d(&mut self) {
        self.show_3d = !self.show_3d;
    }

    pub fn cycle_view_3d(&mut self) {
        self.view_3d = self.view_3d.next();
    }

    pub fn set_theme(&mut self, choice: ThemeChoice) {
        self.theme_choice = choice;
        self.theme = Theme::for_choice(choice);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme_choice.toggle());
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }

    /// Clear any displayed message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_type = MessageType::Info;
    }

    /// Set a message to display (info level)
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Info;
    }

    /// Set a success message (green)
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Success;
    }

    /// Set a warning message (yellow)
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Warning;
    }

    /// Set an error message (red)
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Error;
    }
}

/// Main application wrapper
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            state: AppState::from_settings(settings),
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip_through_state() {
        let settings = Settings {
            theme: ThemeChoice::Light,
            language: Language::En,
            input_device: Some("Line In".into()),
            performance: PerformanceTier::High,
            range: RangeMode::Voice,
            teacher_mode: true,
            help_open: false,
        };
        let state = AppState::from_settings(&settings);
        assert_eq!(state.theme.name, "light");
        assert!(!state.show_help);
        assert_eq!(state.settings(), settings);
    }

    #[test]
    fn test_stop_resets_toggles() {
        let mut state = AppState::new();
        state.start("demo", true);
        state.toggle_freeze();
        state.toggle_pause();
        assert!(state.toggles.running && state.toggles.frozen && state.toggles.paused);

        state.stop();
        assert_eq!(state.toggles, FrameToggles::default());
        assert!(state.source_name.is_none());
        assert!(!state.demo);
    }

    #[test]
    fn test_start_clears_pause() {
        let mut state = AppState::new();
        state.toggle_pause();
        state.start("mic", false);
        assert!(!state.toggles.paused);
    }

    #[test]
    fn test_view_cycle_wraps() {
        let mut state = AppState::new();
        assert_eq!(state.view_3d, View3d::Waterfall);
        state.cycle_view_3d();
        state.cycle_view_3d();
        assert_eq!(state.view_3d, View3d::Ring);
        state.cycle_view_3d();
        assert_eq!(state.view_3d, View3d::Waterfall);
    }

    #[test]
    fn test_theme_and_language_toggles() {
        let mut state = AppState::new();
        state.toggle_theme();
        assert_eq!(state.theme_choice, ThemeChoice::Light);
        assert_eq!(state.theme.name, "light");
        state.toggle_language();
        assert_eq!(state.labels().stop, "x: Stop");
    }

    #[test]
    fn test_message_levels() {
        let mut state = AppState::new();
        state.set_error("boom");
        assert_eq!(state.message_type, MessageType::Error);
        state.clear_message();
        assert!(state.message.is_none());
        assert_eq!(state.message_type, MessageType::Info);
    }
}
