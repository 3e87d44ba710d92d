//! Command definitions for Spectra

use std::path::PathBuf;

pub use spectra_analysis::RangeMode;
pub use spectra_settings::{Language, ThemeChoice};
pub use spectra_viz::PerformanceTier;

/// Commands that can be dispatched from input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Capture
    Start,
    Stop,
    ToggleDemo,

    // Measurement
    ToggleFreeze,
    TogglePause,

    // History
    Export(Option<PathBuf>),

    // View
    ToggleTeacherMode,
    Toggle3d,
    CycleView3d,
    ToggleHelp,

    // Analysis settings
    CycleRange,
    SetRange(RangeMode),
    CyclePerformance,
    SetPerformance(PerformanceTier),

    // Input device
    CycleDevice,
    SetDevice(String),

    // Appearance
    ToggleTheme,
    SetTheme(ThemeChoice),
    ToggleLanguage,
    SetLanguage(Language),

    // Immersive sessions
    BeginAr,
    BeginVr,

    // Mode changes
    EnterCommandMode,
    EnterNormalMode,

    // Command mode input that didn't parse
    ExecuteCommand(String),

    // Application
    Quit,
    Cancel,
}
