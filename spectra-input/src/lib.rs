//! Modal keyboard input handling for Spectra

mod commands;
mod modal;

pub use commands::{Command, Language, PerformanceTier, RangeMode, ThemeChoice};
pub use modal::{InputHandler, Mode};
