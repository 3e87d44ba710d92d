//! Settings persistence for Spectra - theme, language, device and view preferences

mod settings;

pub use settings::{Language, Settings, SettingsError, ThemeChoice};
