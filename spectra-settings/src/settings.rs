//! User settings persistence for Spectra
//!
//! Flat key=value file under the user config dir. Loading never fails:
//! a missing file gives defaults, and a bad value falls back to its
//! default with a warning.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use spectra_analysis::RangeMode;
use spectra_viz::PerformanceTier;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings: {0}")]
    Io(#[from] io::Error),
}

/// Color theme choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn toggle(self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeChoice::Dark => "dark",
            ThemeChoice::Light => "light",
        }
    }
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeChoice::Dark),
            "light" => Ok(ThemeChoice::Light),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Language::Es),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: ThemeChoice,
    pub language: Language,
    /// Preferred input device; `None` uses the system default
    pub input_device: Option<String>,
    pub performance: PerformanceTier,
    pub range: RangeMode,
    /// Teacher mode hides the history table
    pub teacher_mode: bool,
    pub help_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            language: Language::default(),
            input_device: None,
            performance: PerformanceTier::default(),
            range: RangeMode::default(),
            teacher_mode: false,
            help_open: true,
        }
    }
}

impl Settings {
    /// Load settings from the default location
    ///
    /// Returns defaults if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::settings_path())
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.serialize())?;
        Ok(())
    }

    /// Default settings file path
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spectra")
            .join("settings.txt")
    }

    fn parse(content: &str) -> Self {
        let mut settings = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line, "ignoring settings line without '='");
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "theme" => settings.theme = parse_or_default(key, value),
                "language" => settings.language = parse_or_default(key, value),
                "input_device" => {
                    settings.input_device = (!value.is_empty()).then(|| value.to_string());
                }
                "performance" => settings.performance = parse_or_default(key, value),
                "range" => settings.range = parse_or_default(key, value),
                "teacher_mode" => settings.teacher_mode = parse_flag(key, value, false),
                "help_open" => settings.help_open = parse_flag(key, value, true),
                other => tracing::debug!(key = other, "ignoring unknown settings key"),
            }
        }

        settings
    }

    fn serialize(&self) -> String {
        let mut lines = vec![
            "# Spectra settings".to_string(),
            format!("theme={}", self.theme),
            format!("language={}", self.language),
            format!("input_device={}", self.input_device.as_deref().unwrap_or("")),
            format!("performance={}", self.performance),
            format!("range={}", self.range),
            format!("teacher_mode={}", self.teacher_mode),
            format!("help_open={}", self.help_open),
        ];
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_or_default<T>(key: &str, value: &str) -> T
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    value.parse().unwrap_or_else(|e: T::Err| {
        tracing::warn!(key = key.trim(), value, error = %e, "invalid setting, using default");
        T::default()
    })
}

fn parse_flag(key: &str, value: &str, default: bool) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            tracing::warn!(key = key.trim(), value, "invalid flag, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(Settings::parse(""), Settings::default());
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.theme, ThemeChoice::Dark);
        assert_eq!(s.language, Language::Es);
        assert_eq!(s.range, RangeMode::Music);
        assert_eq!(s.performance, PerformanceTier::Balanced);
        assert!(!s.teacher_mode);
        assert!(s.help_open);
        assert!(s.input_device.is_none());
    }

    #[test]
    fn test_parse_all_keys() {
        let content = "# Comment\n\
                       theme=light\n\
                       language=en\n\
                       input_device=USB Mic\n\
                       performance=high\n\
                       range=voice\n\
                       teacher_mode=true\n\
                       help_open=false\n";
        let s = Settings::parse(content);
        assert_eq!(s.theme, ThemeChoice::Light);
        assert_eq!(s.language, Language::En);
        assert_eq!(s.input_device.as_deref(), Some("USB Mic"));
        assert_eq!(s.performance, PerformanceTier::High);
        assert_eq!(s.range, RangeMode::Voice);
        assert!(s.teacher_mode);
        assert!(!s.help_open);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let content = "theme=neon\nrange=ultrasonic\nperformance=\nhelp_open=maybe\nlanguage=fr\n";
        let s = Settings::parse(content);
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_garbage_lines_ignored() {
        let content = "not a setting\n=\nunknown=1\ntheme=light";
        let s = Settings::parse(content);
        assert_eq!(s.theme, ThemeChoice::Light);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let settings = Settings {
            theme: ThemeChoice::Light,
            language: Language::En,
            input_device: Some("Built-in Microphone".into()),
            performance: PerformanceTier::Low,
            range: RangeMode::Full,
            teacher_mode: true,
            help_open: false,
        };
        assert_eq!(Settings::parse(&settings.serialize()), settings);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("spectra-settings-test-{}", std::process::id()));
        let path = dir.join("nested").join("settings.txt");
        let settings = Settings {
            range: RangeMode::Voice,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("spectra-definitely-missing").join("settings.txt");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_toggles() {
        assert_eq!(ThemeChoice::Dark.toggle(), ThemeChoice::Light);
        assert_eq!(Language::En.toggle(), Language::Es);
    }
}
