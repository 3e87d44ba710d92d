//! Performance tiers and the height-field dimensions they select

use std::fmt;
use std::str::FromStr;

/// Height-field grid size: spectrum width x history depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDimensions {
    /// Bins per row
    pub spectrum_width: usize,
    /// Rows of history
    pub history_depth: usize,
}

impl FieldDimensions {
    pub const fn new(spectrum_width: usize, history_depth: usize) -> Self {
        Self {
            spectrum_width,
            history_depth,
        }
    }

    /// Total cells in the grid
    pub fn cells(&self) -> usize {
        self.spectrum_width * self.history_depth
    }
}

/// Rendering cost preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceTier {
    Low,
    #[default]
    Balanced,
    High,
}

impl PerformanceTier {
    pub fn dimensions(self) -> FieldDimensions {
        match self {
            PerformanceTier::Low => FieldDimensions::new(64, 50),
            PerformanceTier::Balanced => FieldDimensions::new(96, 80),
            PerformanceTier::High => FieldDimensions::new(128, 100),
        }
    }

    /// Cycle Low -> Balanced -> High -> Low
    pub fn next(self) -> Self {
        match self {
            PerformanceTier::Low => PerformanceTier::Balanced,
            PerformanceTier::Balanced => PerformanceTier::High,
            PerformanceTier::High => PerformanceTier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceTier::Low => "low",
            PerformanceTier::Balanced => "balanced",
            PerformanceTier::High => "high",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PerformanceTier::Low),
            "balanced" | "medium" | "normal" => Ok(PerformanceTier::Balanced),
            "high" => Ok(PerformanceTier::High),
            other => Err(format!("unknown performance tier: {}", other)),
        }
    }
}
