//! Dark and light themes for Spectra

use ratatui::style::{Color, Modifier, Style};
use spectra_settings::ThemeChoice;
use spectra_viz::Rgb;

/// Theme configuration for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Primary foreground color (text, borders)
    pub fg: Color,
    /// Dimmed foreground (secondary text)
    pub fg_dim: Color,
    /// Background color
    pub bg: Color,
    /// Highlight color (selected items, active elements)
    pub highlight: Color,
    /// Accent color (readout values, meters)
    pub accent: Color,
    /// Warning color
    pub warning: Color,
    /// Error/danger color
    pub danger: Color,
}

impl Theme {
    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => DARK,
            ThemeChoice::Light => LIGHT,
        }
    }

    /// Get style for normal text
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for dimmed text
    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Large readout values
    pub fn value(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for meters based on level (0.0 - 1.0)
    pub fn meter_style(&self, level: f32) -> Style {
        let color = if level > 0.9 {
            self.danger
        } else if level > 0.75 {
            self.warning
        } else {
            self.accent
        };
        Style::default().fg(color)
    }

    /// Style for a heat-mapped cell
    pub fn heat(&self, rgb: Rgb) -> Style {
        let (r, g, b) = rgb.to_rgb8();
        Style::default().fg(Color::Rgb(r, g, b))
    }
}

/// Dark theme (default)
pub const DARK: Theme = Theme {
    name: "dark",
    fg: Color::Rgb(226, 232, 240),        // slate-200
    fg_dim: Color::Rgb(100, 116, 139),    // slate-500
    bg: Color::Rgb(2, 6, 23),             // #020617, chart background
    highlight: Color::Rgb(56, 189, 248),  // sky-400
    accent: Color::Rgb(34, 197, 94),      // green-500
    warning: Color::Rgb(250, 204, 21),    // yellow-400
    danger: Color::Rgb(248, 113, 113),    // red-400
};

/// Light theme
pub const LIGHT: Theme = Theme {
    name: "light",
    fg: Color::Rgb(15, 23, 42),           // slate-900
    fg_dim: Color::Rgb(100, 116, 139),    // slate-500
    bg: Color::Rgb(248, 250, 252),        // slate-50
    highlight: Color::Rgb(2, 132, 199),   // sky-600
    accent: Color::Rgb(22, 163, 74),      // green-600
    warning: Color::Rgb(202, 138, 4),     // yellow-600
    danger: Color::Rgb(220, 38, 38),      // red-600
};

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}
