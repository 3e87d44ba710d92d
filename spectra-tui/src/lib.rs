//! Terminal UI for Spectra - widgets, themes, and layout
//!
//! Draws the readout, 2D bars and 3D views produced by the frame pipeline.

mod app;
mod i18n;
mod immersive;
mod theme;
pub mod widgets;

pub use app::{App, AppState, MessageType, View3d};
pub use i18n::{labels, Labels};
pub use immersive::{
    request_session, ImmersiveBackend, ImmersiveError, ImmersiveMode, ImmersiveSession,
    TerminalDisplay,
};
pub use theme::{Theme, DARK, LIGHT};
pub use widgets::status_bar::HelpWidget;
pub use widgets::{
    FieldProjection, HeightFieldWidget, HistoryWidget, LevelWidget, ReadoutWidget, RingWidget,
    SpectrumBarsWidget, StatusBarWidget, CELL_UNITS,
};
