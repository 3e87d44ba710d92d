//! UI Widgets for Spectra

mod bars;
mod field;
mod history;
mod level;
mod readout;
mod ring;
pub mod status_bar;

pub use bars::{SpectrumBarsWidget, CELL_UNITS};
pub use field::{FieldProjection, HeightFieldWidget};
pub use history::HistoryWidget;
pub use level::LevelWidget;
pub use readout::ReadoutWidget;
pub use ring::RingWidget;
pub use status_bar::StatusBarWidget;
