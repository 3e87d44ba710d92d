//! Visualization mapping for Spectra
//!
//! Pure transforms from frequency snapshots to renderable primitives:
//! - Bars: flat 2D chart over the selected range
//! - Field: scrolling height/color grid for the 3D surface
//! - Ring: circular bars with an idle animation
//! - Pipeline: the per-frame driver tying interpretation and mapping together

mod bars;
mod color;
mod field;
mod pipeline;
mod ring;
mod tier;

pub use bars::{map_bars, map_range_bars, Bar, BAR_GAP, BAR_WIDTH_FACTOR};
pub use color::{heat_color, Rgb};
pub use field::{HeightField, DEFAULT_HEIGHT_SCALE};
pub use pipeline::{FrameOutcome, FramePipeline, FrameToggles, PipelineConfig, Readout};
pub use ring::{BarRing, RingBar, RingConfig};
pub use tier::{FieldDimensions, PerformanceTier};
