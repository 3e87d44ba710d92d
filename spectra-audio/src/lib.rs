//! Audio input for Spectra
//!
//! Everything that produces frequency snapshots:
//! - Analyser: windowed FFT with smoothing, mapped to byte levels
//! - Capture: cpal microphone input feeding the analyser
//! - Demo: deterministic synthetic sweep for running without a device

mod analyser;
mod capture;
mod demo;
mod source;

pub use analyser::{ByteAnalyser, DEFAULT_MAX_DB, DEFAULT_MIN_DB, DEFAULT_SMOOTHING};
pub use capture::{list_input_devices, CaptureError, MicCapture};
pub use demo::DemoSource;
pub use source::SpectrumSource;
