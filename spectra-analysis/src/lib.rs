//! Spectrum interpretation for Spectra
//!
//! Turns byte frequency snapshots into readings: dominant frequency,
//! musical note, running peak, loudness, and an exportable history log.

mod history;
mod interpreter;
mod note;
mod range;

pub use history::{parse_csv, ExportRow, HistoryError, HistoryLog, CSV_HEADER, DEFAULT_DISPLAY_CAP};
pub use interpreter::{
    dominant_bin, Frame, InterpreterState, Loudness, PeakTracker, Reading, SpectrumInterpreter,
    DEFAULT_LOUDNESS_SCALE,
};
pub use note::{note_label, Note, NO_NOTE};
pub use range::{
    bin_to_frequency, bin_window, frequency_to_bin, RangeLimits, RangeMode, SamplingParams,
    DEFAULT_FFT_SIZE,
};
