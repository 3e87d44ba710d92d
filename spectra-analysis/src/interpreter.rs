//! Per-frame spectrum interpretation
//!
//! Turns one frequency snapshot into a [`Reading`]: dominant frequency,
//! nearest note, running peak and a loudness estimate. The interpreter
//! itself is immutable configuration; all state that survives between
//! frames lives in [`InterpreterState`] and is threaded through
//! [`SpectrumInterpreter::interpret`].

use crate::note::Note;
use crate::range::{bin_to_frequency, RangeLimits, SamplingParams};
use std::ops::Range;

/// Default linear factor mapping RMS/255 to a display percentage
pub const DEFAULT_LOUDNESS_SCALE: f32 = 120.0;

/// Index of the strongest bin inside `window`
///
/// Ties resolve to the lowest index. Returns `None` when the window is
/// empty (after clamping to the snapshot) or every value in it is zero.
pub fn dominant_bin(snapshot: &[u8], window: Range<usize>) -> Option<usize> {
    let end = window.end.min(snapshot.len());
    let start = window.start.min(end);

    let mut best: Option<(usize, u8)> = None;
    for (i, &value) in snapshot[start..end].iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((start + i, value)),
        }
    }

    match best {
        Some((index, value)) if value > 0 => Some(index),
        _ => None,
    }
}

/// RMS level of a snapshot and its display percentage
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Loudness {
    /// Root-mean-square of all bins (0-255)
    pub rms: f32,
    /// `min(100, rms / 255 * scale)`
    pub percent: f32,
}

impl Loudness {
    /// Compute over every bin of the snapshot, ignoring any range restriction
    pub fn from_snapshot(snapshot: &[u8], scale: f32) -> Self {
        if snapshot.is_empty() {
            return Self::default();
        }
        let sum: f32 = snapshot.iter().map(|&v| (v as f32) * (v as f32)).sum();
        let rms = (sum / snapshot.len() as f32).sqrt();
        let percent = (rms / 255.0 * scale).clamp(0.0, 100.0);
        Self { rms, percent }
    }
}

/// Running maximum of dominant frequency with a freeze toggle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakTracker {
    max_hz: f32,
}

impl PeakTracker {
    /// Current held maximum in Hz
    pub fn max_hz(&self) -> f32 {
        self.max_hz
    }

    /// Next tracker state after observing `freq`
    ///
    /// While `frozen` the value is held regardless of input.
    pub fn next(self, freq: f32, frozen: bool) -> Self {
        if frozen || freq.is_nan() || freq <= self.max_hz {
            self
        } else {
            Self { max_hz: freq }
        }
    }
}

/// One interpreted frame
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Milliseconds since the session clock started
    pub timestamp_ms: u64,
    /// Dominant frequency in Hz (always finite and > 0)
    pub frequency_hz: f32,
    /// Nearest note; `None` only in parsed logs carrying the sentinel
    pub note: Option<Note>,
    /// Running peak at the time of this reading
    pub frozen_max_hz: f32,
    pub loudness: Loudness,
}

/// State carried between frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterpreterState {
    pub peak: PeakTracker,
}

/// Result of interpreting one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: InterpreterState,
    /// `None` when the snapshot is degenerate (silent or empty window)
    pub reading: Option<Reading>,
    /// Level is computed even when no reading is produced
    pub loudness: Loudness,
}

/// Interpreter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumInterpreter {
    pub params: SamplingParams,
    pub limits: RangeLimits,
    pub loudness_scale: f32,
}

impl SpectrumInterpreter {
    pub fn new(params: SamplingParams) -> Self {
        Self {
            params,
            limits: RangeLimits::default(),
            loudness_scale: DEFAULT_LOUDNESS_SCALE,
        }
    }

    pub fn with_limits(mut self, limits: RangeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_loudness_scale(mut self, scale: f32) -> Self {
        self.loudness_scale = scale;
        self
    }

    /// Dominant frequency of a snapshot inside the selected range
    pub fn dominant_frequency(&self, snapshot: &[u8]) -> Option<f32> {
        let window = self.params.window(&self.limits, snapshot.len());
        let bin = dominant_bin(snapshot, window)?;
        let freq = bin_to_frequency(bin, self.params.sample_rate, self.params.fft_size);
        (freq.is_finite() && freq > 0.0).then_some(freq)
    }

    /// Compute the next state and reading from the previous state and a snapshot
    ///
    /// A degenerate snapshot leaves the state untouched so the previous
    /// display values stay valid.
    pub fn interpret(
        &self,
        state: &InterpreterState,
        snapshot: &[u8],
        timestamp_ms: u64,
        frozen: bool,
    ) -> Frame {
        let loudness = Loudness::from_snapshot(snapshot, self.loudness_scale);

        let Some(frequency_hz) = self.dominant_frequency(snapshot) else {
            return Frame {
                state: *state,
                reading: None,
                loudness,
            };
        };

        let peak = state.peak.next(frequency_hz, frozen);
        let reading = Reading {
            timestamp_ms,
            frequency_hz,
            note: Note::from_frequency(frequency_hz),
            frozen_max_hz: peak.max_hz(),
            loudness,
        };

        Frame {
            state: InterpreterState { peak },
            reading: Some(reading),
            loudness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::RangeMode;

    fn full_range() -> SpectrumInterpreter {
        SpectrumInterpreter::new(SamplingParams::new(44_100.0, 2048, RangeMode::Full))
    }

    #[test]
    fn test_dominant_bin_picks_max() {
        let snapshot = [0u8, 0, 50, 200, 10, 0];
        assert_eq!(dominant_bin(&snapshot, 0..snapshot.len()), Some(3));
    }

    #[test]
    fn test_dominant_bin_ties_resolve_low() {
        let snapshot = [0u8, 90, 10, 90, 90, 5];
        assert_eq!(dominant_bin(&snapshot, 0..snapshot.len()), Some(1));
        // Tie inside a restricted window resolves to the window's lowest index
        assert_eq!(dominant_bin(&snapshot, 2..6), Some(3));
    }

    #[test]
    fn test_dominant_bin_degenerate() {
        assert_eq!(dominant_bin(&[0u8; 16], 0..16), None);
        assert_eq!(dominant_bin(&[5u8; 16], 4..4), None);
        assert_eq!(dominant_bin(&[], 0..10), None);
        // Window beyond the snapshot is clamped
        assert_eq!(dominant_bin(&[1u8, 2, 3], 10..20), None);
    }

    #[test]
    fn test_example_snapshot_frequency() {
        let mut snapshot = vec![0u8; 1024];
        snapshot[2] = 50;
        snapshot[3] = 200;
        snapshot[4] = 10;
        let freq = full_range().dominant_frequency(&snapshot).unwrap();
        assert!((freq - 64.6).abs() < 0.05, "got {}", freq);
    }

    #[test]
    fn test_bin_zero_is_not_a_reading() {
        let mut snapshot = vec![0u8; 1024];
        snapshot[0] = 255;
        assert_eq!(full_range().dominant_frequency(&snapshot), None);
    }

    #[test]
    fn test_range_restricts_search() {
        let mut snapshot = vec![0u8; 1024];
        snapshot[1] = 255; // 21.5 Hz, below both restricted ranges
        snapshot[20] = 100; // ~430 Hz
        let interp = SpectrumInterpreter::new(SamplingParams::new(44_100.0, 2048, RangeMode::Voice));
        let freq = interp.dominant_frequency(&snapshot).unwrap();
        assert!((freq - 430.66).abs() < 0.1, "got {}", freq);
    }

    #[test]
    fn test_loudness_rms_and_clamp() {
        let quiet = Loudness::from_snapshot(&[0u8; 8], DEFAULT_LOUDNESS_SCALE);
        assert_eq!(quiet.rms, 0.0);
        assert_eq!(quiet.percent, 0.0);

        let loud = Loudness::from_snapshot(&[255u8; 8], DEFAULT_LOUDNESS_SCALE);
        assert!((loud.rms - 255.0).abs() < 1e-3);
        assert_eq!(loud.percent, 100.0);

        // rms of [3, 4] = sqrt(12.5)
        let mixed = Loudness::from_snapshot(&[3u8, 4], 255.0);
        assert!((mixed.rms - 12.5f32.sqrt()).abs() < 1e-4);
        assert!((mixed.percent - 12.5f32.sqrt()).abs() < 1e-4);

        assert_eq!(Loudness::from_snapshot(&[], 120.0), Loudness::default());
    }

    #[test]
    fn test_peak_tracker_monotonic_unfrozen() {
        let mut peak = PeakTracker::default();
        let mut last = 0.0;
        for f in [100.0, 80.0, 250.0, 120.0, 300.0, 299.0] {
            peak = peak.next(f, false);
            assert!(peak.max_hz() >= last);
            last = peak.max_hz();
        }
        assert_eq!(peak.max_hz(), 300.0);
    }

    #[test]
    fn test_peak_tracker_holds_when_frozen() {
        let peak = PeakTracker::default().next(200.0, false);
        let held = [500.0, 1000.0, 10.0]
            .iter()
            .fold(peak, |p, &f| p.next(f, true));
        assert_eq!(held.max_hz(), 200.0);
    }

    #[test]
    fn test_interpret_threads_state() {
        let interp = full_range();
        let mut snapshot = vec![0u8; 1024];
        snapshot[10] = 200;

        let first = interp.interpret(&InterpreterState::default(), &snapshot, 5, false);
        let reading = first.reading.clone().unwrap();
        assert_eq!(reading.timestamp_ms, 5);
        assert_eq!(reading.frozen_max_hz, reading.frequency_hz);
        assert!(reading.note.is_some());

        // Lower peak does not lower the running max
        snapshot[10] = 0;
        snapshot[5] = 200;
        let second = interp.interpret(&first.state, &snapshot, 6, false);
        assert_eq!(
            second.reading.unwrap().frozen_max_hz,
            first.state.peak.max_hz()
        );
    }

    #[test]
    fn test_interpret_silence_preserves_state() {
        let interp = full_range();
        let state = InterpreterState {
            peak: PeakTracker::default().next(321.0, false),
        };
        let frame = interp.interpret(&state, &[0u8; 1024], 9, false);
        assert!(frame.reading.is_none());
        assert_eq!(frame.state, state);
        assert_eq!(frame.loudness.rms, 0.0);
    }
}
