//! Per-frame pipeline: snapshot -> reading + history + geometry
//!
//! One [`FramePipeline`] replaces the per-view copies of the frequency,
//! note and color math. It owns the interpreter state, the history log and
//! the height field; the frame driver hands it one snapshot per displayed
//! frame together with the current toggles.

use crate::bars::{map_range_bars, Bar};
use crate::field::{HeightField, DEFAULT_HEIGHT_SCALE};
use crate::ring::{BarRing, RingConfig};
use crate::tier::PerformanceTier;
use spectra_analysis::{
    HistoryLog, InterpreterState, Loudness, Note, RangeLimits, RangeMode, Reading, SamplingParams,
    SpectrumInterpreter, DEFAULT_DISPLAY_CAP, DEFAULT_LOUDNESS_SCALE,
};

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub params: SamplingParams,
    pub limits: RangeLimits,
    pub tier: PerformanceTier,
    pub loudness_scale: f32,
    pub height_scale: f32,
    pub display_cap: usize,
    pub ring: RingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            params: SamplingParams::default(),
            limits: RangeLimits::default(),
            tier: PerformanceTier::default(),
            loudness_scale: DEFAULT_LOUDNESS_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            display_cap: DEFAULT_DISPLAY_CAP,
            ring: RingConfig::default(),
        }
    }
}

/// Toggles that gate computation for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameToggles {
    pub running: bool,
    pub paused: bool,
    pub frozen: bool,
}

/// Values shown in the readout panel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readout {
    pub frequency_hz: Option<f32>,
    pub note: Option<Note>,
    pub frozen_max_hz: f32,
    pub loudness: Loudness,
}

/// What a frame produced
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Not running: nothing computed
    Stopped,
    /// Paused: nothing computed, previous output kept
    Paused,
    /// Degenerate snapshot: level updated, readout and history untouched
    Silent,
    /// Valid reading appended to history
    Reading(Reading),
}

/// Single-writer owner of all per-frame derived state
pub struct FramePipeline {
    config: PipelineConfig,
    interpreter: SpectrumInterpreter,
    state: InterpreterState,
    history: HistoryLog,
    field: HeightField,
    ring: BarRing,
    readout: Readout,
    /// Latest snapshot consumed, kept for the renderer
    snapshot: Vec<u8>,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let interpreter = Self::build_interpreter(&config);
        Self {
            interpreter,
            state: InterpreterState::default(),
            history: HistoryLog::new(config.display_cap),
            field: HeightField::new(config.tier.dimensions(), config.height_scale),
            ring: BarRing::new(config.ring),
            readout: Readout::default(),
            snapshot: Vec::new(),
            config,
        }
    }

    fn build_interpreter(config: &PipelineConfig) -> SpectrumInterpreter {
        SpectrumInterpreter::new(config.params)
            .with_limits(config.limits)
            .with_loudness_scale(config.loudness_scale)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one frame
    pub fn tick(&mut self, toggles: FrameToggles, snapshot: &[u8], timestamp_ms: u64) -> FrameOutcome {
        if !toggles.running {
            return FrameOutcome::Stopped;
        }
        if toggles.paused {
            return FrameOutcome::Paused;
        }

        self.snapshot.clear();
        self.snapshot.extend_from_slice(snapshot);

        let frame = self
            .interpreter
            .interpret(&self.state, snapshot, timestamp_ms, toggles.frozen);
        self.readout.loudness = frame.loudness;

        let Some(reading) = frame.reading else {
            return FrameOutcome::Silent;
        };

        self.state = frame.state;
        self.readout.frequency_hz = Some(reading.frequency_hz);
        self.readout.note = reading.note;
        self.readout.frozen_max_hz = reading.frozen_max_hz;
        self.history.push(reading.clone());
        self.field.push(snapshot);

        FrameOutcome::Reading(reading)
    }

    /// Release per-session output so the next frame starts with no data
    pub fn stop(&mut self) {
        self.snapshot.clear();
        self.readout.frequency_hz = None;
        self.readout.note = None;
        self.readout.loudness = Loudness::default();
    }

    /// Switch to a new source's sampling rate and transform size
    pub fn set_sampling(&mut self, sample_rate: f32, fft_size: usize) {
        self.config.params.sample_rate = sample_rate;
        self.config.params.fft_size = fft_size;
        self.interpreter = Self::build_interpreter(&self.config);
    }

    pub fn set_range(&mut self, range: RangeMode) {
        self.config.params.range = range;
        self.interpreter = Self::build_interpreter(&self.config);
        tracing::info!(%range, "range changed");
    }

    /// Change tier; reallocates the height field
    pub fn set_tier(&mut self, tier: PerformanceTier) {
        self.config.tier = tier;
        self.field.resize(tier.dimensions());
        tracing::info!(%tier, "performance tier changed");
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Latest snapshot consumed (empty when stopped)
    pub fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    /// 2D bars for the latest snapshot, restricted to the selected range
    pub fn bars(&self, canvas_width: f32, canvas_height: f32) -> Vec<Bar> {
        map_range_bars(
            &self.snapshot,
            &self.config.params,
            &self.config.limits,
            canvas_width,
            canvas_height,
        )
    }

    /// Ring heights; idle animation when `live` is false or no data arrived yet
    pub fn ring_heights(&self, live: bool, elapsed_secs: f32) -> Vec<f32> {
        let snapshot = (live && !self.snapshot.is_empty()).then_some(self.snapshot.as_slice());
        self.ring.heights(snapshot, elapsed_secs)
    }

    pub fn ring(&self) -> &BarRing {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::FieldDimensions;

    const RUNNING: FrameToggles = FrameToggles {
        running: true,
        paused: false,
        frozen: false,
    };

    fn full_pipeline() -> FramePipeline {
        FramePipeline::new(PipelineConfig {
            params: SamplingParams::new(44_100.0, 2048, RangeMode::Full),
            tier: PerformanceTier::Low,
            ..Default::default()
        })
    }

    fn tone(bin: usize, value: u8) -> Vec<u8> {
        let mut s = vec![0u8; 1024];
        s[bin] = value;
        s
    }

    #[test]
    fn test_stopped_and_paused_compute_nothing() {
        let mut p = full_pipeline();
        let stopped = FrameToggles::default();
        assert_eq!(p.tick(stopped, &tone(10, 200), 0), FrameOutcome::Stopped);

        let paused = FrameToggles {
            paused: true,
            ..RUNNING
        };
        assert_eq!(p.tick(paused, &tone(10, 200), 1), FrameOutcome::Paused);
        assert!(p.history().is_empty());
        assert_eq!(p.field().populated(), 0);
    }

    #[test]
    fn test_reading_updates_everything() {
        let mut p = full_pipeline();
        let outcome = p.tick(RUNNING, &tone(3, 200), 42);
        let FrameOutcome::Reading(reading) = outcome else {
            panic!("expected reading");
        };
        assert!((reading.frequency_hz - 64.6).abs() < 0.05);
        assert_eq!(p.history().len(), 1);
        assert_eq!(p.field().populated(), 1);
        assert_eq!(p.readout().note.unwrap().to_string(), "C2");
        assert!(p.readout().loudness.rms > 0.0);
    }

    #[test]
    fn test_silent_frame_preserves_readout() {
        let mut p = full_pipeline();
        p.tick(RUNNING, &tone(20, 180), 1);
        let before = *p.readout();

        assert_eq!(p.tick(RUNNING, &vec![0u8; 1024], 2), FrameOutcome::Silent);
        assert_eq!(p.history().len(), 1);
        assert_eq!(p.field().populated(), 1);
        assert_eq!(p.readout().frequency_hz, before.frequency_hz);
        assert_eq!(p.readout().loudness.rms, 0.0);
    }

    #[test]
    fn test_freeze_holds_max() {
        let mut p = full_pipeline();
        p.tick(RUNNING, &tone(10, 200), 1);
        let held = p.readout().frozen_max_hz;

        let frozen = FrameToggles {
            frozen: true,
            ..RUNNING
        };
        p.tick(frozen, &tone(100, 200), 2);
        assert_eq!(p.readout().frozen_max_hz, held);

        p.tick(RUNNING, &tone(100, 200), 3);
        assert!(p.readout().frozen_max_hz > held);
    }

    #[test]
    fn test_stop_clears_readout_keeps_history() {
        let mut p = full_pipeline();
        p.tick(RUNNING, &tone(10, 200), 1);
        p.stop();
        assert!(p.readout().frequency_hz.is_none());
        assert!(p.snapshot().is_empty());
        assert_eq!(p.history().len(), 1);
        assert!(p.bars(100.0, 10.0).is_empty());
    }

    #[test]
    fn test_tier_change_reallocates_field() {
        let mut p = full_pipeline();
        p.tick(RUNNING, &tone(10, 200), 1);
        p.set_tier(PerformanceTier::High);
        assert_eq!(p.field().dimensions(), FieldDimensions::new(128, 100));
        assert_eq!(p.field().populated(), 0);
    }

    #[test]
    fn test_range_change_applies_to_bars_and_reading() {
        let mut p = full_pipeline();
        let mut s = tone(1, 255);
        s[20] = 100;
        p.tick(RUNNING, &s, 1);
        assert_eq!(p.bars(1024.0, 10.0).len(), 1024);
        // Bin 1 is outside the voice range, so the next reading lands on bin 20
        p.set_range(RangeMode::Voice);
        let FrameOutcome::Reading(r) = p.tick(RUNNING, &s, 2) else {
            panic!("expected reading");
        };
        assert!((r.frequency_hz - 430.66).abs() < 0.1);
        assert_eq!(p.bars(520.0, 10.0).len(), 52);
    }

    #[test]
    fn test_ring_idle_without_data() {
        let mut p = full_pipeline();
        assert_eq!(p.ring_heights(true, 0.5), p.ring().heights(None, 0.5));
        p.tick(RUNNING, &tone(0, 255), 1);
        assert_eq!(
            p.ring_heights(true, 0.5),
            p.ring().heights(Some(p.snapshot()), 0.5)
        );
        assert_eq!(p.ring_heights(false, 0.5), p.ring().heights(None, 0.5));
    }
}
