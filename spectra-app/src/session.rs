//! Measurement session: the active snapshot source plus the frame pipeline

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use spectra_analysis::{RangeMode, SamplingParams, DEFAULT_FFT_SIZE};
use spectra_audio::{CaptureError, DemoSource, MicCapture, SpectrumSource};
use spectra_viz::{FrameOutcome, FramePipeline, FrameToggles, PerformanceTier, PipelineConfig};

/// Sample rate assumed until a source reports its own
const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

enum ActiveSource {
    Mic(MicCapture),
    Demo(DemoSource),
}

impl ActiveSource {
    fn as_source_mut(&mut self) -> &mut dyn SpectrumSource {
        match self {
            ActiveSource::Mic(mic) => mic,
            ActiveSource::Demo(demo) => demo,
        }
    }

    fn as_source(&self) -> &dyn SpectrumSource {
        match self {
            ActiveSource::Mic(mic) => mic,
            ActiveSource::Demo(demo) => demo,
        }
    }

    fn take_error(&self) -> Option<String> {
        match self {
            ActiveSource::Mic(mic) => mic.take_error(),
            ActiveSource::Demo(_) => None,
        }
    }
}

/// Owns the source handle and everything derived from its snapshots
pub struct Session {
    pipeline: FramePipeline,
    source: Option<ActiveSource>,
    snapshot: Vec<u8>,
    /// Timestamps for readings are measured from here
    clock: Instant,
}

impl Session {
    pub fn new(range: RangeMode, tier: PerformanceTier) -> Self {
        let config = PipelineConfig {
            params: SamplingParams::new(DEFAULT_SAMPLE_RATE, DEFAULT_FFT_SIZE, range),
            tier,
            ..Default::default()
        };
        Self {
            pipeline: FramePipeline::new(config),
            source: None,
            snapshot: Vec::new(),
            clock: Instant::now(),
        }
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut FramePipeline {
        &mut self.pipeline
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.source, Some(ActiveSource::Demo(_)))
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed().as_secs_f32()
    }

    /// Open an input device and make it the active source.
    /// Returns the device name on success; the previous source is kept on failure.
    pub fn start_mic(&mut self, device: Option<&str>) -> Result<String, CaptureError> {
        let mic = MicCapture::open(device)?;
        let name = mic.device_name().to_string();
        self.install(ActiveSource::Mic(mic));
        Ok(name)
    }

    /// Move a running microphone capture to `device`.
    ///
    /// `Ok(None)` when no microphone is capturing. On failure the current
    /// capture keeps running untouched.
    pub fn switch_mic(&mut self, device: &str) -> Result<Option<String>, CaptureError> {
        if !matches!(self.source, Some(ActiveSource::Mic(_))) {
            return Ok(None);
        }
        self.start_mic(Some(device)).map(Some)
    }

    pub fn start_demo(&mut self) -> String {
        self.install(ActiveSource::Demo(DemoSource::default()));
        "demo".to_string()
    }

    fn install(&mut self, source: ActiveSource) {
        // The replacement is already open; release the old source now
        self.source = None;
        let src = source.as_source();
        self.pipeline.set_sampling(src.sample_rate(), src.fft_size());
        self.source = Some(source);
    }

    /// Release the source and reset per-session analysis state
    pub fn stop(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!("source released");
        }
        self.snapshot.clear();
        self.pipeline.stop();
    }

    /// Advance one displayed frame.
    ///
    /// Returns `Err` with a reason when the source failed; the caller
    /// should stop the session.
    pub fn tick(&mut self, toggles: FrameToggles) -> Result<FrameOutcome, String> {
        let Some(source) = self.source.as_mut() else {
            return Ok(self.pipeline.tick(toggles, &[], self.timestamp_ms()));
        };

        if let Some(err) = source.take_error() {
            return Err(err);
        }

        if toggles.running
            && !toggles.paused
            && !source.as_source_mut().fill_snapshot(&mut self.snapshot)
        {
            return Err("input ended".to_string());
        }

        let ts = self.timestamp_ms();
        Ok(self.pipeline.tick(toggles, &self.snapshot, ts))
    }

    fn timestamp_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }
}

/// Device after `current` in `devices`, wrapping; the first when `current` is unknown
pub fn next_device(devices: &[String], current: Option<&str>) -> Option<String> {
    if devices.is_empty() {
        return None;
    }
    let next = current
        .and_then(|name| devices.iter().position(|d| d == name))
        .map(|i| (i + 1) % devices.len())
        .unwrap_or(0);
    Some(devices[next].clone())
}

/// `<data dir>/spectra/frequencies-<unix seconds>.csv`
pub fn default_export_path() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spectra")
        .join(format!("frequencies-{}.csv", secs))
}
