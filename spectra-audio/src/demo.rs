//! Synthetic source for demo mode
//!
//! Generates a sine that glides up and down between two pitches, one
//! frame's worth of samples per snapshot. Output depends only on the
//! number of snapshots taken, never on wall time.

use std::f32::consts::TAU;

use spectra_analysis::DEFAULT_FFT_SIZE;

use crate::analyser::ByteAnalyser;
use crate::source::SpectrumSource;

const DEMO_SAMPLE_RATE: f32 = 44_100.0;
const DEMO_FRAME_RATE: f32 = 30.0;
const DEMO_AMPLITUDE: f32 = 0.5;
/// Frames for one low-to-high glide
const SWEEP_FRAMES: u32 = 240;

/// Deterministic tone-sweep source
pub struct DemoSource {
    analyser: ByteAnalyser,
    low_hz: f32,
    high_hz: f32,
    sweep_frames: u32,
    frame: u32,
    phase: f32,
    samples: Vec<f32>,
}

impl DemoSource {
    /// Glide between `low_hz` and `high_hz`
    pub fn sweep(low_hz: f32, high_hz: f32) -> Self {
        let samples_per_frame = (DEMO_SAMPLE_RATE / DEMO_FRAME_RATE) as usize;
        Self {
            analyser: ByteAnalyser::new(DEFAULT_FFT_SIZE),
            low_hz: low_hz.min(high_hz),
            high_hz: high_hz.max(low_hz),
            sweep_frames: SWEEP_FRAMES,
            frame: 0,
            phase: 0.0,
            samples: vec![0.0; samples_per_frame],
        }
    }

    /// Steady tone at `hz`
    pub fn tone(hz: f32) -> Self {
        Self::sweep(hz, hz)
    }

    /// Frequency generated for the current frame
    pub fn current_frequency(&self) -> f32 {
        let period = self.sweep_frames * 2;
        let pos = self.frame % period;
        // Triangle 0 -> 1 -> 0
        let t = if pos < self.sweep_frames {
            pos as f32 / self.sweep_frames as f32
        } else {
            (period - pos) as f32 / self.sweep_frames as f32
        };
        // Exponential glide sounds even across octaves
        self.low_hz * (self.high_hz / self.low_hz).powf(t)
    }

    fn synthesize(&mut self) {
        let step = TAU * self.current_frequency() / DEMO_SAMPLE_RATE;
        for s in self.samples.iter_mut() {
            *s = self.phase.sin() * DEMO_AMPLITUDE;
            self.phase = (self.phase + step) % TAU;
        }
        self.analyser.push_samples(&self.samples);
        self.frame = self.frame.wrapping_add(1);
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::sweep(110.0, 880.0)
    }
}

impl SpectrumSource for DemoSource {
    fn sample_rate(&self) -> f32 {
        DEMO_SAMPLE_RATE
    }

    fn fft_size(&self) -> usize {
        self.analyser.fft_size()
    }

    fn fill_snapshot(&mut self, out: &mut Vec<u8>) -> bool {
        self.synthesize();
        self.analyser.byte_frequency_data(out);
        true
    }

    fn is_live(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_analysis::{dominant_bin, RangeMode, SamplingParams, SpectrumInterpreter};

    fn settle(source: &mut DemoSource, frames: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for _ in 0..frames {
            source.fill_snapshot(&mut out);
        }
        out
    }

    #[test]
    fn test_tone_dominant_bin() {
        let mut source = DemoSource::tone(440.0);
        let snapshot = settle(&mut source, 30);
        assert_eq!(snapshot.len(), DEFAULT_FFT_SIZE / 2);
        // 440 * 2048 / 44100 = 20.4
        let bin = dominant_bin(&snapshot, 0..snapshot.len()).unwrap();
        assert!((20..=21).contains(&bin), "bin {bin}");
    }

    #[test]
    fn test_tone_reads_as_a4() {
        let mut source = DemoSource::tone(440.0);
        let snapshot = settle(&mut source, 30);
        let params = SamplingParams::new(source.sample_rate(), source.fft_size(), RangeMode::Music);
        let freq = SpectrumInterpreter::new(params)
            .dominant_frequency(&snapshot)
            .unwrap();
        assert!((freq - 440.0).abs() < 25.0, "freq {freq}");
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let mut a = DemoSource::default();
        let mut b = DemoSource::default();
        assert_eq!(settle(&mut a, 50), settle(&mut b, 50));
    }

    #[test]
    fn test_sweep_bounds() {
        let mut source = DemoSource::sweep(880.0, 110.0);
        assert_eq!(source.current_frequency(), 110.0);
        let mut out = Vec::new();
        for _ in 0..SWEEP_FRAMES {
            source.fill_snapshot(&mut out);
        }
        assert!((source.current_frequency() - 880.0).abs() < 0.01);
        for _ in 0..SWEEP_FRAMES {
            source.fill_snapshot(&mut out);
        }
        assert!((source.current_frequency() - 110.0).abs() < 0.01);
    }

    #[test]
    fn test_not_live() {
        let source = DemoSource::default();
        assert!(!source.is_live());
        assert_eq!(source.name(), "demo");
    }
}
