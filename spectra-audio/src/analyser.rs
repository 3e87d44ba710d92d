//! FFT analyser producing byte frequency snapshots
//!
//! Windowed magnitude spectrum with per-bin exponential smoothing, mapped
//! from a decibel range onto 0-255 so every downstream consumer works on
//! the same fixed-range integers.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Smoothing between consecutive spectra (0 = none, 1 = frozen)
pub const DEFAULT_SMOOTHING: f32 = 0.8;
/// Level mapped to byte 0
pub const DEFAULT_MIN_DB: f32 = -100.0;
/// Level mapped to byte 255
pub const DEFAULT_MAX_DB: f32 = -30.0;

/// Real-time byte spectrum analyser
pub struct ByteAnalyser {
    fft_size: usize,
    fft: Arc<dyn rustfft::Fft<f32>>,
    window: Vec<f32>,
    /// Circular buffer of the latest `fft_size` samples
    time: Vec<f32>,
    write_pos: usize,
    /// Smoothed linear magnitudes per bin
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    /// Pre-allocated FFT buffer to avoid allocation per frame
    fft_buffer: Vec<Complex<f32>>,
}

impl ByteAnalyser {
    /// Create an analyser; `fft_size` must be a power of two
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(2).next_power_of_two();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Blackman window
        let n = fft_size as f32;
        let window: Vec<f32> = (0..fft_size)
            .map(|i| {
                let x = i as f32 / n;
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            })
            .collect();

        Self {
            fft_size,
            fft,
            window,
            time: vec![0.0; fft_size],
            write_pos: 0,
            smoothed: vec![0.0; fft_size / 2],
            smoothing: DEFAULT_SMOOTHING,
            min_db: DEFAULT_MIN_DB,
            max_db: DEFAULT_MAX_DB,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Bins per snapshot (`fft_size / 2`)
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Append mono samples to the analysis window
    pub fn push_samples(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.time[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % self.fft_size;
        }
    }

    /// Drop all buffered audio and smoothing history
    pub fn reset(&mut self) {
        self.time.fill(0.0);
        self.smoothed.fill(0.0);
        self.write_pos = 0;
    }

    /// Compute the current byte spectrum into `out` (resized to `bin_count`)
    pub fn byte_frequency_data(&mut self, out: &mut Vec<u8>) {
        // Oldest sample sits at write_pos
        for i in 0..self.fft_size {
            let sample = self.time[(self.write_pos + i) % self.fft_size];
            self.fft_buffer[i] = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        let scale = 1.0 / self.fft_size as f32;
        let db_span = self.max_db - self.min_db;
        out.resize(self.bin_count(), 0);

        for (k, (smoothed, byte)) in self.smoothed.iter_mut().zip(out.iter_mut()).enumerate() {
            let magnitude = self.fft_buffer[k].norm() * scale;
            *smoothed = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;

            let db = if *smoothed > 0.0 {
                20.0 * smoothed.log10()
            } else {
                f32::NEG_INFINITY
            };
            let level = 255.0 * (db - self.min_db) / db_span;
            *byte = level.clamp(0.0, 255.0) as u8;
        }
    }
}
