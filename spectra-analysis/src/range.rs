//! Bin/frequency conversion and semantic range windows

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Default analyser transform size
pub const DEFAULT_FFT_SIZE: usize = 2048;

/// Semantic frequency range used to restrict the dominant-bin search and the 2D chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Entire snapshot
    Full,
    /// Speaking voice (default 80-1200 Hz)
    Voice,
    /// Instruments and singing (default 50-4000 Hz)
    #[default]
    Music,
}

impl RangeMode {
    /// Cycle Full -> Voice -> Music -> Full
    pub fn next(self) -> Self {
        match self {
            RangeMode::Full => RangeMode::Voice,
            RangeMode::Voice => RangeMode::Music,
            RangeMode::Music => RangeMode::Full,
        }
    }

    /// Stable key used in settings files and commands
    pub fn as_str(self) -> &'static str {
        match self {
            RangeMode::Full => "full",
            RangeMode::Voice => "voice",
            RangeMode::Music => "music",
        }
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "all" => Ok(RangeMode::Full),
            "voice" | "voz" => Ok(RangeMode::Voice),
            "music" | "musica" => Ok(RangeMode::Music),
            other => Err(format!("unknown range: {}", other)),
        }
    }
}

/// Hz bounds for the restricted ranges
///
/// These are tuning constants, not physical limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeLimits {
    pub voice: (f32, f32),
    pub music: (f32, f32),
}

impl Default for RangeLimits {
    fn default() -> Self {
        Self {
            voice: (80.0, 1200.0),
            music: (50.0, 4000.0),
        }
    }
}

impl RangeLimits {
    /// Hz bounds for a mode, `None` for the full range
    pub fn bounds(&self, mode: RangeMode) -> Option<(f32, f32)> {
        match mode {
            RangeMode::Full => None,
            RangeMode::Voice => Some(self.voice),
            RangeMode::Music => Some(self.music),
        }
    }
}

/// Sampling parameters, fixed for the duration of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub sample_rate: f32,
    /// Transform size; snapshots hold `fft_size / 2` bins
    pub fft_size: usize,
    pub range: RangeMode,
}

impl SamplingParams {
    pub fn new(sample_rate: f32, fft_size: usize, range: RangeMode) -> Self {
        Self {
            sample_rate,
            fft_size,
            range,
        }
    }

    /// Number of bins in a snapshot produced with these parameters
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Bin window for these parameters over a snapshot of `len` bins
    pub fn window(&self, limits: &RangeLimits, len: usize) -> Range<usize> {
        bin_window(self, limits, len)
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::new(44_100.0, DEFAULT_FFT_SIZE, RangeMode::default())
    }
}

/// Centre frequency of a bin: `index * sample_rate / fft_size`
#[inline]
pub fn bin_to_frequency(index: usize, sample_rate: f32, fft_size: usize) -> f32 {
    if fft_size == 0 {
        return 0.0;
    }
    index as f32 * sample_rate / fft_size as f32
}

/// Bin index containing `hz`: `floor(hz * fft_size / sample_rate)`
#[inline]
pub fn frequency_to_bin(hz: f32, sample_rate: f32, fft_size: usize) -> usize {
    if sample_rate <= 0.0 || hz <= 0.0 {
        return 0;
    }
    (hz * fft_size as f32 / sample_rate).floor() as usize
}

/// Map the selected range to a half-open bin window clamped to `[0, len)`
///
/// An inverted or out-of-range window collapses to an empty range.
pub fn bin_window(params: &SamplingParams, limits: &RangeLimits, len: usize) -> Range<usize> {
    match limits.bounds(params.range) {
        None => 0..len,
        Some((low, high)) => {
            let start = frequency_to_bin(low, params.sample_rate, params.fft_size).min(len);
            let end = frequency_to_bin(high, params.sample_rate, params.fft_size).min(len);
            start..end.max(start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_zero_is_dc() {
        assert_eq!(bin_to_frequency(0, 44_100.0, 2048), 0.0);
        assert_eq!(bin_to_frequency(0, 48_000.0, 4096), 0.0);
    }

    #[test]
    fn test_bin_to_frequency_is_linear() {
        let one = bin_to_frequency(1, 44_100.0, 2048);
        for i in [2usize, 7, 100, 1023] {
            let f = bin_to_frequency(i, 44_100.0, 2048);
            assert!((f - one * i as f32).abs() < 1e-2, "bin {} -> {}", i, f);
        }
    }

    #[test]
    fn test_example_bin_three() {
        let f = bin_to_frequency(3, 44_100.0, 2048);
        assert!((f - 64.6).abs() < 0.05, "got {}", f);
    }

    #[test]
    fn test_frequency_to_bin_floors() {
        // 80 Hz at 44.1k / 2048 = 3.71 bins
        assert_eq!(frequency_to_bin(80.0, 44_100.0, 2048), 3);
        assert_eq!(frequency_to_bin(1200.0, 44_100.0, 2048), 55);
        assert_eq!(frequency_to_bin(0.0, 44_100.0, 2048), 0);
    }

    #[test]
    fn test_full_window_covers_snapshot() {
        let params = SamplingParams::new(44_100.0, 2048, RangeMode::Full);
        assert_eq!(bin_window(&params, &RangeLimits::default(), 1024), 0..1024);
    }

    #[test]
    fn test_voice_and_music_windows() {
        let limits = RangeLimits::default();
        let voice = SamplingParams::new(44_100.0, 2048, RangeMode::Voice);
        assert_eq!(bin_window(&voice, &limits, 1024), 3..55);

        let music = SamplingParams::new(44_100.0, 2048, RangeMode::Music);
        assert_eq!(bin_window(&music, &limits, 1024), 2..185);
    }

    #[test]
    fn test_window_clamped_to_snapshot() {
        let limits = RangeLimits {
            voice: (80.0, 100_000.0),
            music: (50_000.0, 60_000.0),
        };
        let voice = SamplingParams::new(44_100.0, 2048, RangeMode::Voice);
        assert_eq!(bin_window(&voice, &limits, 1024), 3..1024);

        let music = SamplingParams::new(44_100.0, 2048, RangeMode::Music);
        assert!(bin_window(&music, &limits, 1024).is_empty());
    }

    #[test]
    fn test_range_mode_parse_and_cycle() {
        assert_eq!("voice".parse::<RangeMode>(), Ok(RangeMode::Voice));
        assert_eq!(" MUSIC ".parse::<RangeMode>(), Ok(RangeMode::Music));
        assert!("treble".parse::<RangeMode>().is_err());
        assert_eq!(RangeMode::Full.next().next().next(), RangeMode::Full);
    }
}
