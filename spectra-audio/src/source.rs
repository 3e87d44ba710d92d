//! Snapshot source abstraction

/// Anything that can hand out one frequency snapshot per frame
pub trait SpectrumSource {
    /// Sample rate of the analysed signal, in Hz
    fn sample_rate(&self) -> f32;

    /// Transform size; snapshots hold `fft_size / 2` bins
    fn fft_size(&self) -> usize;

    /// Write the latest snapshot into `out`, resizing it to the bin count.
    /// Returns false when the source can no longer produce data.
    fn fill_snapshot(&mut self, out: &mut Vec<u8>) -> bool;

    /// True for a real input device, false for synthetic sources
    fn is_live(&self) -> bool;

    /// Human-readable source name for the status bar
    fn name(&self) -> &str;
}
