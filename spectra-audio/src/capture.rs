//! Microphone capture
//!
//! The cpal callback downmixes to mono and pushes into a lock-free ring
//! buffer; the frame driver drains it into a [`ByteAnalyser`] once per
//! frame. Stream errors reported by the backend arrive on a channel.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use crossbeam_channel::{Receiver, Sender};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use spectra_analysis::DEFAULT_FFT_SIZE;
use thiserror::Error;

use crate::analyser::ByteAnalyser;
use crate::source::SpectrumSource;

/// Preferred capture rate when the device supports it
const TARGET_SAMPLE_RATE: u32 = 44_100;

/// Samples drained from the ring buffer per chunk
const DRAIN_CHUNK: usize = 1024;

/// Why the input device could not be acquired
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no audio input device available")]
    NoDevice,
    #[error("input device not found: {0}")]
    DeviceNotFound(String),
    #[error("unsupported input configuration: {0}")]
    Config(String),
    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Names of all input devices on the default host
pub fn list_input_devices() -> Vec<String> {
    let host = cpal::default_host();
    match host.input_devices() {
        Ok(devices) => devices.filter_map(|d| d.name().ok()).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to enumerate input devices");
            Vec::new()
        }
    }
}

/// Live microphone source; dropping it releases the device
pub struct MicCapture {
    // Held for its Drop; the stream stops when this is released
    _stream: cpal::Stream,
    consumer: HeapCons<f32>,
    analyser: ByteAnalyser,
    sample_rate: u32,
    device_name: String,
    errors: Receiver<String>,
    scratch: Vec<f32>,
}

impl MicCapture {
    /// Acquire a device by name, or the default input when `None`
    pub fn open(device_name: Option<&str>) -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = match device_name {
            Some(wanted) => host
                .input_devices()
                .map_err(|e| CaptureError::Config(e.to_string()))?
                .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
                .ok_or_else(|| CaptureError::DeviceNotFound(wanted.to_string()))?,
            None => host.default_input_device().ok_or(CaptureError::NoDevice)?,
        };
        let name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let config = choose_input_config(&device, TARGET_SAMPLE_RATE)?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        // Two seconds of headroom between callback and frame driver
        let rb = HeapRb::<f32>::new((sample_rate as usize).saturating_mul(2));
        let (producer, consumer) = rb.split();
        let (err_tx, err_rx) = crossbeam_channel::unbounded();

        let stream_config: cpal::StreamConfig = config.clone().into();
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>,
            cpal::SampleFormat::I16 => build_stream::<i16>,
            cpal::SampleFormat::U16 => build_stream::<u16>,
            other => {
                return Err(CaptureError::Config(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }(&device, &stream_config, channels, producer, err_tx)?;

        stream.play()?;
        tracing::info!(device = %name, sample_rate, channels, "input capture started");

        Ok(Self {
            _stream: stream,
            consumer,
            analyser: ByteAnalyser::new(DEFAULT_FFT_SIZE),
            sample_rate,
            device_name: name,
            errors: err_rx,
            scratch: vec![0.0; DRAIN_CHUNK],
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Most recent stream error reported by the backend, if any
    pub fn take_error(&self) -> Option<String> {
        self.errors.try_iter().last()
    }

    fn drain(&mut self) {
        loop {
            let n = self.consumer.pop_slice(&mut self.scratch);
            if n == 0 {
                break;
            }
            self.analyser.push_samples(&self.scratch[..n]);
        }
    }
}

impl SpectrumSource for MicCapture {
    fn sample_rate(&self) -> f32 {
        self.sample_rate as f32
    }

    fn fft_size(&self) -> usize {
        self.analyser.fft_size()
    }

    fn fill_snapshot(&mut self, out: &mut Vec<u8>) -> bool {
        self.drain();
        self.analyser.byte_frequency_data(out);
        true
    }

    fn is_live(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        tracing::info!(device = %self.device_name, "input capture released");
    }
}

/// Prefer the target rate, then f32 samples
fn choose_input_config(
    device: &cpal::Device,
    target_rate: u32,
) -> Result<cpal::SupportedStreamConfig, CaptureError> {
    let ranges = device
        .supported_input_configs()
        .map_err(|e| CaptureError::Config(e.to_string()))?;

    let mut best: Option<cpal::SupportedStreamConfig> = None;
    let mut best_score = i32::MIN;
    for range in ranges {
        let min = range.min_sample_rate().0;
        let max = range.max_sample_rate().0;
        let rate = if (min..=max).contains(&target_rate) {
            target_rate
        } else {
            max.min(48_000).max(min)
        };
        let cfg = range.with_sample_rate(cpal::SampleRate(rate));

        let mut score = 0;
        if cfg.sample_rate().0 == target_rate {
            score += 2;
        }
        if cfg.sample_format() == cpal::SampleFormat::F32 {
            score += 1;
        }
        if score > best_score {
            best_score = score;
            best = Some(cfg);
        }
    }
    best.ok_or_else(|| CaptureError::Config("no supported input config".into()))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut producer: HeapProd<f32>,
    errors: Sender<String>,
) -> Result<cpal::Stream, CaptureError>
where
    T: Sample + SizedSample,
    f32: FromSample<T>,
{
    let channels = channels.max(1);
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|s| s.to_sample::<f32>()).sum();
                // Full buffer: drop the sample, the driver is behind
                let _ = producer.try_push(sum / frame.len() as f32);
            }
        },
        move |err| {
            let _ = errors.send(err.to_string());
        },
        None,
    )?;
    Ok(stream)
}
