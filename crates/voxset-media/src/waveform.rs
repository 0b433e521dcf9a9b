//! In-memory audio waveform.
//!
//! A decoded buffer of interleaved f32 samples in [-1, 1] with a known
//! sample rate and channel count. Immutable once decoded; every pipeline
//! stage takes a waveform and produces a new one.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{MediaError, MediaResult};

/// A decoded audio buffer.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl Waveform {
    /// Create a waveform from interleaved samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> MediaResult<Self> {
        if sample_rate == 0 || channels == 0 {
            return Err(MediaError::decode("zero sample rate or channel count"));
        }
        if samples.len() % channels as usize != 0 {
            return Err(MediaError::decode(
                "sample count is not a multiple of the channel count",
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Decode a WAV file into a waveform.
    ///
    /// Accepts 8/16/24/32-bit integer and 32-bit float PCM.
    pub fn from_wav_file(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| MediaError::decode(e.to_string()))?,
            SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| MediaError::decode(e.to_string()))?
            }
        };

        Self::new(samples, spec.sample_rate, spec.channels)
    }

    /// Encode this waveform to a 16-bit PCM WAV file.
    pub fn write_wav_file(&self, path: impl AsRef<Path>) -> MediaResult<()> {
        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        (self.frames() as u64 * 1000) / self.sample_rate as u64
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Convert a millisecond offset to a frame index, clamped to the end.
    pub fn ms_to_frame(&self, ms: u64) -> usize {
        let frame = (ms as u128 * self.sample_rate as u128 / 1000) as usize;
        frame.min(self.frames())
    }

    /// Copy out the frames in `[start_ms, end_ms)` as a new waveform.
    ///
    /// Boundaries land on frame indices so channel interleaving is preserved.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> Waveform {
        let start = self.ms_to_frame(start_ms) * self.channels as usize;
        let end = self.ms_to_frame(end_ms.max(start_ms)) * self.channels as usize;
        Waveform {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }
}
