//! WAV file reading and writing.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Deinterleaved stereo audio plus the source layout.
pub struct StereoAudio {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl StereoAudio {
    pub fn frames(&self) -> usize {
        self.left.len()
    }
}

/// Read a WAV file as stereo.
///
/// Mono files are duplicated to both channels; files with more than two
/// channels keep only the first two.
pub fn read_stereo(path: &Path) -> Result<StereoAudio, hound::Error> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let frames = samples.len() / channels;
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for frame in samples.chunks_exact(channels) {
        left.push(frame[0]);
        right.push(frame.get(1).copied().unwrap_or(frame[0]));
    }

    Ok(StereoAudio {
        left,
        right,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}

/// Write 32-bit float audio.
///
/// With `channels == 1` only the left channel is written.
pub fn write_float(path: &Path, audio: &StereoAudio, channels: u16) -> Result<(), hound::Error> {
    let channels = channels.clamp(1, 2);
    let spec = WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;

    for (&l, &r) in audio.left.iter().zip(&audio.right) {
        writer.write_sample(l)?;
        if channels == 2 {
            writer.write_sample(r)?;
        }
    }

    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_int16(path: &Path, channels: u16, frames: &[[i16; 2]]) {
        let spec = WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in &frame[..usize::from(channels)] {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_is_duplicated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        write_int16(&path, 1, &[[16384, 0], [-16384, 0]]);

        let audio = read_stereo(&path).unwrap();
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.left, vec![0.5, -0.5]);
        assert_eq!(audio.left, audio.right);
    }

    #[test]
    fn stereo_is_deinterleaved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        write_int16(&path, 2, &[[16384, -8192], [0, 8192]]);

        let audio = read_stereo(&path).unwrap();
        assert_eq!(audio.frames(), 2);
        assert_eq!(audio.left, vec![0.5, 0.0]);
        assert_eq!(audio.right, vec![-0.25, 0.25]);
    }

    #[test]
    fn float_write_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let audio = StereoAudio {
            left: vec![0.1, 0.2, 0.3],
            right: vec![-0.1, -0.2, -0.3],
            channels: 2,
            sample_rate: 48000,
        };
        write_float(&path, &audio, 2).unwrap();

        let back = read_stereo(&path).unwrap();
        assert_eq!(back.sample_rate, 48000);
        assert_eq!(back.left, audio.left);
        assert_eq!(back.right, audio.right);

        write_float(&path, &audio, 1).unwrap();
        let mono = read_stereo(&path).unwrap();
        assert_eq!(mono.channels, 1);
        assert_eq!(mono.left, audio.left);
    }
}
