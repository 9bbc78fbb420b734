//! WAV container boundary.
//!
//! Reading coerces whatever the container holds — float samples, other bit
//! depths, multi-channel — into 16-bit mono, at the file's native rate or a
//! caller-desired one, so the rest of the crate only ever sees the one
//! profile it understands. Writing emits a standard PCM WAV at the buffer's
//! (or a desired) rate.

use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::audio::AudioBuffer;
use crate::error::{Error, Result};
use crate::normalize::downmix_to_mono;
use crate::resample::resample;

/// Load WAV audio from a reader, coerced to 16-bit mono.
///
/// With `desired_rate` of `None` the buffer keeps the container's native
/// sample rate (rate conversion is normally the normalizer's job); with a
/// rate it is resampled after the downmix, for callers who want a specific
/// rate straight off disk.
pub fn read_wav<R: Read>(reader: R, desired_rate: Option<u32>) -> Result<AudioBuffer> {
    let mut reader = WavReader::new(reader)?;
    let spec = reader.spec();

    let interleaved = read_samples_as_i16(&mut reader, &spec)?;
    let mono = downmix_to_mono(&interleaved, spec.channels as usize);

    match desired_rate {
        Some(rate) if rate != spec.sample_rate => {
            let resampled = resample(&mono, spec.sample_rate, rate)?;
            Ok(AudioBuffer::from_samples(&resampled, rate, 1))
        }
        _ => Ok(AudioBuffer::from_samples(&mono, spec.sample_rate, 1)),
    }
}

/// Load a `.wav` file, coerced to 16-bit mono (optionally to `desired_rate`).
///
/// Fails with [`Error::UnsupportedContainer`] for any other extension.
pub fn read_wav_file(path: impl AsRef<Path>, desired_rate: Option<u32>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    ensure_wav_extension(path)?;

    let file = std::fs::File::open(path)?;
    read_wav(std::io::BufReader::new(file), desired_rate)
}

/// Write an audio buffer as a standard 16-bit PCM WAV.
///
/// When `desired_rate` is set and differs from the buffer's rate, the audio
/// is resampled before writing (mono buffers only — which is everything the
/// pipeline produces).
pub fn write_wav<W: Write + Seek>(
    writer: W,
    audio: &AudioBuffer,
    desired_rate: Option<u32>,
) -> Result<()> {
    let (samples, rate) = match desired_rate {
        Some(rate) if rate != audio.sample_rate() => {
            if audio.channels() != 1 {
                return Err(Error::Message(
                    "can only resample mono audio on write".to_string(),
                ));
            }
            (resample(&audio.samples(), audio.sample_rate(), rate)?, rate)
        }
        _ => (audio.samples(), audio.sample_rate()),
    };

    let spec = WavSpec {
        channels: audio.channels(),
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(writer, spec)?;
    for s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write an audio buffer to a `.wav` file.
///
/// Fails with [`Error::UnsupportedContainer`] for any other extension.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    audio: &AudioBuffer,
    desired_rate: Option<u32>,
) -> Result<()> {
    let path = path.as_ref();
    ensure_wav_extension(path)?;

    let file = std::fs::File::create(path)?;
    write_wav(std::io::BufWriter::new(file), audio, desired_rate)
}

fn ensure_wav_extension(path: &Path) -> Result<()> {
    let is_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if !is_wav {
        return Err(Error::UnsupportedContainer(path.display().to_string()));
    }
    Ok(())
}

/// Read all samples as interleaved i16, whatever the container encoding.
fn read_samples_as_i16<R: Read>(
    reader: &mut WavReader<R>,
    spec: &WavSpec,
) -> Result<Vec<i16>> {
    let mut samples = Vec::with_capacity(reader.len() as usize);

    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, _) => {
            // Floats are normalized to [-1, 1]; rescale to the i16 range.
            for sample in reader.samples::<f32>() {
                let s = sample?;
                samples.push((s * i16::MAX as f32).round().clamp(
                    i16::MIN as f32,
                    i16::MAX as f32,
                ) as i16);
            }
        }
        (SampleFormat::Int, bits) if bits <= 16 => {
            let shift = 16 - bits;
            for sample in reader.samples::<i16>() {
                samples.push(sample? << shift);
            }
        }
        (SampleFormat::Int, bits) => {
            let shift = bits - 16;
            for sample in reader.samples::<i32>() {
                samples.push((sample? >> shift) as i16);
            }
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(spec: WavSpec, write: impl FnOnce(&mut WavWriter<&mut Cursor<Vec<u8>>>)) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        write(&mut writer);
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn round_trips_mono_16_bit() -> Result<()> {
        let buf = AudioBuffer::from_samples(&[0, 100, -100, i16::MAX], 48_000, 1);

        let mut cursor = Cursor::new(Vec::new());
        write_wav(&mut cursor, &buf, None)?;
        cursor.set_position(0);

        let read = read_wav(cursor, None)?;
        assert_eq!(read, buf);
        Ok(())
    }

    #[test]
    fn stereo_input_is_downmixed() -> Result<()> {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for _ in 0..4 {
                w.write_sample(100i16).unwrap();
                w.write_sample(300i16).unwrap();
            }
        });

        let buf = read_wav(Cursor::new(bytes), None)?;
        assert_eq!(buf.channels(), 1);
        assert_eq!(buf.sample_rate(), 44_100);
        assert_eq!(buf.samples(), vec![200; 4]);
        Ok(())
    }

    #[test]
    fn float_input_is_rescaled_to_i16() -> Result<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, |w| {
            w.write_sample(0.0f32).unwrap();
            w.write_sample(1.0f32).unwrap();
            w.write_sample(-0.5f32).unwrap();
        });

        let buf = read_wav(Cursor::new(bytes), None)?;
        let samples = buf.samples();
        assert_eq!(samples[0], 0);
        assert_eq!(samples[1], i16::MAX);
        assert!((samples[2] as i32 + 16_384).abs() <= 1);
        Ok(())
    }

    #[test]
    fn read_resamples_when_a_desired_rate_is_given() -> Result<()> {
        let buf = AudioBuffer::from_samples(&vec![0i16; 16_000], 16_000, 1);

        let mut cursor = Cursor::new(Vec::new());
        write_wav(&mut cursor, &buf, None)?;
        cursor.set_position(0);

        let read = read_wav(cursor, Some(48_000))?;
        assert_eq!(read.sample_rate(), 48_000);
        assert_eq!(read.samples().len(), 48_000);
        Ok(())
    }

    #[test]
    fn read_with_matching_desired_rate_is_a_no_op() -> Result<()> {
        let buf = AudioBuffer::from_samples(&[0, 100, -100], 48_000, 1);

        let mut cursor = Cursor::new(Vec::new());
        write_wav(&mut cursor, &buf, None)?;
        cursor.set_position(0);

        let read = read_wav(cursor, Some(48_000))?;
        assert_eq!(read, buf);
        Ok(())
    }

    #[test]
    fn non_wav_extension_is_rejected() {
        let err = read_wav_file("audio.mp3", None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedContainer(_)));

        let buf = AudioBuffer::from_samples(&[0], 48_000, 1);
        let err = write_wav_file("out.ogg", &buf, None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedContainer(_)));
    }

    #[test]
    fn write_resamples_when_a_desired_rate_is_given() -> Result<()> {
        let buf = AudioBuffer::from_samples(&vec![0i16; 48_000], 48_000, 1);

        let mut cursor = Cursor::new(Vec::new());
        write_wav(&mut cursor, &buf, Some(16_000))?;
        cursor.set_position(0);

        let read = read_wav(cursor, None)?;
        assert_eq!(read.sample_rate(), 16_000);
        assert_eq!(read.samples().len(), 16_000);
        Ok(())
    }
}
