//! Reassembly of gated frames into one audio buffer.
//!
//! Surviving frames are concatenated in order and tagged with the working
//! profile; when the caller asked to preserve their original rate, the
//! concatenated buffer is resampled back before returning.

use crate::audio::AudioBuffer;
use crate::error::Result;
use crate::framer::Frame;
use crate::profile::{CHANNELS, FRAME_BYTES, SAMPLE_RATE};
use crate::resample::resample;

/// Concatenate `frames` into one buffer, optionally restoring `restore_rate`.
///
/// With `restore_rate` of `None` (or the working rate itself) the result
/// stays at 48 kHz and its byte length is exactly `frames.len() * 960`.
pub fn reassemble(frames: &[Frame], restore_rate: Option<u32>) -> Result<AudioBuffer> {
    let mut data = Vec::with_capacity(frames.len() * FRAME_BYTES);
    for frame in frames {
        data.extend_from_slice(frame.as_bytes());
    }

    let working = AudioBuffer::new(data, SAMPLE_RATE, CHANNELS);

    match restore_rate {
        Some(rate) if rate != SAMPLE_RATE => {
            let restored = resample(&working.samples(), SAMPLE_RATE, rate)?;
            Ok(AudioBuffer::from_samples(&restored, rate, CHANNELS))
        }
        _ => Ok(working),
    }
}
