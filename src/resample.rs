//! Whole-buffer sample-rate conversion.
//!
//! Both ends of the pipeline resample through here: normalization brings
//! arbitrary-rate input up/down to the 48 kHz working profile, and
//! reassembly optionally restores the caller's original rate. Conversion is
//! lossy and performed fresh on every call (no caching).
//!
//! Built on rubato's `SincFixedIn`, which wants fixed-size input blocks and
//! emits output behind a fixed delay; we zero-pad the tail to flush it and
//! trim the output to the rounded expected length so callers get
//! predictable buffer sizes.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::Result;

// Source frames fed to rubato per `process()` call.
const IN_CHUNK_FRAMES: usize = 1024;

/// Resample mono 16-bit samples from `from_rate` to `to_rate`.
///
/// Returns a new buffer of exactly `round(len * to_rate / from_rate)`
/// samples. Equal rates are an identity copy.
pub fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Result<Vec<i16>> {
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let expected = (samples.len() as f64 * ratio).round() as usize;

    let mut rs = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        IN_CHUNK_FRAMES,
        1, // mono
    )?;

    // The sinc filter delays output by a fixed number of frames; we keep
    // feeding (zero-padded) blocks until the delayed tail has flushed.
    let delay = rs.output_delay();
    let needed = expected + delay;

    let mut out: Vec<f32> = Vec::with_capacity(needed + IN_CHUNK_FRAMES);
    let mut offset = 0usize;

    while out.len() < needed {
        let mut block = vec![0.0f32; IN_CHUNK_FRAMES];
        if offset < samples.len() {
            let end = (offset + IN_CHUNK_FRAMES).min(samples.len());
            for (dst, &s) in block.iter_mut().zip(&samples[offset..end]) {
                *dst = s as f32;
            }
        }
        offset += IN_CHUNK_FRAMES;

        let produced = rs.process(&[block], None)?;
        out.extend_from_slice(&produced[0]);
    }

    let mut result: Vec<i16> = out
        .into_iter()
        .skip(delay)
        .take(expected)
        .map(|s| s.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect();
    result.resize(expected, 0);

    Ok(result)
}
