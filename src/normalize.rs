//! Format normalization ahead of the frame loop.
//!
//! Whatever the caller hands us — a structured buffer at any rate/channel
//! count, or headerless bytes with an out-of-band rate — leaves here as
//! mono 16-bit 48 kHz bytes ready for segmentation, together with the
//! original rate so reassembly can restore it. Channel downmix happens
//! before rate conversion. The caller's input is never mutated; we always
//! return a fresh buffer.

use crate::audio::Audio;
use crate::error::{Error, Result};
use crate::profile::SAMPLE_RATE;
use crate::resample::resample;

/// Audio coerced to the working profile, plus where it came from.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Mono 16-bit LE PCM at 48 kHz.
    pub bytes: Vec<u8>,
    /// The input's original sample rate, for optional restoration.
    pub source_rate: u32,
}

/// Coerce `audio` to the working profile.
///
/// `sample_rate` is required when `audio` is raw bytes (they carry no
/// embedded rate); it is ignored for structured buffers, which know their
/// own rate. Fails with [`Error::MissingSampleRate`] when raw bytes arrive
/// without one.
pub fn normalize(audio: &Audio, sample_rate: Option<u32>) -> Result<Normalized> {
    match audio {
        Audio::Buffer(buf) => {
            let source_rate = buf.sample_rate();

            // Fast path: already at the working profile. Copy the bytes
            // verbatim so framing sees the exact caller payload.
            if buf.channels() == 1 && source_rate == SAMPLE_RATE {
                return Ok(Normalized {
                    bytes: buf.raw_data().to_vec(),
                    source_rate,
                });
            }

            let mono = downmix_to_mono(&buf.samples(), buf.channels() as usize);
            let working = resample(&mono, source_rate, SAMPLE_RATE)?;
            Ok(Normalized {
                bytes: samples_to_bytes(&working),
                source_rate,
            })
        }
        Audio::Raw(bytes) => {
            let source_rate = sample_rate.ok_or(Error::MissingSampleRate)?;

            if source_rate == SAMPLE_RATE {
                return Ok(Normalized {
                    bytes: bytes.clone(),
                    source_rate,
                });
            }

            // Raw bytes are mono 16-bit by contract; complete a trailing odd
            // byte with silence before decoding so no audio is dropped.
            let mut padded = bytes.clone();
            if padded.len() % 2 != 0 {
                padded.push(0);
            }
            let samples: Vec<i16> = padded
                .chunks_exact(2)
                .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                .collect();

            let working = resample(&samples, source_rate, SAMPLE_RATE)?;
            Ok(Normalized {
                bytes: samples_to_bytes(&working),
                source_rate,
            })
        }
    }
}

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
pub(crate) fn downmix_to_mono(interleaved: &[i16], channels: usize) -> Vec<i16> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0i32;
        for c in 0..channels {
            acc += interleaved[base + c] as i32;
        }
        mono.push((acc / channels as i32) as i16);
    }

    mono
}

fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    bytes
}
