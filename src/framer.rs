//! Frame segmentation for the denoise operator.
//!
//! RNNoise consumes audio in fixed 10 ms frames and nothing else. This
//! module owns that invariant: [`Frame`] can only ever hold exactly
//! [`FRAME_BYTES`] bytes, and [`segment`] zero-pads the tail of a buffer so
//! trailing audio is denoised as padded silence rather than dropped.

use crate::error::{Error, Result};
use crate::profile::{FRAME_BYTES, FRAME_SAMPLES};

/// One 10 ms frame at the working profile (960 bytes / 480 samples).
///
/// The fixed-size array makes the operator's size precondition a property
/// of the type: a wrong-size frame cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_BYTES],
}

impl Frame {
    /// An all-zero (silence) frame.
    pub fn silence() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }

    /// Validate caller-supplied bytes into a frame.
    ///
    /// This is the runtime enforcement point for single-frame callers;
    /// buffers going through [`segment`] are correctly sized by construction.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FRAME_BYTES {
            return Err(Error::FrameSize {
                expected: FRAME_BYTES,
                actual: bytes.len(),
            });
        }

        let mut frame = Self::silence();
        frame.bytes.copy_from_slice(bytes);
        Ok(frame)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Decode the frame into its 480 little-endian samples.
    pub fn samples(&self) -> [i16; FRAME_SAMPLES] {
        let mut samples = [0i16; FRAME_SAMPLES];
        for (dst, pair) in samples.iter_mut().zip(self.bytes.chunks_exact(2)) {
            *dst = i16::from_le_bytes([pair[0], pair[1]]);
        }
        samples
    }

    /// Overwrite the frame's content from decoded samples.
    pub fn copy_samples_from(&mut self, samples: &[i16; FRAME_SAMPLES]) {
        for (dst, s) in self.bytes.chunks_exact_mut(2).zip(samples) {
            dst.copy_from_slice(&s.to_le_bytes());
        }
    }
}

/// Slice a working-profile byte buffer into frames, zero-padding the tail.
///
/// For an input of `L` bytes this yields `ceil(L / 960)` frames; when
/// `L % 960 != 0` the final frame's last `960 - L % 960` bytes are silence.
/// An empty buffer yields no frames. The same buffer reframes identically on
/// every call, and no frame aliases the input or another frame.
pub fn segment(bytes: &[u8]) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(bytes.len().div_ceil(FRAME_BYTES));

    for chunk in bytes.chunks(FRAME_BYTES) {
        let mut frame = Frame::silence();
        frame.bytes[..chunk.len()].copy_from_slice(chunk);
        frames.push(frame);
    }

    frames
}
