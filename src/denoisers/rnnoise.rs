//! RNNoise-backed denoise operator using the `nnnoiseless` crate.
//!
//! RNNoise consumes 480-sample frames of f32 audio in the i16 value range
//! ([-32768, 32767] reinterpreted as floats, not normalized to [-1, 1]) and
//! returns a VAD probability alongside the denoised frame. The i16 <-> f32
//! conversion happens here, at the operator boundary.

use nnnoiseless::DenoiseState;

use crate::denoiser::DenoiseOperator;
use crate::framer::Frame;
use crate::profile::FRAME_SAMPLES;

/// The default denoise operator, backed by `nnnoiseless::DenoiseState`.
///
/// Holds the network's adaptive state; one instance per logical stream.
pub struct RnnoiseDenoiser {
    state: Box<DenoiseState<'static>>,
    // Scratch buffers for the i16 -> f32 -> i16 conversion (480 samples).
    in_buf: [f32; FRAME_SAMPLES],
    out_buf: [f32; FRAME_SAMPLES],
}

impl RnnoiseDenoiser {
    pub fn new() -> Self {
        Self {
            state: DenoiseState::new(),
            in_buf: [0.0; FRAME_SAMPLES],
            out_buf: [0.0; FRAME_SAMPLES],
        }
    }
}

impl Default for RnnoiseDenoiser {
    fn default() -> Self {
        Self::new()
    }
}

impl DenoiseOperator for RnnoiseDenoiser {
    fn process(&mut self, frame: &mut Frame) -> f32 {
        let samples = frame.samples();
        for (dst, &s) in self.in_buf.iter_mut().zip(samples.iter()) {
            *dst = s as f32;
        }

        let vad = self.state.process_frame(&mut self.out_buf, &self.in_buf);

        let mut denoised = [0i16; FRAME_SAMPLES];
        for (dst, &s) in denoised.iter_mut().zip(self.out_buf.iter()) {
            *dst = s.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        }
        frame.copy_samples_from(&denoised);

        vad
    }

    fn reset(&mut self) {
        // nnnoiseless exposes no in-place reset; a fresh state is equivalent.
        self.state = DenoiseState::new();
    }
}
