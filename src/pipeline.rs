//! High-level API for running denoising passes.
//!
//! We expose a single, ergonomic entry point (`Pipeline`) that wires up the
//! lower-level stages: normalize → segment → per-frame denoise → gate →
//! reassemble. The intent is:
//! - We create the operator state once (it adapts across frames).
//! - We reuse the pipeline to denoise whole recordings or successive chunks
//!   of one stream.
//! - Callers choose gating and rate behavior via `FilterOpts`.
//!
//! Concurrency: the operator state is the only mutable state here and it is
//! exclusively owned by one `Pipeline`. Using one pipeline from multiple
//! threads must be serialized by the caller — adaptation order is
//! deterministic and caller-controlled, so there is no internal locking.
//! Independent pipelines are fully independent.

use tracing::debug;

use crate::audio::Audio;
use crate::denoiser::DenoiseOperator;
use crate::denoisers::RnnoiseDenoiser;
use crate::error::{Error, Result};
use crate::framer::{Frame, segment};
use crate::gate::{self, FrameResult};
use crate::normalize::normalize;
use crate::opts::FilterOpts;
use crate::profile::SAMPLE_RATE;
use crate::reassemble::reassemble;

/// The main high-level denoising entry point.
///
/// `Pipeline` owns the denoise operator — the adaptive neural state — for
/// one logical audio stream. Typical usage:
/// - Construct once.
/// - Call [`Pipeline::filter`] with a whole recording, or repeatedly with
///   successive chunks of the same stream.
///
/// For streaming, chunks should be a nonzero multiple of 10 ms; shorter or
/// non-multiple chunks are accepted but get silently padded to a whole
/// frame, which injects padding silence mid-stream (a quality caveat, not
/// an error).
///
/// After [`Pipeline::teardown`] the operator is released and every further
/// processing call fails with [`Error::UseAfterTeardown`]. Dropping the
/// pipeline releases the operator as well; teardown itself is idempotent.
pub struct Pipeline<D: DenoiseOperator = RnnoiseDenoiser> {
    // `None` once torn down.
    operator: Option<D>,
}

impl Pipeline<RnnoiseDenoiser> {
    /// Create a pipeline backed by the built-in RNNoise operator.
    pub fn new() -> Self {
        Self::with_operator(RnnoiseDenoiser::new())
    }
}

impl Default for Pipeline<RnnoiseDenoiser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DenoiseOperator> Pipeline<D> {
    /// Create a pipeline using a custom denoise operator.
    ///
    /// This replaces any notion of on-disk library discovery: whoever builds
    /// the pipeline decides exactly which operator instance it runs.
    pub fn with_operator(operator: D) -> Self {
        Self {
            operator: Some(operator),
        }
    }

    /// Denoise a recording (or the next chunk of a stream).
    ///
    /// `sample_rate` is required when `audio` is [`Audio::Raw`] and ignored
    /// for [`Audio::Buffer`]. The output representation mirrors the input:
    /// a buffer in, a buffer out; raw bytes in, raw bytes out.
    ///
    /// Stages, in order:
    /// 1. Normalize to mono 16-bit 48 kHz (remembering the original rate).
    /// 2. Segment into 10 ms frames, zero-padding the tail.
    /// 3. Denoise each frame sequentially — the operator adapts, so order
    ///    is strict.
    /// 4. Gate frames below `opts.voice_threshold`.
    /// 5. Reassemble, restoring the original rate iff
    ///    `opts.preserve_original_rate`.
    pub fn filter(
        &mut self,
        audio: &Audio,
        sample_rate: Option<u32>,
        opts: &FilterOpts,
    ) -> Result<Audio> {
        // Fail on a torn-down pipeline before doing any conversion work.
        if self.operator.is_none() {
            return Err(Error::UseAfterTeardown);
        }

        let normalized = normalize(audio, sample_rate)?;
        let frames = segment(&normalized.bytes);
        let total = frames.len();

        let results = self.process_frames(frames)?;
        let kept = gate::filter(results, opts.voice_threshold);

        debug!(
            frames = total,
            kept = kept.len(),
            source_rate = normalized.source_rate,
            "denoised audio"
        );

        let restore_rate = opts
            .preserve_original_rate
            .then_some(normalized.source_rate);
        let reassembled = reassemble(&kept, restore_rate)?;

        Ok(match audio {
            Audio::Buffer(_) => Audio::Buffer(reassembled),
            Audio::Raw(_) => Audio::Raw(reassembled.into_raw_data()),
        })
    }

    /// Denoise a single caller-supplied frame.
    ///
    /// `frame` must be exactly 960 bytes of mono 16-bit 48 kHz PCM; anything
    /// else fails with [`Error::FrameSize`] before the operator is reached.
    /// Returns the voice probability and the denoised frame bytes.
    pub fn filter_frame(&mut self, frame: &[u8]) -> Result<(f32, Vec<u8>)> {
        let mut frame = Frame::from_bytes(frame)?;
        let operator = self.operator_mut()?;

        let voice_probability = operator.process(&mut frame);
        Ok((voice_probability, frame.as_bytes().to_vec()))
    }

    /// Discard the operator's accumulated adaptation.
    ///
    /// Advisory: there is no evidence this improves quality on subsequent
    /// recordings, but it is safe (and idempotent) to call between streams
    /// that must be denoised independently.
    pub fn reset(&mut self) -> Result<()> {
        self.operator_mut()?.reset();
        Ok(())
    }

    /// Release the operator.
    ///
    /// Idempotent: repeated teardown is a no-op. Any later `filter`,
    /// `filter_frame`, or `reset` fails with [`Error::UseAfterTeardown`].
    /// Dropping the pipeline performs the same release implicitly.
    pub fn teardown(&mut self) {
        self.operator = None;
    }

    /// Whether the operator is still live.
    pub fn is_ready(&self) -> bool {
        self.operator.is_some()
    }

    /// The sample rate the operator works at (48 kHz).
    pub fn working_sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn process_frames(&mut self, frames: Vec<Frame>) -> Result<Vec<FrameResult>> {
        let operator = self.operator_mut()?;

        let mut results = Vec::with_capacity(frames.len());
        for mut frame in frames {
            let voice_probability = operator.process(&mut frame);
            results.push(FrameResult {
                voice_probability,
                frame,
            });
        }
        Ok(results)
    }

    fn operator_mut(&mut self) -> Result<&mut D> {
        self.operator.as_mut().ok_or(Error::UseAfterTeardown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FRAME_BYTES;

    // Deterministic operator for pipeline-shape tests: passes audio through
    // untouched and reports a fixed probability sequence.
    struct ScriptedOperator {
        probs: Vec<f32>,
        cursor: usize,
        resets: usize,
    }

    impl ScriptedOperator {
        fn new(probs: Vec<f32>) -> Self {
            Self {
                probs,
                cursor: 0,
                resets: 0,
            }
        }
    }

    impl DenoiseOperator for ScriptedOperator {
        fn process(&mut self, _frame: &mut Frame) -> f32 {
            let p = self.probs[self.cursor % self.probs.len()];
            self.cursor += 1;
            p
        }

        fn reset(&mut self) {
            self.cursor = 0;
            self.resets += 1;
        }
    }

    #[test]
    fn raw_input_yields_raw_output() -> Result<()> {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        let input = Audio::Raw(vec![0u8; FRAME_BYTES * 2]);

        let out = pipeline.filter(&input, Some(SAMPLE_RATE), &FilterOpts::default())?;
        assert!(matches!(out, Audio::Raw(_)));
        Ok(())
    }

    #[test]
    fn round_trip_length_is_padded_input_length() -> Result<()> {
        // 2.5 frames of input -> 3 frames of output with threshold 0.
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![0.5]));
        let input = Audio::Raw(vec![1u8; FRAME_BYTES * 2 + FRAME_BYTES / 2]);

        let out = pipeline
            .filter(&input, Some(SAMPLE_RATE), &FilterOpts::default())?
            .into_raw()
            .unwrap();
        assert_eq!(out.len(), FRAME_BYTES * 3);
        Ok(())
    }

    #[test]
    fn gate_drops_low_probability_frames() -> Result<()> {
        let mut pipeline =
            Pipeline::with_operator(ScriptedOperator::new(vec![0.9, 0.1, 0.9, 0.1]));
        let input = Audio::Raw(vec![1u8; FRAME_BYTES * 4]);

        let opts = FilterOpts {
            voice_threshold: 0.5,
            ..FilterOpts::default()
        };
        let out = pipeline
            .filter(&input, Some(SAMPLE_RATE), &opts)?
            .into_raw()
            .unwrap();
        assert_eq!(out.len(), FRAME_BYTES * 2);
        Ok(())
    }

    #[test]
    fn missing_rate_for_raw_input_fails() {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        let err = pipeline
            .filter(&Audio::Raw(vec![0u8; FRAME_BYTES]), None, &FilterOpts::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingSampleRate));
    }

    #[test]
    fn filter_frame_enforces_width_before_the_operator() {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        let err = pipeline.filter_frame(&[0u8; FRAME_BYTES + 1]).unwrap_err();
        assert!(matches!(err, Error::FrameSize { .. }));
    }

    #[test]
    fn teardown_is_idempotent_and_blocks_further_use() {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        pipeline.teardown();
        pipeline.teardown();
        assert!(!pipeline.is_ready());

        let err = pipeline
            .filter(
                &Audio::Raw(vec![0u8; FRAME_BYTES]),
                Some(SAMPLE_RATE),
                &FilterOpts::default(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UseAfterTeardown));

        let err = pipeline.filter_frame(&[0u8; FRAME_BYTES]).unwrap_err();
        assert!(matches!(err, Error::UseAfterTeardown));

        let err = pipeline.reset().unwrap_err();
        assert!(matches!(err, Error::UseAfterTeardown));
    }

    #[test]
    fn reset_reaches_the_operator() -> Result<()> {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        pipeline.reset()?;
        pipeline.reset()?;
        assert_eq!(pipeline.operator.as_ref().unwrap().resets, 2);
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_output() -> Result<()> {
        let mut pipeline = Pipeline::with_operator(ScriptedOperator::new(vec![1.0]));
        let out = pipeline
            .filter(&Audio::Raw(Vec::new()), Some(SAMPLE_RATE), &FilterOpts::default())?
            .into_raw()
            .unwrap();
        assert!(out.is_empty());
        Ok(())
    }
}
