//! Voice-probability gating.
//!
//! Frames below the caller's voice-probability threshold are removed from
//! the output entirely. Dropped frames leave no gap marker: the output
//! simply shrinks. That lossy-in-time behavior is deliberate (it is how an
//! inline VAD trims non-speech), so callers who need constant duration
//! should gate at threshold 0.

use crate::framer::Frame;

/// One frame's worth of operator output: the denoised frame plus the
/// operator's confidence that it contains voiced speech.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    /// Voice probability in [0, 1].
    pub voice_probability: f32,
    /// The denoised frame.
    pub frame: Frame,
}

/// Keep only frames whose voice probability meets `threshold`.
///
/// Order-preserving. A threshold of 0 keeps every frame (the default, no
/// filtering); a threshold of 1 keeps only frames the operator is certain
/// about. For thresholds `t1 <= t2`, the frames kept at `t2` are always a
/// subset of those kept at `t1`.
pub fn filter(results: Vec<FrameResult>, threshold: f32) -> Vec<Frame> {
    results
        .into_iter()
        .filter(|r| r.voice_probability >= threshold)
        .map(|r| r.frame)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(probs: &[f32]) -> Vec<FrameResult> {
        probs
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut frame = Frame::silence();
                let mut samples = [0i16; crate::profile::FRAME_SAMPLES];
                samples[0] = i as i16;
                frame.copy_samples_from(&samples);
                FrameResult {
                    voice_probability: p,
                    frame,
                }
            })
            .collect()
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let input = results(&[0.0, 0.3, 0.9]);
        assert_eq!(filter(input, 0.0).len(), 3);
    }

    #[test]
    fn gate_preserves_order() {
        let input = results(&[0.9, 0.1, 0.8]);
        let kept = filter(input, 0.5);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].samples()[0], 0);
        assert_eq!(kept[1].samples()[0], 2);
    }

    #[test]
    fn threshold_is_inclusive() {
        let input = results(&[0.5]);
        assert_eq!(filter(input, 0.5).len(), 1);
    }

    #[test]
    fn raising_threshold_keeps_a_subset() {
        let probs = [0.1, 0.4, 0.4, 0.7, 0.95];
        let low = filter(results(&probs), 0.3);
        let high = filter(results(&probs), 0.6);

        assert!(high.len() <= low.len());
        for frame in &high {
            assert!(low.contains(frame));
        }
    }

    #[test]
    fn full_threshold_on_silent_scores_empties_output() {
        let input = results(&[0.0, 0.0, 0.0]);
        assert!(filter(input, 1.0).is_empty());
    }
}
