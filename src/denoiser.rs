use crate::framer::Frame;

/// Pluggable denoise operator used by [`crate::pipeline::Pipeline`].
///
/// An operator consumes one working-profile frame at a time, overwrites it
/// with denoised content, and reports the probability that the frame
/// contains voiced speech. Implementations are stateful: the operator
/// adapts to recent noise, so successive calls on the same instance are
/// order-dependent, while separate instances are fully independent.
///
/// Callers must not interleave frames from two logical streams through one
/// instance if they need the streams denoised independently; use separate
/// instances or call [`DenoiseOperator::reset`] between streams.
pub trait DenoiseOperator {
    /// Denoise `frame` in place and return the voice probability in [0, 1].
    ///
    /// The frame type guarantees the operator's size precondition, so this
    /// is infallible.
    fn process(&mut self, frame: &mut Frame) -> f32;

    /// Discard accumulated adaptation, returning to the initial condition.
    ///
    /// Advisory: there is no evidence resetting improves output quality, but
    /// it must be idempotent and safe to call any number of times.
    fn reset(&mut self);
}
