/// Options that control how a denoising pass is performed.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI is responsible for mapping user input into this type so
/// that the library remains reusable outside of a CLI context.
#[derive(Debug, Clone)]
pub struct FilterOpts {
    /// Minimum voice probability a frame needs to survive the gate.
    ///
    /// In [0, 1]. The default of 0 keeps every frame (no filtering). Frames
    /// below the threshold are removed outright, shortening the output.
    pub voice_threshold: f32,

    /// Whether to resample the output back to the input's original rate.
    ///
    /// Denoising always runs at 48 kHz internally; when this is `false` the
    /// output stays at 48 kHz regardless of the input rate.
    pub preserve_original_rate: bool,
}

impl Default for FilterOpts {
    fn default() -> Self {
        Self {
            voice_threshold: 0.0,
            preserve_original_rate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_all_frames_and_restore_rate() {
        let opts = FilterOpts::default();
        assert_eq!(opts.voice_threshold, 0.0);
        assert!(opts.preserve_original_rate);
    }
}
