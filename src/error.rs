use thiserror::Error;

/// Hush's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Hush's crate-wide error type.
///
/// Every failure in the pipeline is a deterministic function of its input,
/// so nothing here is retried internally; errors propagate synchronously to
/// the caller of `filter`/`filter_frame`.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw-byte audio carries no embedded rate, so the caller must supply one.
    #[error("raw audio bytes require an explicit sample rate")]
    MissingSampleRate,

    /// Input file is not a `.wav` container.
    #[error("unsupported audio container: '{0}' (expected a .wav file)")]
    UnsupportedContainer(String),

    /// A caller-supplied frame did not match the fixed frame width.
    ///
    /// This is caught before the denoise operator is ever reached; the
    /// native layer cannot recover from a wrong-size frame.
    #[error("frame must be exactly {expected} bytes, got {actual}")]
    FrameSize { expected: usize, actual: usize },

    /// Processing was attempted after the operator handle was released.
    #[error("pipeline used after teardown")]
    UseAfterTeardown,

    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Resample(#[from] rubato::ResampleError),

    #[error(transparent)]
    ResamplerConstruction(#[from] rubato::ResamplerConstructionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}
