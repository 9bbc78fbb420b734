//! The fixed working profile the denoise operator requires.
//!
//! RNNoise only understands one format: 16-bit signed little-endian PCM,
//! mono, 48 kHz, consumed in 10 ms frames. Everything entering the frame
//! loop is coerced to this profile first; everything leaving it is tagged
//! with it until (optional) rate restoration.

/// Sample rate of the working profile (Hz).
pub const SAMPLE_RATE: u32 = 48_000;

/// Channel count of the working profile.
pub const CHANNELS: u16 = 1;

/// Width of one sample in bytes (16-bit PCM).
pub const SAMPLE_WIDTH: usize = 2;

/// Duration of one frame in milliseconds.
pub const FRAME_DURATION_MS: u32 = 10;

/// Samples per frame: 48000 Hz * 0.010 s = 480.
pub const FRAME_SAMPLES: usize = (SAMPLE_RATE as usize / 1000) * FRAME_DURATION_MS as usize;

/// Bytes per frame: 480 samples * 2 bytes = 960.
///
/// Every frame handed to the denoise operator has exactly this byte width.
/// The native layer has no recovery path for a wrong-size frame, so the
/// framing code is the sole enforcement point.
pub const FRAME_BYTES: usize = FRAME_SAMPLES * SAMPLE_WIDTH;
