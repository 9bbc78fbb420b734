//! `hush` — a small, focused speech-denoising library built on top of RNNoise.
//!
//! This crate provides:
//! - Format normalization (downmix, resample) to the fixed profile RNNoise requires
//! - Frame segmentation with tail padding
//! - Per-frame denoising with voice-probability gating
//! - Reassembly with optional restoration of the input's sample rate
//! - WAV read/write glue
//!
//! The library is designed to be used by both CLI tools and long-running
//! services, with an emphasis on sample-accurate framing and minimal surprises.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// The fixed working profile and shared audio types.
pub mod audio;
pub mod profile;

// Pipeline stages.
pub mod framer;
pub mod gate;
pub mod normalize;
pub mod reassemble;
pub mod resample;

// The denoise operator seam and its built-in implementations.
pub mod denoiser;
pub mod denoisers;

// WAV container glue.
pub mod wav;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub mod error;

pub use audio::{Audio, AudioBuffer};
pub use denoiser::DenoiseOperator;
pub use denoisers::RnnoiseDenoiser;
pub use error::{Error, Result};
pub use opts::FilterOpts;
pub use pipeline::Pipeline;
