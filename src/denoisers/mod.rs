//! Built-in [`crate::denoiser::DenoiseOperator`] implementations.

pub mod rnnoise;

pub use rnnoise::RnnoiseDenoiser;
