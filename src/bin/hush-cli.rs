use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use hush::Audio;
use hush::logging;
use hush::opts::FilterOpts;
use hush::pipeline::Pipeline;
use hush::wav::{read_wav_file, write_wav_file};

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let audio = read_wav_file(&params.input, None)?;
    let input_ms = audio.duration_ms();

    let opts = FilterOpts {
        voice_threshold: params.threshold,
        preserve_original_rate: !params.keep_48k,
    };

    let mut pipeline = Pipeline::new();
    let started = Instant::now();
    let denoised = pipeline
        .filter(&Audio::Buffer(audio), None, &opts)?
        .into_buffer()
        .ok_or_else(|| anyhow::anyhow!("expected a structured buffer back from the pipeline"))?;
    let elapsed = started.elapsed();

    tracing::info!(
        input = %params.input,
        input_ms,
        output_ms = denoised.duration_ms(),
        elapsed_ms = elapsed.as_millis() as u64,
        "denoised recording"
    );

    write_wav_file(&params.output, &denoised, None)?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "hush")]
#[command(about = "A speech denoising CLI")]
struct Params {
    #[arg(short = 'i', long = "input")]
    pub input: String,

    #[arg(short = 'o', long = "output")]
    pub output: String,

    /// Drop frames whose voice probability is below this value (0 keeps all).
    #[arg(short = 't', long = "threshold", default_value_t = 0.0)]
    pub threshold: f32,

    /// Keep the output at the 48 kHz working rate instead of the input's rate.
    #[arg(long = "keep-48k", default_value_t = false)]
    pub keep_48k: bool,
}
