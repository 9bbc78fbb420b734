use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize compact human-readable logging on stderr.
///
/// Suited to the batch CLI: denoised audio goes to a file, diagnostics go
/// to stderr. Defaults to `warn` level unless overridden by `HUSH_LOG`
/// (per-frame pipeline events sit at `debug`).
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Initialize structured JSON logging, for long-running services that feed
/// their logs to a collector. Same `HUSH_LOG` filter as [`init`].
pub fn init_json() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().json())
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_env_var("HUSH_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        init_json();
    }
}
