use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("public_api_config=debug,info")
        } else {
            EnvFilter::new("public_api_config=info")
        }
    })
}

/// Compact human-readable output, or one JSON object per line for log collectors.
pub fn init_logger(verbose: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
