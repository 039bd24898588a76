use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logs go to stderr so stdout stays machine-readable for `tables --json`.
pub fn setup_logger() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(if cfg!(debug_assertions) {
            LevelFilter::DEBUG.into()
        } else {
            LevelFilter::INFO.into()
        })
        .with_env_var("COMMIT_PLOTS_LOG")
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_ansi(console::colors_enabled_stderr())
        .with_target(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .try_init()
        .ok();
}
