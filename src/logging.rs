//! Logging setup and the logger handed to bundle operations
//!
//! Diagnostics go through `tracing`. Bundle providers and operations never
//! reach for a global logger: they take a [`BundleLogger`] argument, so callers
//! decide where merge tool chatter ends up.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Sink for messages produced while loading and merging modules
pub trait BundleLogger {
    fn message(&self, msg: &str);

    fn error(&self, msg: &str);

    /// Low-priority detail, e.g. per-entry tool output
    fn verbose(&self, msg: &str) {
        self.message(msg);
    }
}

/// Forwards bundle messages to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl BundleLogger for TracingLogger {
    fn message(&self, msg: &str) {
        tracing::info!(target: "splitmerge::bundle", "{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "splitmerge::bundle", "{msg}");
    }

    fn verbose(&self, msg: &str) {
        tracing::debug!(target: "splitmerge::bundle", "{msg}");
    }
}

/// Initialize the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Without it, `verbose` selects `debug`, otherwise
/// only warnings and errors are shown so command output stays clean.
pub fn init_logging(verbose: bool) {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new("splitmerge=debug"),
        Err(_) => EnvFilter::new("warn"),
    };

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .try_init();
}
