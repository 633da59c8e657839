//! Subscriber setup for binaries.
//!
//! The library only emits `tracing` events; applications decide whether and
//! how to collect them.

use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt, EnvFilter };

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` overrides the default filter (`qsolvers=info`, or
/// `qsolvers=debug` when `verbose`). Pass `json = true` for one JSON object per
/// event instead of the compact human-readable format.
pub fn init(verbose: bool, json: bool) {
    let default = if verbose { "qsolvers=debug,info" } else { "qsolvers=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init();
    }
}
