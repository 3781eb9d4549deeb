pub mod build_info;

use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset; the prefix also covers the `famfin_*` crates.
const DEFAULT_DIRECTIVE: &str = "famfin=info";

/// Initializes the global tracing subscriber. Events go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        fmt().with_env_filter(filter).with_writer(io::stderr).init();
    });
}
