//! Logging initialization

/// Initialize logging at `level`
///
/// `level` only applies to kbench itself; dependencies such as kube and hyper
/// stay at `warn`. `RUST_LOG` takes precedence when set. Logs go to stderr so
/// stdout stays free for benchmark output.
pub fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directives(level))),
        )
        .without_time()
        .with_target(true)
        .init();
}

/// Filter directives used when `RUST_LOG` is unset
fn default_directives(level: &str) -> String {
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}
