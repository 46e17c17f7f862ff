use tracing_subscriber::EnvFilter;

/// Initialize logging for binaries. Safe to call once per process.
pub fn init(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                default_directive
                    .parse()
                    .expect("invalid default log directive"),
            ),
        )
        .init();
}
