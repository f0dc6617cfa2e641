use tracing_subscriber::EnvFilter;

/// Initialize stderr logging, filtered by `GROSSMASS_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("GROSSMASS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to init logger: {}", e);
    }
}
