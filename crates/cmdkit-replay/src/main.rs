//! cmdkit replay entry point.

use std::error::Error;

use cmdkit_replay::config::ReplayConfig;
use cmdkit_replay::replay;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting cmdkit replay");

    // Read configuration from environment.
    let config = ReplayConfig::from_env()?;
    tracing::info!(
        script_path = %config.script_path.display(),
        undo = config.undo,
        "loaded configuration"
    );

    let report = replay::run(&config)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
