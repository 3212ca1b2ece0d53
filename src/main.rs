use std::io;

use radix_converter::app::shell::{HELP, Shell};
use radix_converter::config::AppConfig;
use radix_converter::SessionState;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, the screen goes to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "starting converter");

    let mut session = SessionState::with_config(config.format)?;
    println!("{HELP}\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Shell::new(&mut session, config.orientation).run(stdin.lock(), &mut stdout)?;

    Ok(())
}
