mod cli;
mod commands;
mod config;
mod storage;
mod wizard;

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entry point wiring the CLI to the wizard and the secret store.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    let store = storage::store_from_config(&config);
    match cli.command.unwrap_or(cli::Command::Setup { force: false }) {
        cli::Command::Setup { force } => {
            wizard::SetupWizard::new(force).run(store.as_ref()).await?
        }
        cli::Command::Show => commands::show(store.as_ref()).await?,
        cli::Command::Check => commands::check(store.as_ref()).await?,
        cli::Command::Delete { yes } => commands::delete(store.as_ref(), yes).await?,
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
        cli::Command::Version => print_version(),
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("herald {}", env!("CARGO_PKG_VERSION"));
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
