use anyhow::Result;
use clap::Parser;
use rookery::cli::{App, Cli, Commands, ConfigCommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = App::new(cli.config)?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app.config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Loaded configuration from {}", app.config_path.display());

    match cli.command {
        Commands::New => app.handle_new(),
        Commands::Play { fen, json, moves } => app.handle_play(fen.as_deref(), json, &moves),
        Commands::Moves { fen, square } => app.handle_moves(fen.as_deref(), &square),
        Commands::Config { command } => match command {
            ConfigCommand::Path => app.handle_config_path(),
            ConfigCommand::Show => app.handle_config_show(),
        },
    }
}
