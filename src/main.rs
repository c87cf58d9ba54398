use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            gazette::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::Fetch { lang } => {
            let target = match lang {
                Some(code) => code.parse()?,
                None => config.language()?,
            };
            commands::fetch_once(&ctx, &config, target).await?;
        }
        Commands::Sources => {
            commands::list_sources(&config)?;
        }
        Commands::Languages => {
            commands::list_languages();
        }
    }

    Ok(())
}
