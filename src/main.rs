use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wapp::app::AppContext;
use wapp::cli::{commands, Cli, Commands};
use wapp::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output or the TUI.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(policy) = cli.policy {
        config.api.policy = policy;
    }
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Info { host } => {
            commands::info(&ctx, &host).await?;
        }
        Commands::Home { host } => {
            commands::home(&ctx, &host).await?;
        }
        Commands::List {
            host,
            kind,
            category,
            tag,
            page,
        } => {
            commands::list(
                &ctx,
                &host,
                kind,
                category.as_deref(),
                tag.as_deref(),
                page.as_deref(),
            )
            .await?;
        }
        Commands::Open { route } => {
            commands::open(&ctx, &route).await?;
        }
        Commands::Tui { host } => {
            wapp::tui::run(Arc::new(ctx), host).await?;
        }
    }

    Ok(())
}
