use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hopeful::app::AppContext;
use hopeful::cli::{commands, Cli, Commands};
use hopeful::config::Config;
use hopeful::domain::FilterState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never land on the TUI or piped output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    let ctx = AppContext::new(&config.api)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            hopeful::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::List {
            category,
            region,
            min_score,
            pages,
        } => {
            let filters = FilterState {
                category,
                region,
                min_score,
            };
            commands::list_articles(&ctx, filters, config.feed.page_size, pages).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx).await?;
        }
        Commands::Regions => {
            commands::list_regions(&ctx).await?;
        }
        Commands::Stats => {
            commands::show_stats(&ctx).await?;
        }
    }

    Ok(())
}
