use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspira_core::catalog::CatalogLoader;
use inspira_core::config::Config;
use inspira_core::error::Error;
use inspira_service::RecommendationService;
use inspira_text::extract;

#[derive(Parser, Debug)]
#[command(name = "inspira", about = "Content-based recommendations over a local catalog")]
struct CliArgs {
    /// Catalog file or directory of *.json files. Overrides `data.catalog_path`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog items.
    Items {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Show the text each item is vectorized from.
    Features { id: Option<String> },
    /// Recommend items for a user.
    Recommend {
        #[arg(long)]
        user: String,
        /// Seed item; repeat for several. Defaults to the user's own items.
        #[arg(long = "item")]
        items: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
struct FeatureRow<'a> {
    id: &'a str,
    document: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()?;

    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    let catalog_path = match cli_args.catalog {
        Some(path) => path,
        None => config.catalog_path()?,
    };

    let items = CatalogLoader::new().load(&catalog_path)?;
    info!(path = %catalog_path.display(), items = items.len(), "catalog loaded");

    let service = RecommendationService::from_settings(&settings);
    service.add_items(items);

    match cli_args.command {
        Command::Items { owner } => print_json(&service.items(owner.as_deref()))?,
        Command::Features { id } => {
            let items = match id {
                Some(id) => vec![service.item(&id).ok_or_else(|| Error::NotFound(format!("Item {id} not found")))?],
                None => service.items(None),
            };
            let rows: Vec<FeatureRow> =
                items.iter().map(|item| FeatureRow { id: &item.id, document: extract(item).into_string() }).collect();
            print_json(&rows)?;
        }
        Command::Recommend { user, items, limit } => print_json(&service.recommend(&user, &items, limit)?)?,
    }
    Ok(())
}
