use crate::commands::MessageKind;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::domain::campaign::Campaign;
use crate::domain::feed::Collection;
use crate::domain::lead::{Lead, SocialLead};
use crate::responses::html_error_response;
use crate::router::{handle, AppState};
use anyhow::{anyhow, Context, Result};
use astra::Server;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod db;
mod domain;
mod errors;
mod outreach;
mod responses;
mod router;
mod spreadsheets;
mod templates;
mod webhook;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "outreach-desk", version, about = "Lead search and outreach dashboard")]
struct Cli {
    /// SQLite database file (overrides OUTREACH_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web dashboard (default)
    Serve(ServeArgs),
    /// Follow a collection's change feed and log every change
    Watch(WatchArgs),
    /// Print a generated outreach message for one lead
    Render(RenderArgs),
}

#[derive(Parser, Debug, Default)]
struct ServeArgs {
    /// Address to listen on (overrides OUTREACH_BIND_ADDR)
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Worker threads (overrides OUTREACH_MAX_WORKERS)
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// campaigns, leads or instagram_leads
    collection: String,

    #[arg(long, default_value_t = 5)]
    interval_secs: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    lead_id: String,

    #[arg(value_enum)]
    message: MessageKind,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    init_tracing();
    dotenv.log();
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("invalid configuration")?;
    if let Some(path) = cli.db {
        config.db_path = path;
    }

    let db = Database::new(config.db_path.clone());
    init_db(&db, &config.schema_path).context("database initialization failed")?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            if let Some(bind) = args.bind {
                config.bind_addr = bind;
            }
            if let Some(workers) = args.workers.filter(|n| *n > 0) {
                config.max_workers = workers;
            }
            serve(db, &config)
        }
        Commands::Watch(args) => {
            let collection = Collection::parse(&args.collection)
                .ok_or_else(|| anyhow!("unknown collection: {}", args.collection))?;
            let interval = Duration::from_secs(args.interval_secs.max(1));
            let result = match collection {
                Collection::Campaigns => commands::watch::<Campaign>(&db, interval),
                Collection::Leads => commands::watch::<Lead>(&db, interval),
                Collection::InstagramLeads => commands::watch::<SocialLead>(&db, interval),
            };
            Ok(result?)
        }
        Commands::Render(args) => {
            let text = commands::render_message(&db, &args.lead_id, args.message)
                .with_context(|| format!("rendering {:?} for {}", args.message, args.lead_id))?;
            println!("{text}");
            Ok(())
        }
    }
}

fn serve(db: Database, config: &AppConfig) -> Result<()> {
    let state = AppState::new(db, config);
    if state.webhook_url.is_none() {
        tracing::warn!("OUTREACH_WEBHOOK_URL not set, new campaigns will not be dispatched");
    }

    tracing::info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");

    Server::bind(&config.bind_addr)
        .max_workers(config.max_workers)
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => html_error_response(err),
        })
        .context("server ended with error")?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
