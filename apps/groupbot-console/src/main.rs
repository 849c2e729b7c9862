use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use groupbot_console::Dispatcher;
use groupbot_core::repositories::{GroupRepository, SystemRepository};
use groupbot_infrastructure::database::connection;
use groupbot_infrastructure::{MemoryStore, PgGroupRepository, PgSystemRepository};
use groupbot_shared::config::{AppConfig, StorageBackend};

#[derive(Parser, Debug)]
#[command(
    name = "groupbot-console",
    version,
    about = "Groupbot - group commands on a line-oriented console"
)]
struct Args {
    /// Storage backend; overrides `bot.backend` from configuration
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Human id of the system to act as on startup
    #[arg(long = "as")]
    act_as: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Memory,
    Postgres,
}

impl From<BackendArg> for StorageBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Memory => StorageBackend::Memory,
            BackendArg::Postgres => StorageBackend::Postgres,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry
    groupbot_shared::telemetry::init_telemetry(&config.log)?;
    info!("{} starting ({})", config.app.name, config.app.env);

    let backend = args.backend.map(Into::into).unwrap_or(config.bot.backend);
    match backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            let store = Arc::new(MemoryStore::new());
            let dispatcher = Dispatcher::new(store.clone(), store, config.bot.prefix.clone());
            run(dispatcher, args.act_as).await
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = connection::create_pool(&config.database).await?;
            connection::run_migrations(&pool).await?;
            info!("Database connection established.");

            let dispatcher = Dispatcher::new(
                Arc::new(PgGroupRepository::new(pool.clone())),
                Arc::new(PgSystemRepository::new(pool)),
                config.bot.prefix.clone(),
            );
            run(dispatcher, args.act_as).await
        }
    }
}

async fn run<G, S>(mut dispatcher: Dispatcher<G, S>, act_as: Option<String>) -> Result<()>
where
    G: GroupRepository,
    S: SystemRepository,
{
    if let Some(hid) = act_as {
        if let Err(e) = dispatcher.act_as(&hid).await {
            error!("Cannot act as {}: {}", hid, e);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        for output in dispatcher.handle_line(&line).await {
            println!("{}\n", output);
        }
    }

    info!("Console closed");
    Ok(())
}
