//! wowicache binary.
//!
//! Reads `wowicache.toml` (or the path given with `--config`) layered under
//! `WOWICACHE_*` environment variables, then runs one subcommand:
//!
//! ```text
//! wowicache sync      # optional backup, then a full sync of enabled kinds
//! wowicache backup    # copy the cache into backup_dir
//! wowicache restore   # copy the newest backup over the cache
//! wowicache plan      # print the resolved sync order
//! ```

use std::{
  fs::{self, OpenOptions},
  path::PathBuf,
  process::ExitCode,
  sync::Mutex,
};

use anyhow::{Context as _, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;
use wowi_client::WowiClient;
use wowi_store_sqlite::SqliteStore;
use wowicache::{BackupManager, Settings, SyncOrchestrator};

#[derive(Parser)]
#[command(author, version, about = "Mirror the property-management API into a local cache")]
struct Cli {
  /// Path to the configuration file.
  #[arg(short, long, default_value = "wowicache.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Replace every enabled entity kind with fresh data from the API.
  Sync,
  /// Back up the cache database.
  Backup,
  /// Restore the most recent backup over the cache database.
  Restore,
  /// Show the order in which enabled kinds would be synchronised.
  Plan,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to read settings from {}", cli.config.display()))?;
  init_tracing(&settings)?;

  match cli.command {
    Command::Sync => sync(&settings).await,
    Command::Backup => Ok(exit_code(backups(&settings)?.backup(&settings.db_connection_string))),
    Command::Restore => Ok(exit_code(
      backups(&settings)?.restore_latest(&settings.db_connection_string),
    )),
    Command::Plan => {
      let plan = settings.sync_config().plan();
      if plan.is_empty() {
        println!("no entity kinds enabled");
      } else {
        println!("{plan}");
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}

async fn sync(settings: &Settings) -> anyhow::Result<ExitCode> {
  let config = settings.sync_config();
  info!(requested = ?config.requested, "wowicache sync started");

  if let Some(dir) = &settings.backup_dir {
    let backed_up = BackupManager::new(dir).backup(&settings.db_connection_string);
    if !backed_up && settings.require_backup {
      bail!("backup failed and require_backup is set, not syncing");
    }
  }

  let store = SqliteStore::connect(&settings.db_connection_string)
    .await
    .with_context(|| format!("failed to open store {:?}", settings.db_connection_string))?;
  let source = WowiClient::new(settings.client_config()).context("failed to build HTTP client")?;

  let report = SyncOrchestrator::new(store, source, config)
    .run()
    .await
    .context("sync failed")?;

  for kind in &report.kinds {
    println!(
      "{:<16} deleted {:>7}  fetched {:>7}  inserted {:>7}  skipped {:>4}",
      kind.kind.as_str(),
      kind.deleted,
      kind.fetched,
      kind.inserted,
      kind.skipped.len()
    );
  }
  Ok(ExitCode::SUCCESS)
}

fn backups(settings: &Settings) -> anyhow::Result<BackupManager> {
  settings
    .backup_dir
    .as_ref()
    .map(|dir| BackupManager::new(dir))
    .context("backup_dir is not configured")
}

fn exit_code(ok: bool) -> ExitCode { if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE } }

/// Log to stderr, or append to `<log_dir>/wowicache_<YYYY_MM_DD>.log` when a
/// log directory is configured. `RUST_LOG` overrides `log_level`.
fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(level_filter(&settings.log_level).into())
    .from_env_lossy();

  match &settings.log_dir {
    Some(dir) => {
      fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
      let path = dir.join(format!("wowicache_{}.log", Local::now().format("%Y_%m_%d")));
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
    None => tracing_subscriber::fmt().with_env_filter(filter).init(),
  }
  Ok(())
}

/// Unknown names fall back to `info`.
fn level_filter(name: &str) -> LevelFilter {
  match name.trim().to_ascii_lowercase().as_str() {
    "trace" => LevelFilter::TRACE,
    "debug" => LevelFilter::DEBUG,
    "warn" | "warning" => LevelFilter::WARN,
    "error" | "critical" => LevelFilter::ERROR,
    "off" => LevelFilter::OFF,
    _ => LevelFilter::INFO,
  }
}
