//! Create the schema and load the placeholder dashboard data.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use invoice_dashboard::domain::Seeder;
use invoice_dashboard::outbound::persistence::{
    DatabaseSettings, DbPool, DieselSeedRepository, PoolConfig, run_migrations,
};

/// `seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed",
    about = "Apply migrations and insert placeholder users, customers, invoices and revenue",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to the `DATABASE_*` settings.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Only insert data; assume the schema is already current.
    #[arg(long)]
    skip_migrations: bool,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(url) = explicit {
        return Ok(url);
    }
    let settings = DatabaseSettings::load_from_iter([OsString::from("seed")])
        .map_err(|err| eyre!("load database settings: {err}"))?;
    settings
        .connection_url()
        .ok_or_else(|| eyre!("no database configured; pass --database-url or set DATABASE_URL"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        eprintln!("tracing init failed: {e}");
    }
    let args = CliArgs::parse();
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;
    if !args.skip_migrations {
        run_migrations(&database_url)
            .await
            .wrap_err("apply migrations")?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("create database pool")?;
    let seeder = Seeder::new(Arc::new(DieselSeedRepository::new(pool)));
    let counts = seeder
        .seed_placeholders()
        .await
        .wrap_err("seed placeholder data")?;

    println!(
        "seeded {} users, {} customers, {} invoices, {} revenue rows",
        counts.users, counts.customers, counts.invoices, counts.revenue
    );
    Ok(())
}
