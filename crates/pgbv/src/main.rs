#![forbid(unsafe_code)]

//! `pgbv`: render PostgreSQL block free-space maps.
//!
//! ```text
//! pgbv --connect-url postgres://localhost/app generate --relation accounts
//! pgbv --connect-url postgres://localhost/app serve --listen-address 0.0.0.0:8080
//! ```

mod cli;
mod settings;

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pgbv_db::{PgBlockSource, fetch_table_within};
use pgbv_layout::LayoutEngine;
use pgbv_render::{SvgCanvas, TableRenderer};
use pgbv_server::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Command::Version = cli.command {
        println!(
            "pgbv {} ({}-{})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::ARCH,
            std::env::consts::OS
        );
        return Ok(());
    }

    let settings = Settings::load(&cli).context("loading settings")?;
    init_logging(&settings.log_level)?;

    let result = match cli.command {
        Command::Generate(_) => generate(&settings).await,
        Command::Serve(_) => serve(&settings).await,
        Command::Version => Ok(()),
    };
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {level:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))
}

fn renderer(settings: &Settings) -> Result<TableRenderer> {
    let engine =
        LayoutEngine::try_new(settings.layout_config()).context("invalid layout settings")?;
    Ok(TableRenderer::new(engine))
}

async fn connect(settings: &Settings) -> Result<PgBlockSource> {
    if settings.connect_url.is_empty() {
        bail!("no connection URL: pass --connect-url or set PG_BUFFER_VIZ_CONNECT_URL");
    }
    PgBlockSource::connect(&settings.connect_url, settings.timeout())
        .await
        .context("connecting to PostgreSQL")
}

async fn generate(settings: &Settings) -> Result<()> {
    if settings.relation.is_empty() {
        bail!("no relation: pass --relation or set PG_BUFFER_VIZ_RELATION");
    }
    let renderer = renderer(settings)?;
    let source = connect(settings).await?;

    let table = fetch_table_within(&source, &settings.relation, settings.timeout())
        .await
        .with_context(|| format!("fetching {}", settings.relation))?;

    let output = &settings.output;
    let file =
        File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let canvas = SvgCanvas::new(BufWriter::new(file)).interactive(settings.interactive);
    renderer
        .render(&table, canvas)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        relation = %settings.relation,
        output = %output.display(),
        blocks = renderer.engine().compose(&table).block_count(),
        "wrote block map"
    );
    Ok(())
}

async fn serve(settings: &Settings) -> Result<()> {
    let renderer = renderer(settings)?;
    let source = connect(settings).await?;
    let state = AppState::new(Arc::new(source), renderer)
        .interactive(settings.interactive)
        .timeout(settings.timeout());

    let listener = TcpListener::bind(&settings.listen_address)
        .await
        .with_context(|| format!("binding {}", settings.listen_address))?;
    pgbv_server::serve(listener, state)
        .await
        .context("serving HTTP")
}
