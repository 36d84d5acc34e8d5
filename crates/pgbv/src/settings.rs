#![forbid(unsafe_code)]

//! Layered settings.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. `$HOME/.pg_buffer_viz.{toml,yaml,json}` or the file given by `--config`
//! 3. `PG_BUFFER_VIZ_*` environment variables
//! 4. command-line flags

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use pgbv_layout::{Coordinate, LayoutConfig, Size};
use serde::Deserialize;

use crate::cli::{Cli, Command};

pub const ENV_PREFIX: &str = "PG_BUFFER_VIZ";
const HOME_CONFIG: &str = ".pg_buffer_viz";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub connect_url: String,
    pub relation: String,
    pub output: PathBuf,
    pub block_width: u32,
    pub block_height: u32,
    pub margin_width: u32,
    pub margin_height: u32,
    pub narrow_threshold: u32,
    pub narrow_clamp: u32,
    pub timeout_secs: u64,
    pub listen_address: String,
    pub interactive: bool,
}

impl Settings {
    /// Load every layer for `cli`, reading the process environment.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli.global.config.clone().or_else(home_config);
        Self::load_from(cli, file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load with an explicit config file and environment source.
    pub fn load_from(
        cli: &Cli,
        file: Option<PathBuf>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("connect_url", "")?
            .set_default("relation", "")?
            .set_default("output", "output.svg")?
            .set_default("block_width", 10_i64)?
            .set_default("block_height", 10_i64)?
            .set_default("margin_width", 3_i64)?
            .set_default("margin_height", 3_i64)?
            .set_default("narrow_threshold", i64::from(LayoutConfig::NARROW_THRESHOLD))?
            .set_default("narrow_clamp", i64::from(LayoutConfig::NARROW_CLAMP))?
            .set_default("timeout_secs", 5_i64)?
            .set_default("listen_address", "127.0.0.1:8080")?
            .set_default("interactive", true)?;

        if let Some(path) = file {
            let required = cli.global.config.is_some();
            builder = builder.add_source(File::from(path).required(required));
        }

        builder = builder.add_source(env.try_parsing(true));

        let global = &cli.global;
        builder = builder
            .set_override_option("log_level", global.log_level.clone())?
            .set_override_option("connect_url", global.connect_url.clone())?
            .set_override_option("block_width", global.block_width.map(i64::from))?
            .set_override_option("block_height", global.block_height.map(i64::from))?
            .set_override_option("margin_width", global.margin_width.map(i64::from))?
            .set_override_option("margin_height", global.margin_height.map(i64::from))?
            .set_override_option(
                "timeout_secs",
                global.timeout_secs.and_then(|s| i64::try_from(s).ok()),
            )?;
        if global.no_interactive {
            builder = builder.set_override("interactive", false)?;
        }

        match &cli.command {
            Command::Generate(args) => {
                builder = builder
                    .set_override_option("relation", args.relation.clone())?
                    .set_override_option(
                        "output",
                        args.output.as_ref().map(|p| p.to_string_lossy().into_owned()),
                    )?;
            }
            Command::Serve(args) => {
                builder =
                    builder.set_override_option("listen_address", args.listen_address.clone())?;
            }
            Command::Version => {}
        }

        builder.build()?.try_deserialize()
    }

    /// Sizing settings as a layout configuration.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(
            Size::new(self.block_width, self.block_height),
            Size::new(self.margin_width, self.margin_height),
        )
        .narrow_floor(self.narrow_threshold, self.narrow_clamp)
        .origin(Coordinate::new(1, 1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `$HOME/.pg_buffer_viz`, format picked from the extension found on disk.
fn home_config() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HOME_CONFIG))
}
