//! Command-line argument parsing for the scenario simulator
//!
//! Supports:
//! - Running a YAML scenario headlessly
//! - Text or JSON output
//! - Config file and UI scale overrides

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RuntimeConfig;
use crate::scenario::Scenario;

/// Headless panel runtime simulator
#[derive(Parser, Debug)]
#[command(name = "panelkit", version, about = "Run a panel runtime scenario headlessly")]
pub struct CliArgs {
    /// Scenario file (YAML)
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file to use instead of ~/.config/panelkit/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the UI render scale
    #[arg(long, value_name = "SCALE")]
    pub ui_scale: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliArgs {
    /// Resolve the runtime config: `--config`, else the scenario config, else
    /// the user config; `--ui-scale` applies last
    pub fn runtime_config(&self, scenario: &Scenario) -> anyhow::Result<RuntimeConfig> {
        let mut config = match (&self.config, &scenario.config) {
            (Some(path), _) => RuntimeConfig::load_from(path)?,
            (None, Some(config)) => config.clone(),
            (None, None) => RuntimeConfig::load(),
        };
        if let Some(scale) = self.ui_scale {
            config.ui_scale = scale;
        }
        Ok(config)
    }
}
