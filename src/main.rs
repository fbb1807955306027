//! panelkit - headless scenario simulator for the panel runtime

use anyhow::Result;
use clap::Parser;

use panelkit::cli::{CliArgs, OutputFormat};
use panelkit::scenario::{self, Scenario};

fn main() -> Result<()> {
    panelkit::logging::init();

    let args = CliArgs::parse();
    let scenario = Scenario::load(&args.scenario)?;
    let config = args.runtime_config(&scenario)?;
    tracing::info!(scenario = %args.scenario.display(), ?config, "Running scenario");

    let report = scenario::run(&scenario, &config)?;
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
