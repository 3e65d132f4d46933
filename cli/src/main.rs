//! CLI entrypoint for the data collector.
//!
//! Runs prepare → gather → persist once and prints the outcome. A failed run
//! still exits 0; the banner is the result.

mod args;
mod logging;

use anyhow::Result;
use clap::Parser;
use collector_core::config::rule;
use collector_core::{persist, prepare_transport, CollectorClient, Gatherer};
use tracing::debug;

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.to_config();
    debug!(?config, "configuration resolved");

    println!("AI Data Collector Starting...");
    println!("{}", rule());

    let transport = prepare_transport(&config);
    let gatherer = Gatherer::new(
        CollectorClient::new(&config.base_url),
        transport,
        config.api_source.as_str(),
    );
    let record = gatherer.collect();

    if persist(record.as_ref(), &config.output) {
        println!();
        println!("{}", rule());
        println!("Data collection completed successfully!");
        println!("Files created:");
        println!("- {} (full dataset)", config.output.data_file.display());
        println!("- {} (summary report)", config.output.summary_file.display());
    } else {
        println!("Data collection failed!");
    }

    Ok(())
}
