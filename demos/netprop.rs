//! Computes network properties or merges network groups, driven by a JSON settings file.
//!
//! ```text
//! cargo run --example netprop -- settings.json net1.txt net2.txt.gz   # analyse networks
//! cargo run --example netprop -- settings.json                        # merge network groups
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use netprop::{groups::NetworkGroups, pipeline::AnalysisPipeline, settings::Settings};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "netprop")]
#[command(about = "Compute network properties or merge network groups")]
struct Cli {
    /// JSON settings file
    settings: PathBuf,

    /// Network files to analyse; without any, the network groups are merged instead
    networks: Vec<PathBuf>,
}

fn main() -> netprop::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let network_files = cli.networks;

    let settings = Settings::from_json_file(&cli.settings)?;
    let start = Instant::now();

    if network_files.is_empty() {
        let groups = NetworkGroups::from_settings(&settings)?;
        let written = groups.run(&settings)?;
        info!("merged {} network groups", written.len());
    } else {
        let pipeline = AnalysisPipeline::new(&settings)?;

        for (i, file) in network_files.iter().enumerate() {
            info!("network {}/{}: {}", i + 1, network_files.len(), file.display());

            for mean in pipeline.process_file(file)? {
                println!("{}\t{}\t{}", file.display(), mean.name, mean.value);
            }
        }
    }

    info!("done in {:?}", start.elapsed());

    Ok(())
}
