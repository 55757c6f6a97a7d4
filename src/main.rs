use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use junction_lanes::{
    config::{JunctionLanesConfig, Settings},
    connector::LaneConnector,
    network::RoadNetwork,
    Handedness, LaneId,
};

#[derive(Parser)]
#[command(name = "junction-lanes")]
#[command(about = "Assigns junction lane connections and turn arrows for a road network")]
struct Args {
    /// Road network file
    #[arg(short, long, default_value = "network.toml")]
    network: String,

    /// Settings file
    #[arg(short, long, default_value = "settings.toml")]
    settings: String,

    /// Override the traffic convention from the settings file
    #[arg(short, long, value_enum)]
    traffic: Option<Traffic>,

    /// Ignore outgoing bus lanes (legacy lane rules)
    #[arg(short, long)]
    legacy: bool,

    /// Only update this segment
    #[arg(long)]
    segment: Option<u16>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,

    /// Enable verbose logging for each junction
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Traffic {
    /// Vehicles keep to the right
    RightHand,
    /// Vehicles keep to the left
    LeftHand,
}

impl From<Traffic> for Handedness {
    fn from(traffic: Traffic) -> Self {
        match traffic {
            Traffic::RightHand => Handedness::RightHand,
            Traffic::LeftHand => Handedness::LeftHand,
        }
    }
}

fn effective_settings(args: &Args, loaded: Settings) -> Settings {
    let mut settings = loaded;
    if let Some(traffic) = args.traffic {
        settings.traffic = traffic.into();
    }
    if args.legacy {
        settings.legacy_mode = true;
    }
    settings
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting junction lane assignment");

    let config = JunctionLanesConfig::load_from_files(&args.network, &args.settings)?;
    let settings = effective_settings(&args, config.settings);
    info!(
        "Loaded network '{}': {} nodes, {} segments ({}, legacy mode {})",
        config.network.network.name,
        config.network.nodes.len(),
        config.network.segments.len(),
        settings.traffic,
        if settings.legacy_mode { "on" } else { "off" }
    );

    if args.save_settings {
        settings.save(&args.settings)?;
        info!("Saved settings to {}", args.settings);
    }

    let connector = LaneConnector::new(settings);
    let mut network = RoadNetwork::from_config(&config.network);

    let written = match args.segment {
        Some(segment_id) => network.update_segment(segment_id, &connector)?,
        None => network.update_all(&connector)?,
    };
    info!("{} lane records written", written);

    for segment in &config.network.segments {
        if args.segment.is_some_and(|id| id != segment.id) {
            continue;
        }
        for lane in segment.lanes.iter().filter(|lane| lane.kind.is_vehicle_lane()) {
            let Some(record) = network.lane_store().get(LaneId(lane.id)) else {
                continue;
            };
            let targets = match record.targets() {
                Some((first, last)) => format!("{}..={}", first, last),
                None => "-".to_string(),
            };
            println!(
                "segment {:>4} lane {:>5} {:<8} {:<9} arrows {:<20} targets {}",
                segment.id,
                lane.id,
                format!("{:?}", lane.direction),
                format!("{:?}", lane.kind),
                record.direction().to_string(),
                targets
            );
        }
    }

    Ok(())
}
