use anyhow::{Context, Result};
use clap::Parser;
use hotel_booking_sim::{
    load_booking_requests, load_rooms, render, DailySimulation, ReportFormat, RoomCatalog,
    SeededAcceptance, SimulationConfig, TracingSink,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "hotel-sim")]
#[command(about = "Thirty-day hotel booking simulation", long_about = None)]
struct CliArgs {
    /// Room inventory file
    #[arg(long, default_value = "fund.txt")]
    rooms: PathBuf,

    /// Booking request file
    #[arg(long, default_value = "booking.txt")]
    requests: PathBuf,

    /// Optional JSON simulation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format: text, json or xml
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Seed for the acceptance draws, overrides the config
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rooms = load_rooms(&args.rooms)
        .with_context(|| format!("Failed to read rooms from {}", args.rooms.display()))?;
    let requests = load_booking_requests(&args.requests)
        .with_context(|| format!("Failed to read requests from {}", args.requests.display()))?;
    if !rooms.rejected.is_empty() || !requests.rejected.is_empty() {
        warn!(
            rooms = rooms.rejected.len(),
            requests = requests.rejected.len(),
            "Some input records were rejected"
        );
    }
    info!(
        rooms = rooms.records.len(),
        requests = requests.records.len(),
        start = %config.start_date,
        days = config.cycle_days,
        "Starting booking simulation"
    );

    let mut catalog = RoomCatalog::new(rooms.records)?;
    let acceptance = SeededAcceptance::new(config.seed);
    let mut simulation = DailySimulation::new(config, acceptance, TracingSink)?;
    let run = simulation.run(&mut catalog, &requests.records)?;

    println!("{}", render(&run, args.format)?);
    Ok(())
}
