use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use clap::Parser;
use thiserror::Error;

use line_stations::{Line, LineError, Segment, SegmentRecord, StationId};

#[derive(Parser, Debug)]
#[command(about = "Builds a line from a segments file and prints its stations in order")]
struct Args {
    /// CSV file with columns predecessor,station,distance,duration
    #[arg(long)]
    segments: PathBuf,

    /// station to remove after loading; may be repeated
    #[arg(long)]
    remove: Vec<String>,

    #[arg(long, default_value = "line")]
    line_name: String,

    #[arg(long, default_value = "bg-red-600")]
    color: String,

    #[arg(long, default_value = "05:30", value_parser = parse_time)]
    first_departure: NaiveTime,

    #[arg(long, default_value = "23:30", value_parser = parse_time)]
    last_departure: NaiveTime,

    #[arg(long, default_value_t = 5)]
    interval_minutes: u32,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("failed reading segments: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Line(#[from] LineError),
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
}

fn read_segments(path: &Path) -> Result<Vec<Segment>, AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut segments = Vec::new();
    for record in reader.deserialize::<SegmentRecord>() {
        segments.push(Segment::try_from(record?)?);
    }
    Ok(segments)
}

fn run(args: Args) -> Result<Line, AppError> {
    let mut line = Line::new(
        &args.line_name,
        &args.color,
        args.first_departure,
        args.last_departure,
        args.interval_minutes,
    );

    log::info!("reading segments from {:?}", args.segments);
    let segments = read_segments(&args.segments)?;
    log::info!("adding {} segments to line {}", segments.len(), line.name);
    for segment in segments {
        line.add_segment(segment)?;
    }

    for station in args.remove {
        line.remove_station(&StationId::from(station))?;
    }

    line.stations().check_consistency()?;
    Ok(line)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(line) => {
            println!(
                "{} ({}, {}-{} every {} min)",
                line.name,
                line.color,
                line.first_departure.format("%H:%M"),
                line.last_departure.format("%H:%M"),
                line.interval_minutes
            );
            for segment in line.stations_in_order() {
                match &segment.predecessor {
                    Some(predecessor) => println!(
                        "  {} -> {}: {} m, {} min",
                        predecessor, segment.station, segment.distance, segment.duration
                    ),
                    None => println!("  {}", segment.station),
                }
            }
            println!(
                "total: {} m, {} min",
                line.stations().total_distance(),
                line.stations().total_duration()
            );
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
