// src/main.rs
//! GPS Tracker - reads NMEA from a serial receiver, capture file or stdin

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gps_tracker::{
    config::TrackerConfig, error::GpsError, format_fixed, ingest, GpsTracker, LocationFix, Result,
};
use tokio_serial::SerialPortBuilderExt;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gps-tracker", version, about = "Track location from an NMEA-0183 GPS stream")]
struct Cli {
    /// Serial port of the GPS receiver (overrides the config file)
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate (overrides the config file)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Replay a captured NMEA file instead of a serial port
    #[arg(short, long, conflicts_with_all = ["port", "stdin"])]
    file: Option<PathBuf>,

    /// Read NMEA from standard input
    #[arg(long)]
    stdin: bool,

    /// Configuration file (defaults to ~/.config/gps-tracker/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Digits after the decimal point for logged coordinates
    #[arg(long)]
    precision: Option<usize>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

enum Source {
    Serial { port: String, baudrate: u32 },
    File(PathBuf),
    Stdin,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.list_ports {
        return list_serial_ports();
    }

    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load_from_file(path)?,
        None => TrackerConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            TrackerConfig::default()
        }),
    };
    if let Some(precision) = cli.precision {
        config.coordinate_precision = precision;
    }

    let source = select_source(&cli, &config)?;

    let mut tracker = GpsTracker::with_config(&config);
    let precision = config.coordinate_precision;
    tracker.add_update_listener(move |fix| {
        info!(
            lat = %LocationFix::format_coordinate(fix.latitude(), precision),
            lon = %LocationFix::format_coordinate(fix.longitude(), precision),
            alt = %format_fixed(fix.altitude(), 1),
            speed_mps = %format_fixed(fix.speed_over_ground(), 2),
            course = %format_fixed(fix.course_over_ground(), 1),
            sats = fix.satellites(),
            fix = fix.fix_type().description(),
            "position update"
        );
        Ok(())
    });
    tracker.add_raw_listener(|line| {
        trace!(line, "sentence");
        Ok(())
    });

    tokio::select! {
        result = ingest_from(source, &mut tracker) => {
            let applied = result?;
            info!(applied, "ingestion finished");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, shutting down");
        }
    }

    let fix = tracker.reader().snapshot();
    info!(
        valid_messages = fix.valid_message_count(),
        has_fix = fix.has_fix(),
        "final state"
    );

    Ok(())
}

fn select_source(cli: &Cli, config: &TrackerConfig) -> Result<Source> {
    if let Some(path) = &cli.file {
        return Ok(Source::File(path.clone()));
    }
    if cli.stdin {
        return Ok(Source::Stdin);
    }

    let port = cli
        .port
        .clone()
        .or_else(|| config.serial_port.clone())
        .ok_or_else(|| GpsError::Config("no serial port given (use --port, --file or --stdin)".to_string()))?;
    let baudrate = cli.baud.unwrap_or(config.serial_baudrate);

    Ok(Source::Serial { port, baudrate })
}

async fn ingest_from(source: Source, tracker: &mut GpsTracker) -> Result<u64> {
    match source {
        Source::Serial { port, baudrate } => {
            info!(%port, baudrate, "connecting to GPS receiver");
            let serial = tokio_serial::new(&port, baudrate)
                .timeout(Duration::from_millis(1000))
                .open_native_async()
                .map_err(|e| GpsError::Connection(format!("Failed to open serial port {}: {}", port, e)))?;
            info!("connected");
            ingest::run(serial, tracker).await
        }
        Source::File(path) => {
            info!(path = %path.display(), "replaying capture");
            let file = tokio::fs::File::open(&path).await?;
            ingest::run(file, tracker).await
        }
        Source::Stdin => {
            info!("reading NMEA from stdin");
            ingest::run(tokio::io::stdin(), tracker).await
        }
    }
}

/// List available serial ports
fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}
