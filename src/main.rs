use std::fs;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::{info, warn};

use satgeo::config::{Config, RecordConfig, TrajectoryConfig};
use satgeo::elements::{period_minutes_from_mean_motion, KeplerianElements};
use satgeo::trajectory::{self, ColorCycle, Rgba};
use satgeo::{encode, segment, Cartesian, Geodetic, OrbitPropagator, Satellite};

#[derive(Parser)]
#[command(name = "satgeo", version, about = "Ground-station geometry and two-line records")]
struct Cli {
    /// TOML configuration (observer, ellipsoid, defaults)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look angles from the configured observer to every satellite in a TLE file
    Look {
        tle_file: String,
        /// Instant to evaluate (RFC 3339), defaults to now
        #[arg(short, long)]
        time: Option<DateTime<Utc>>,
        /// Only satellites whose name contains this text
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Encode Keplerian elements as a two-line record
    Encode {
        #[arg(long)]
        catalog_id: String,
        #[arg(long)]
        epoch: DateTime<Utc>,
        /// Semi-major axis (km)
        #[arg(long)]
        semi_major_axis: f64,
        #[arg(long)]
        eccentricity: f64,
        #[arg(long)]
        inclination: f64,
        #[arg(long)]
        raan: f64,
        #[arg(long)]
        arg_perigee: f64,
        #[arg(long)]
        true_anomaly: f64,
        #[arg(long, default_value_t = 0)]
        revolution: u32,
        #[arg(long)]
        designator: Option<String>,
    },
    /// Split an interval into per-revolution windows
    Segment {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        /// Orbital period in minutes
        #[arg(short, long, conflicts_with = "tle_file")]
        period: Option<f64>,
        /// Take the period from the first satellite in a TLE file and sample its track
        #[arg(long)]
        tle_file: Option<String>,
    },
    /// Convert between geodetic and Earth-fixed Cartesian coordinates
    Convert {
        #[command(subcommand)]
        to: ConvertTo,
    },
}

#[derive(Subcommand)]
enum ConvertTo {
    /// Latitude, longitude (degrees) and altitude (m) to ECEF meters
    Cartesian {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[arg(allow_negative_numbers = true)]
        altitude: f64,
    },
    /// ECEF meters to latitude, longitude and altitude
    Geodetic {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },
}

const TRACK_PALETTE: [Rgba; 4] = [
    Rgba([255, 99, 71, 255]),
    Rgba([65, 105, 225, 255]),
    Rgba([50, 205, 50, 255]),
    Rgba([255, 215, 0, 255]),
];

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Some(
            Config::load(path).with_context(|| format!("failed to load config {}", path))?,
        ),
        None => None,
    };

    match cli.command {
        Command::Look {
            tle_file,
            time,
            name,
        } => look(config.as_ref(), &tle_file, time.unwrap_or_else(Utc::now), name),
        Command::Encode {
            catalog_id,
            epoch,
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            arg_perigee,
            true_anomaly,
            revolution,
            designator,
        } => {
            let kepler = KeplerianElements {
                semi_major_axis,
                eccentricity,
                inclination,
                arg_perigee,
                raan,
                true_anomaly,
            };
            let defaults = config.map(|c| c.record).unwrap_or_default();
            encode_record(&kepler, &catalog_id, epoch, revolution, designator, &defaults)
        }
        Command::Segment {
            start,
            end,
            period,
            tle_file,
        } => {
            let trajectory = config.map(|c| c.trajectory).unwrap_or_default();
            segment_interval(start, end, period, tle_file.as_deref(), &trajectory)
        }
        Command::Convert { to } => convert(config.as_ref(), to),
    }
}

fn look(
    config: Option<&Config>,
    tle_file: &str,
    time: DateTime<Utc>,
    name: Option<String>,
) -> Result<()> {
    let config = config.ok_or_else(|| anyhow!("look needs --config with an [observer] table"))?;
    let observer = config.observer()?;
    let satellites = load_satellites(tle_file, name.as_deref())?;

    println!(
        "Observer {} ({:.4}, {:.4}, {:.0} m) at {}",
        observer.name,
        observer.latitude(),
        observer.longitude(),
        observer.altitude(),
        time.to_rfc3339()
    );
    for satellite in &satellites {
        if satellite.is_stale(time, config.trajectory.stale_after_days) {
            warn!(
                "{}: elements are {:.1} days old, predictions may be inaccurate",
                satellite.name,
                satellite.age_days(time).abs()
            );
        }
        match satellite.observe(time, &observer) {
            Ok(view) => println!(
                "  {:<24} az {:>7.2}  el {:>6.2}  range {:>9.1} km  sub-point ({:.3}, {:.3}){}",
                view.name,
                view.angles.azimuth,
                view.angles.elevation,
                view.angles.range / 1000.0,
                view.ground_point.latitude,
                view.ground_point.longitude,
                if view.is_visible { "  visible" } else { "" }
            ),
            Err(e) => warn!("{}: {}", satellite.name, e),
        }
    }
    Ok(())
}

fn encode_record(
    kepler: &KeplerianElements,
    catalog_id: &str,
    epoch: DateTime<Utc>,
    revolution: u32,
    designator: Option<String>,
    defaults: &RecordConfig,
) -> Result<()> {
    let mut set = kepler.to_element_set(catalog_id, epoch, revolution)?;
    set.classification = defaults.classification;
    set.element_set_number = defaults.element_set_number;
    set.international_designator = designator;

    let record = encode(&set)?;
    info!(
        "mean motion {:.8} rev/day, period {:.3} min",
        set.mean_motion,
        period_minutes_from_mean_motion(set.mean_motion)?
    );
    println!("{}", record);
    Ok(())
}

fn segment_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    period: Option<f64>,
    tle_file: Option<&str>,
    trajectory: &TrajectoryConfig,
) -> Result<()> {
    let satellite = match tle_file {
        Some(path) => Some(
            load_satellites(path, None)?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no satellites in {}", path))?,
        ),
        None => None,
    };
    let period = match (&satellite, period) {
        (Some(sat), _) => sat.period_minutes(),
        (None, Some(p)) => p,
        (None, None) => return Err(anyhow!("either --period or --tle-file is required")),
    };

    let mut colors = ColorCycle::new(TRACK_PALETTE.to_vec())?;
    for (i, revolution) in segment(start, end, period)?.iter().enumerate() {
        println!(
            "{:>3}  {}  offset {:>10.1} s  lead {:?}  trail {:?}",
            i,
            revolution.window,
            revolution.epoch_offset_seconds,
            revolution.lead.to_samples(),
            revolution.trail.to_samples()
        );

        let Some(sat) = &satellite else { continue };
        if revolution.window.is_empty() {
            continue;
        }
        let color = colors.next().unwrap_or(TRACK_PALETTE[0]);
        let samples =
            trajectory::sample_positions(sat, &revolution.window, trajectory.step_seconds)?;
        println!(
            "     {} samples, colour {:?}, first {:?}",
            samples.len(),
            color.0,
            samples.first().map(|s| s.position)
        );
    }
    Ok(())
}

fn convert(config: Option<&Config>, to: ConvertTo) -> Result<()> {
    let ellipsoid = match config {
        Some(c) => c.ellipsoid()?,
        None => satgeo::WGS84,
    };

    match to {
        ConvertTo::Cartesian {
            latitude,
            longitude,
            altitude,
        } => {
            let ecef = Geodetic::checked(latitude, longitude, altitude)?.to_cartesian(&ellipsoid);
            println!("{:.4} {:.4} {:.4}", ecef.x, ecef.y, ecef.z);
        }
        ConvertTo::Geodetic { x, y, z } => {
            let geo = Cartesian::new(x, y, z).to_geodetic(&ellipsoid)?;
            println!(
                "{:.10} {:.10} {:.4}",
                geo.latitude, geo.longitude, geo.altitude
            );
        }
    }
    Ok(())
}

/// Reads a three-line (name, line 1, line 2) element file.
fn load_satellites(path: &str, filter: Option<&str>) -> Result<Vec<Satellite>> {
    let data = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let lines: Vec<&str> = data.lines().collect();
    let mut satellites = Vec::new();

    let mut i = 0;
    while i + 2 < lines.len() {
        if !lines[i].is_empty() && lines[i + 1].starts_with('1') && lines[i + 2].starts_with('2')
        {
            let name = lines[i].trim();
            if filter.map_or(true, |f| name.contains(f)) {
                match Satellite::from_tle(name, lines[i + 1], lines[i + 2]) {
                    Ok(sat) => satellites.push(sat),
                    Err(e) => warn!("failed to parse elements for {}: {}", name, e),
                }
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    if satellites.is_empty() {
        return Err(anyhow!("no valid satellites found in {}", path));
    }
    Ok(satellites)
}
