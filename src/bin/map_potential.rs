use clap::Parser;
use plotdarn::convert::time::{parse_time, ut_seconds};
use plotdarn::convert::{DipoleOracle, MltStrategy, DEFAULT_MIN_LAT};
use plotdarn::potential::{ModelConfig, PotentialModel};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File of whitespace-separated map-potential coefficients
    #[arg()]
    coefficients: PathBuf,

    /// Time of the map, as "YYYY-MM-DD HH:MM"
    #[arg(short, long)]
    time: String,

    /// Heppner-Maynard boundary latitude
    #[arg(long, default_value_t = DEFAULT_MIN_LAT)]
    hmb_lat: f64,

    /// Order of the spherical harmonic fit
    #[arg(long, default_value_t = 6)]
    order: usize,

    /// Magnetic latitudes of fitted vectors, as a comma-separated list
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "mlon")]
    mlat: Option<Vec<f64>>,

    /// Magnetic longitudes of fitted vectors, as a comma-separated list
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "mlat")]
    mlon: Option<Vec<f64>>,

    /// Derive magnetic local time from a centred dipole instead of the closed-form approximation
    #[arg(long)]
    dipole: bool,
}

fn bin_main() -> BinResult<()> {
    let args = Args::parse();

    let coefficients = fs::read_to_string(&args.coefficients)?
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()?;
    let time = parse_time(&args.time)?;
    let model = PotentialModel::new(ModelConfig::default().with_order(args.order));
    info!(count = coefficients.len(), %time, "read coefficients");

    match (args.mlat, args.mlon) {
        (Some(mlat), Some(mlon)) => {
            let oracle = DipoleOracle::default();
            let strategy = if args.dipole {
                MltStrategy::Oracle(&oracle)
            } else {
                MltStrategy::Approximate
            };
            let vectors =
                model.fitted_vectors(&coefficients, &mlat, &mlon, time, args.hmb_lat, strategy)?;
            for (azimuth, magnitude) in vectors.azimuths.iter().zip(&vectors.magnitudes) {
                println!("{azimuth:.4} {magnitude:.4}");
            }
        }
        _ => {
            model.check_coefficients(&coefficients)?;
            let rotated = model.rotate_to_mlt(&coefficients, ut_seconds(&time));
            let grid = model.potential_grid(&rotated, args.hmb_lat)?;
            for row in grid.rows() {
                let line: Vec<String> = row.iter().map(|v| format!("{v:.1}")).collect();
                println!("{}", line.join(" "));
            }
        }
    }
    Ok(())
}
