use std::fs::File;
use std::process::ExitCode;

use gridref::{
    batch, format, from_mgrs, to_mgrs, to_utm, CoordinateFormat, Error, GeographicCoordinate,
    Result, DEFAULT_PRECISION,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "gridref - WGS84 / UTM / MGRS converter

Usage:
  gridref to-mgrs <lat> <lon> [precision]
  gridref from-mgrs <reference...>
  gridref to-utm <lat> <lon>
  gridref format <lat> <lon> <mgrs|utm|dd|dms>
  gridref batch <csv-path> [precision]";

fn parse_number<T: std::str::FromStr>(value: Option<&String>, what: &str) -> Result<T> {
    let value = value.ok_or_else(|| Error::Config(format!("missing {}", what)))?;
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid {}: {}", what, value)))
}

fn parse_coordinate(args: &[String]) -> Result<GeographicCoordinate> {
    let latitude = parse_number(args.first(), "latitude")?;
    let longitude = parse_number(args.get(1), "longitude")?;
    GeographicCoordinate::try_new(latitude, longitude)
}

fn parse_precision(value: Option<&String>) -> Result<u8> {
    match value {
        Some(_) => parse_number(value, "precision"),
        None => Ok(DEFAULT_PRECISION),
    }
}

/// Runs one command and returns what it prints on success
fn run(args: &[String]) -> Result<String> {
    let (command, rest) = args
        .split_first()
        .ok_or_else(|| Error::Config("missing command".to_string()))?;

    match command.as_str() {
        "to-mgrs" => {
            let coord = parse_coordinate(rest)?;
            to_mgrs(coord, parse_precision(rest.get(2))?)
        }
        "from-mgrs" => {
            let coord = from_mgrs(&rest.join(" "))?;
            Ok(format!("{:.6} {:.6}", coord.latitude, coord.longitude))
        }
        "to-utm" => {
            let utm = to_utm(parse_coordinate(rest)?)?;
            Ok(format!(
                "{} {} {:.2} {:.2}",
                utm.zone,
                utm.hemisphere.letter(),
                utm.easting,
                utm.northing
            ))
        }
        "format" => {
            let coord = parse_coordinate(rest)?;
            let target: CoordinateFormat = rest
                .get(2)
                .ok_or_else(|| Error::Config("missing format".to_string()))?
                .parse()?;
            format(coord, target)
        }
        "batch" => {
            let path = rest
                .first()
                .ok_or_else(|| Error::Config("missing CSV path".to_string()))?;
            let report = batch::convert_csv(File::open(path)?, parse_precision(rest.get(1))?)?;
            let csv = report.to_csv()?;
            Ok(csv.trim_end().to_string())
        }
        other => Err(Error::Config(format!("unknown command: {}", other))),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, Error::Config(_)) {
                eprintln!("\n{}", USAGE);
            }
            ExitCode::FAILURE
        }
    }
}
