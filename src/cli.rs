// File: ./src/cli.rs
//! Shared command-line interface logic, like argument parsing and help.
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, Local};
use std::path::PathBuf;
use std::str::FromStr;

use crate::export::Format;
use crate::model::Subgroup;

pub struct CliArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
    pub subgroup: Option<Subgroup>,
    pub year: i32,
    pub layout: Option<PathBuf>,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut input = None;
    let mut output = None;
    let mut format = Format::Ical;
    let mut subgroup = None;
    // The page never prints a year, so default to the current one.
    let mut year = Local::now().year();
    let mut layout = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-i" | "--input" => input = Some(PathBuf::from(value_of(args, &mut i, flag)?)),
            "-o" | "--output" => output = Some(PathBuf::from(value_of(args, &mut i, flag)?)),
            "-f" | "--format" => {
                let value = value_of(args, &mut i, flag)?;
                format = Format::from_str(value)
                    .map_err(|_| anyhow!("Unknown format '{}' (expected ical or json)", value))?;
            }
            "-s" | "--subgroup" => {
                let value = value_of(args, &mut i, flag)?;
                subgroup = Some(
                    Subgroup::from_str(value)
                        .map_err(|_| anyhow!("Unknown subgroup '{}' (expected А or Б)", value))?,
                );
            }
            "-y" | "--year" => {
                let value = value_of(args, &mut i, flag)?;
                year = value
                    .parse()
                    .with_context(|| format!("Invalid year '{}'", value))?;
            }
            "--layout" => layout = Some(PathBuf::from(value_of(args, &mut i, flag)?)),
            other => bail!("Unknown argument '{}' (see --help)", other),
        }
        i += 1;
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| anyhow!("Expected an input file (-i, see --help)"))?,
        output: output.ok_or_else(|| anyhow!("Expected an output file (-o, see --help)"))?,
        format,
        subgroup,
        year,
        layout,
    })
}

fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("Flag '{}' expects a value", flag))
}

pub fn print_help(binary_name: &str) {
    println!(
        "Gridcal v{} - Converts fixed-layout timetable pages into calendars",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {} -i <fragments.json> -o <out> [--format ical|json] [--subgroup <code>] [--year <yyyy>]",
        binary_name
    );
    println!();
    println!("OPTIONS:");
    println!("    -i, --input <path>     Positioned-fragment JSON produced by the text extractor.");
    println!("    -o, --output <path>    Output file.");
    println!("    -f, --format <fmt>     Output format: 'ical' (default) or 'json'.");
    println!("    -s, --subgroup <code>  Keep only events for one subgroup (А or Б).");
    println!("    -y, --year <yyyy>      Civil year stamped onto all dates (default: current).");
    println!("    --layout <path>        TOML file overriding the built-in page calibration.");
    println!("    -h, --help             Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} -i page.json -o schedule.ics                 Export the full group",
        binary_name
    );
    println!(
        "    {} -i page.json -o schedule.ics -s А            Export subgroup А only",
        binary_name
    );
    println!(
        "    {} -i page.json -o schedule.json -f json -y 2025",
        binary_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("gridcal")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_required_and_optional_flags() {
        let args = argv(&[
            "-i", "page.json", "-o", "out.ics", "-f", "json", "-s", "А", "-y", "2025",
        ]);
        let cli = parse_args(&args).unwrap();
        assert_eq!(cli.input, PathBuf::from("page.json"));
        assert_eq!(cli.output, PathBuf::from("out.ics"));
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.subgroup, Some(Subgroup::A));
        assert_eq!(cli.year, 2025);
    }

    #[test]
    fn missing_input_is_an_error() {
        let args = argv(&["-o", "out.ics"]);
        assert!(parse_args(&args).is_err());
    }

    #[test]
    fn rejects_unknown_format_and_subgroup() {
        assert!(parse_args(&argv(&["-i", "a", "-o", "b", "-f", "xml"])).is_err());
        assert!(parse_args(&argv(&["-i", "a", "-o", "b", "-s", "В"])).is_err());
    }
}
