// File: src/bin/gridcal.rs
use anyhow::{Context, Result};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs::File;
use std::io::BufWriter;

use gridcal::cli;
use gridcal::config::Layout;
use gridcal::export;
use gridcal::input::{FragmentSource, JsonFile};
use gridcal::model::{EventParser, Segmenter};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        cli::print_help(&args[0]);
        return Ok(());
    }

    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let opts = cli::parse_args(&args)?;

    let layout = match &opts.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };

    // decode
    let fragments = JsonFile::new(&opts.input).read_fragments()?;
    info!("{} fragments read from {}", fragments.len(), opts.input.display());

    let segmenter = Segmenter::new(layout.clone());
    let (meta, units) = segmenter.decode(&fragments)?;
    info!("decoded group: {}", meta.group);
    info!("decoded cells: {}", units.len());

    // parse
    let parser = EventParser::new(layout);
    let events = parser.parse_all(&units, opts.year)?;
    info!("parsed events: {}", events.len());

    // encode
    let writer = BufWriter::new(
        File::create(&opts.output)
            .with_context(|| format!("Failed to create {}", opts.output.display()))?,
    );
    export::encode(opts.format, writer, &events, &meta.group, opts.subgroup)?;
    info!("schedule written to {}", opts.output.display());

    Ok(())
}
