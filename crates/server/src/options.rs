use std::time::Duration;

use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use life_common::SimulationConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Empty,
    Random,
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config: SimulationConfig,
    pub seed: Seed,
    /// Stop after this many generations; run until interrupted otherwise.
    pub generations: Option<u64>,
    pub latency: Duration,
    pub print: bool,
}

pub fn app() -> App<'static, 'static> {
    App::new("life_server")
        .about("runs Conway's Game of Life on a toroidal grid")
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("read size, cellSize and speed from a JSON file"),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .takes_value(true)
                .help("number of cells along each side of the grid"),
        )
        .arg(
            Arg::with_name("cell-size")
                .long("cell-size")
                .takes_value(true)
                .help("pixels per cell on the frame buffer"),
        )
        .arg(
            Arg::with_name("speed")
                .long("speed")
                .takes_value(true)
                .help("milliseconds between generations"),
        )
        .arg(
            Arg::with_name("generations")
                .long("generations")
                .takes_value(true)
                .help("stop after this many generations"),
        )
        .arg(
            Arg::with_name("random")
                .long("random")
                .help("start from a random grid"),
        )
        .arg(
            Arg::with_name("pattern")
                .long("pattern")
                .takes_value(true)
                .conflicts_with("random")
                .help("start from a named pattern (glider, blinker, block, toad, beacon, r-pentomino)"),
        )
        .arg(
            Arg::with_name("latency")
                .long("latency")
                .takes_value(true)
                .help("extra milliseconds the step engine spends on every generation"),
        )
        .arg(
            Arg::with_name("print")
                .long("print")
                .help("print the grid after every generation"),
        )
}

pub fn settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let mut config = match matches.value_of("config") {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path))?;
            serde_json::from_str::<SimulationConfig>(&contents)
                .with_context(|| format!("could not parse config file {}", path))?
        }
        None => SimulationConfig::default(),
    };
    if let Some(size) = parse(matches, "size")? {
        config.size = size;
    }
    if let Some(cell_size) = parse(matches, "cell-size")? {
        config.cell_size = cell_size;
    }
    if let Some(speed_ms) = parse(matches, "speed")? {
        config.speed_ms = speed_ms;
    }
    config.validate()?;

    let seed = if matches.is_present("random") {
        Seed::Random
    } else if let Some(pattern) = matches.value_of("pattern") {
        Seed::Pattern(pattern.to_string())
    } else {
        Seed::Empty
    };

    Ok(Settings {
        config,
        seed,
        generations: parse(matches, "generations")?,
        latency: Duration::from_millis(parse(matches, "latency")?.unwrap_or(0)),
        print: matches.is_present("print"),
    })
}

fn parse<T>(matches: &ArgMatches, name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(str::parse::<T>)
        .transpose()
        .with_context(|| format!("invalid value for --{}", name))
}
