// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use juliaset::config::{parse_constant, parse_positive, parse_range};
use juliaset::{encode, GridComputer, JuliaConfig, Result};
use log::info;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const CONSTANT: &str = "constant";
const RANGE: &str = "range";

fn validate_positive(name: &'static str, s: &str) -> std::result::Result<(), String> {
    parse_positive(name, s).map(|_| ()).map_err(|e| e.to_string())
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("julia")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Multithreaded Julia set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("julia.png")
                .help("Output file; .pnm or .pgm for a graymap, PNG otherwise"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1000")
                .validator(|s| validate_positive("size", &s))
                .help("Width and height of the output image, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1000")
                .validator(|s| validate_positive("iterations", &s))
                .help("Number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_positive("threads", &s))
                .help("Number of threads to split the rows across [default: number of cores]"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.778,-0.116")
                .validator(|s| parse_constant(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("The constant c in z = z^2 + c, as RE,IM"),
        )
        .arg(
            Arg::with_name(RANGE)
                .long(RANGE)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,80")
                .validator(|s| parse_range(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Scores mapped to black and white, as LOW,HIGH"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = JuliaConfig {
        constant: parse_constant(matches.value_of(CONSTANT).unwrap_or_default())?,
        size: parse_positive("size", matches.value_of(SIZE).unwrap_or_default())?,
        iterations: parse_positive(
            "iterations",
            matches.value_of(ITERATIONS).unwrap_or_default(),
        )?,
        threads: match matches.value_of(THREADS) {
            Some(threads) => parse_positive("threads", threads)?,
            None => num_cpus::get(),
        },
    };
    let range = parse_range(matches.value_of(RANGE).unwrap_or_default())?;
    let output = matches.value_of(OUTPUT).unwrap_or("julia.png");

    let computer = GridComputer::new(&config)?;
    let (grid, elapsed) = computer.compute()?;
    println!("Thread: {}, Elapsed time: {:.6}", computer.threads(), elapsed);

    encode::write_image(output, &grid, &range)?;
    info!("image written to {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
