use std::{fs, process, time::Instant};

use clap::Parser;
use gust::{compile, interpreter::value::core::Value};

/// gust is an expression-oriented array language built around pipes, portals
/// and broadcasting operators.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells gust to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints how long compiling and running took to stderr.
    #[arg(short, long)]
    telemetry: bool,

    contents: String,

    /// Program input, available through `$`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Reads a command-line argument as a value: numbers and the constants
/// `true`, `false` and `null` are recognized, anything else is a string.
fn parse_arg(arg: &str) -> Value {
    match arg {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "null" => Value::Null,
        _ => arg.parse::<f64>().map_or_else(|_| Value::from(arg), Value::Number),
    }
}

/// Installs a subscriber for the library's events when `RUST_LOG` is set,
/// e.g. `RUST_LOG=gust=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                        .with_level(true)
                                                        .with_writer(std::io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };
    let input: Vec<Value> = args.args.iter().map(|arg| parse_arg(arg)).collect();

    let started = Instant::now();
    let program = compile(&script).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let compiled = started.elapsed();

    let started = Instant::now();
    let result = program.call(&input).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let executed = started.elapsed();

    let line = result.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    println!("{line}");

    if args.telemetry {
        eprintln!("compiled in {compiled:?}, executed in {executed:?}");
    }
}
