//! miniC front end CLI
//!
//! Usage: minic <FILE> [--verbose] [--stage lex|parse|check] [--color auto|always|never]

use clap::Parser;
use minic::{ColorChoice, Driver, DriverConfig, Stage};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version)]
#[command(about = "Tokenize, parse and type check a miniC program", long_about = None)]
struct Args {
    /// miniC source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Show a token preview and the AST outline, and log stage details
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Stop after this stage
    #[arg(long, value_enum, default_value_t = Stage::Check)]
    stage: Stage,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Number of tokens listed in verbose mode
    #[arg(long, value_name = "N", default_value_t = 10)]
    preview: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let config = DriverConfig {
        verbose: args.verbose,
        stage: args.stage,
        color: args.color,
        preview: args.preview,
    };

    let mut driver = Driver::new(config, io::stdout().lock());
    match driver.compile_file(&args.input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(%error, "compilation failed");
            ExitCode::FAILURE
        }
    }
}
