//! mudlex CLI entry point.

use std::env;
use std::process::ExitCode;

use mudlex_parser::ParseOutcome;
use mudlex_runtime::{Repl, demo};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    commands: Vec<String>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    return Err("--command requires a value".into());
                }
                config.commands.push(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            command => config.commands.push(command.to_string()),
        }
        i += 1;
    }

    Ok(config)
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `--trace` turns on the
/// mudlex crates' trace output and the default is warnings only.
fn init_tracing(trace: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if trace {
            EnvFilter::new(
                "warn,mudlex=trace,mudlex_lexicon=trace,mudlex_parser=trace,\
                 mudlex_world=trace,mudlex_runtime=trace",
            )
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_span_events(fmt::format::FmtSpan::NONE),
        )
        .with(filter)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("mudlex {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.trace);

    // Batch mode shows how each line parses, without carrying it out.
    if config.batch_mode {
        let session = demo::build()?;
        for command in &config.commands {
            println!("> {command}");
            match session.parse(command) {
                ParseOutcome::Resolved(result) => println!("{result}"),
                ParseOutcome::Ambiguous(results) => {
                    for result in results {
                        println!("? {result}");
                    }
                }
            }
        }
        return Ok(());
    }

    let mut repl = Repl::new()?;
    for command in &config.commands {
        println!("> {command}");
        println!("{}", repl.eval(command)?);
    }
    if !config.commands.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mmudlex\x1b[0m - MUD command parser playground

\x1b[1mUSAGE:\x1b[0m
    mudlex [OPTIONS] [COMMANDS...]

\x1b[1mARGUMENTS:\x1b[0m
    [COMMANDS...]  Lines to parse in the demo world before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Parse the given commands and exit (no REPL)
    -c, --command LINE Parse LINE (may be repeated)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace            Log scope registration and parser decisions to stderr
                       (RUST_LOG overrides this)

\x1b[1mEXAMPLES:\x1b[0m
    mudlex                                   Start the demo REPL
    mudlex -b \"put lamp in chest\"            Show how one line parses
    mudlex --trace -b \"examine key of chest\" Parse with trace logging

\x1b[1mREPL COMMANDS:\x1b[0m
    help [verb]          List verbs, or show help for one
    look, take, drop, put, go, inventory
    builder              Toggle builder privileges
    edit                 Toggle edit mode (builders only)
    quit                 Exit REPL (or Ctrl+D)"
    );
}
