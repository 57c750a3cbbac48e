//! psip CLI

use clap::{Parser, Subcommand};
use psip::config::{Config, Scoping};
use psip::error::report_error;
use psip::interp::Interpreter;
use psip::repl::Repl;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "psip", version, about = "PostScript-like stack interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum block nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Maximum loop iterations per top-level command, nested loops included
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Name resolution mode
    #[arg(long, global = true, value_enum)]
    scoping: Option<Scoping>,

    /// Print the final operand stack as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive interpreter (default)
    Repl,
    /// Evaluate a source file
    Run {
        /// Source file to evaluate
        file: PathBuf,
    },
    /// Evaluate source given on the command line
    Eval {
        /// Source text
        source: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        None | Some(Command::Repl) => run_repl(config),
        Some(Command::Run { file }) => run_file(file, config, cli.json),
        Some(Command::Eval { source }) => eval_source(source, config, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "psip=debug" } else { "warn" })
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Config file first, then command-line overrides
fn build_config(cli: &Cli) -> psip::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(scoping) = cli.scoping {
        config.scoping = scoping;
    }
    Ok(config)
}

fn run_repl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    Repl::new(config)?.run()?;
    Ok(())
}

fn run_file(path: &Path, config: Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();
    let mut interp = Interpreter::with_config(config);
    evaluate(&mut interp, &filename, &source)?;
    if json {
        print_json(&interp)?;
    }
    Ok(())
}

fn eval_source(source: &str, config: Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut interp = Interpreter::with_config(config);
    evaluate(&mut interp, "<eval>", source)?;
    if json {
        print_json(&interp)?;
    } else if !interp.snapshot_operand_stack().is_empty() {
        println!("{}", interp.render_stack());
    }
    Ok(())
}

/// Evaluate and print `=` output. A failure is rendered against the source
/// and ends the process.
fn evaluate(interp: &mut Interpreter, filename: &str, source: &str) -> std::io::Result<()> {
    let result = interp.evaluate_source(source);
    for line in interp.take_output() {
        println!("{line}");
    }
    if let Err(err) = &result {
        report_error(filename, source, err)?;
        std::process::exit(1);
    }
    Ok(())
}

fn print_json(interp: &Interpreter) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string(&interp.snapshot_operand_stack())?);
    Ok(())
}
