mod completer;
mod config;
mod repl;
mod report;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use raphson::{CanonicalExpression, SolveParams};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Find roots of f(x) with Newton-Raphson. Without a subcommand starts an
/// interactive session.
#[derive(Parser, Debug)]
#[command(name = "raphson", version)]
struct Cli {
    /// Settings file, missing means defaults
    #[arg(long, global = true, default_value = "raphson.toml")]
    config: PathBuf,

    /// More logging on stderr, repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look for a root of an expression
    Solve(SolveArgs),
    /// Check that an expression can be solved and show its canonical form
    Validate {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Evaluate an expression at one point
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },
    /// Tabulate an expression over an interval, the data behind a plot
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct SolveArgs {
    #[arg(allow_hyphen_values = true)]
    expression: String,

    /// Starting point, overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    x0: Option<f64>,

    /// Relative error to stop at, overrides the config file
    #[arg(long)]
    tolerance: Option<f64>,

    /// Maximum number of iterations, overrides the config file
    #[arg(long)]
    max_iter: Option<usize>,

    /// Print the iteration table
    #[arg(long)]
    table: bool,

    /// Print the step by step derivation
    #[arg(long)]
    steps: bool,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[arg(allow_hyphen_values = true)]
    expression: String,

    #[arg(long, allow_negative_numbers = true)]
    from: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    to: Option<f64>,

    /// Number of intervals, one less than the number of points
    #[arg(long)]
    divisions: Option<usize>,

    /// Only print where f changes sign
    #[arg(long)]
    crossings: bool,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn solve(config: &Config, args: SolveArgs) -> Result<()> {
    let params = SolveParams::new(
        args.x0.unwrap_or(config.x0),
        args.tolerance.unwrap_or(config.tolerance),
        args.max_iter.unwrap_or(config.max_iter),
    )?;
    let result = raphson::solve_with(&args.expression, params)?;
    if args.steps {
        print!("{}", report::steps(&args.expression, &params, &result));
    }
    if args.table {
        println!("{}", report::table(&result.trace));
    }
    println!("{}", report::summary(&params, &result.outcome));
    Ok(())
}

fn sample(config: &Config, args: SampleArgs) -> Result<()> {
    let f = CanonicalExpression::new(&args.expression);
    let interval = (
        args.from.unwrap_or(config.sample_from),
        args.to.unwrap_or(config.sample_to),
    );
    let samples = raphson::sample(
        &f,
        interval,
        args.divisions.unwrap_or(config.sample_divisions),
    )?;
    if args.crossings {
        for x in raphson::zero_crossings(&samples) {
            println!("{:.6}", x);
        }
    } else {
        print!("{}", report::samples(&samples));
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    match cli.command {
        None => repl::run(config, cli.config),
        Some(Command::Solve(args)) => solve(&config, args),
        Some(Command::Validate { expression }) => {
            raphson::validate(&expression)?;
            println!("valid: {}", CanonicalExpression::new(&expression));
            Ok(())
        }
        Some(Command::Eval { expression, x }) => {
            let y = raphson::evaluate_for_plot(&expression, x)?;
            println!("f({}) = {}", x, y);
            Ok(())
        }
        Some(Command::Sample(args)) => sample(&config, args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
