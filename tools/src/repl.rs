use anyhow::{anyhow, bail, Context, Result};
use raphson::SolveParams;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::completer::RaphsonHelper;
use crate::config::Config;
use crate::report;

pub const COMMANDS: &[(&str, &str)] = &[
    (":x0", "set the starting point, `:x0 1.5`"),
    (":tol", "set the tolerance, `:tol 1e-6`"),
    (":iter", "set the maximum number of iterations, `:iter 100`"),
    (":eval", "evaluate an expression at a point, `:eval sin(x) @ 2`"),
    (":table", "toggle the iteration table"),
    (":steps", "toggle the step by step derivation"),
    (":params", "show the current settings"),
    (":save", "write the current settings to the config file"),
    (":help", "show this help"),
    (":quit", "leave"),
];

fn number(arg: &str) -> Result<f64> {
    arg.parse::<f64>()
        .with_context(|| format!("'{}' is not a number", arg))
}

/// Settings of an interactive session. Any line that isn't a command is a
/// function to find a root of.
pub struct Session {
    config: Config,
    config_path: PathBuf,
    table: bool,
    steps: bool,
}

impl Session {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Session {
            config,
            config_path,
            table: true,
            steps: false,
        }
    }

    // only keep settings the solver would accept
    fn update(&mut self, x0: f64, tolerance: f64, max_iter: usize) -> Result<String> {
        let params = SolveParams::new(x0, tolerance, max_iter)?;
        self.config.x0 = params.x0();
        self.config.tolerance = params.tolerance();
        self.config.max_iter = params.max_iter();
        Ok(format!(
            "x0 = {}, tolerance = {}, max iterations = {}",
            x0, tolerance, max_iter
        ))
    }

    pub fn execute(&mut self, line: &str) -> Result<String> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        let Config {
            x0,
            tolerance,
            max_iter,
            ..
        } = self.config;
        match command {
            ":x0" => self.update(number(arg)?, tolerance, max_iter),
            ":tol" => self.update(x0, number(arg)?, max_iter),
            ":iter" => {
                let max_iter = arg
                    .parse::<usize>()
                    .with_context(|| format!("'{}' is not a number of iterations", arg))?;
                self.update(x0, tolerance, max_iter)
            }
            ":eval" => {
                let (expression, at) = arg
                    .rsplit_once('@')
                    .ok_or_else(|| anyhow!("usage: :eval <expression> @ <x>"))?;
                let x = number(at.trim())?;
                let y = raphson::evaluate_for_plot(expression.trim(), x)?;
                Ok(format!("f({}) = {}", x, y))
            }
            ":table" => {
                self.table = !self.table;
                Ok(format!("table {}", if self.table { "on" } else { "off" }))
            }
            ":steps" => {
                self.steps = !self.steps;
                Ok(format!("steps {}", if self.steps { "on" } else { "off" }))
            }
            ":params" => self.config.to_toml(),
            ":save" => {
                self.config.save(&self.config_path)?;
                Ok(format!("saved {}", self.config_path.display()))
            }
            ":help" => Ok(help()),
            _ if command.starts_with(':') => bail!("unknown command {}, try :help", command),
            _ => self.solve(line),
        }
    }

    fn solve(&self, expression: &str) -> Result<String> {
        let params = self.config.params()?;
        let result = raphson::solve_with(expression, params)?;
        let mut out = String::new();
        if self.steps {
            out.push_str(&report::steps(expression, &params, &result));
        }
        if self.table {
            out.push_str(&report::table(&result.trace));
            out.push('\n');
        }
        out.push_str(&report::summary(&params, &result.outcome));
        Ok(out)
    }
}

fn help() -> String {
    let mut lines = vec!["type f(x) to look for a root, or one of:".to_string()];
    lines.extend(
        COMMANDS
            .iter()
            .map(|(command, about)| format!("  {:<8} {}", command, about)),
    );
    lines.join("\n")
}

pub fn run(config: Config, config_path: PathBuf) -> Result<()> {
    let mut rl = Editor::<RaphsonHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(RaphsonHelper::new()));
    let history = config.history_path();
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            debug!(path = %path.display(), "no history yet");
        }
    }

    let mut session = Session::new(config, config_path);
    println!("newton-raphson, :help for commands");
    loop {
        match rl.readline("f(x) = ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("reading input"),
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if line == ":quit" {
                    break;
                }
                match session.execute(line) {
                    Ok(reply) => println!("{}", reply),
                    Err(e) => println!("error: {:#}", e),
                }
            }
        }
    }

    if let Some(path) = history {
        if let Err(e) = rl.save_history(&path) {
            warn!(path = %path.display(), error = %e, "couldn't save history");
        }
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////////////
