use raphson::CONTEXT;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::repl::COMMANDS;

/// Tab completion of REPL commands and of the names an expression can use.
pub struct RaphsonHelper {
    words: Vec<String>,
}

impl RaphsonHelper {
    pub fn new() -> Self {
        let commands = COMMANDS.iter().map(|(cmd, _)| cmd.to_string());
        let names = CONTEXT.names().into_iter().map(String::from);
        Self {
            words: commands.chain(names).collect(),
        }
    }
}

impl Completer for RaphsonHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        let matches = self
            .words
            .iter()
            .filter(|w| !word.is_empty() && w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w.clone(),
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for RaphsonHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for RaphsonHelper {}

impl Validator for RaphsonHelper {}

impl Helper for RaphsonHelper {}

// the word under the cursor and where it starts
fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let line = &line[..pos];
    let start = line
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == ':' || *c == '_')
        .last()
        .map_or(pos, |(i, _)| i);
    (start, &line[start..])
}

///////////////////////////////////////////////////////////////////////////////
