#![deny(warnings)]

use crate::scanner::Scanner;
use std::fmt;

/// A lexical unit of free-form user notation. Letter runs are split into
/// the words of a vocabulary so that `2pix` reads as `2`, `pi`, `x`.
#[derive(Clone, PartialEq, Debug)]
pub enum Piece {
    /// Digit run with any decimal points in it, eg: `2`, `3.25`
    Number(String),
    /// A vocabulary word
    Name(String),
    /// Letters that don't form any vocabulary word
    Word(String),
    Space(String),
    Symbol(char),
}

impl Piece {
    pub fn text(&self) -> String {
        match self {
            Piece::Number(s) | Piece::Name(s) | Piece::Word(s) | Piece::Space(s) => s.clone(),
            Piece::Symbol(c) => c.to_string(),
        }
    }

    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, Piece::Name(n) if n == name)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

pub struct NotationTokenizer<'v, I: Iterator<Item = char>> {
    src: Scanner<I>,
    vocabulary: Vec<&'v str>,
}

impl<'v, I: Iterator<Item = char>> NotationTokenizer<'v, I> {
    pub fn new(source: I, vocabulary: &[&'v str]) -> Self {
        let mut vocabulary = vocabulary.to_vec();
        // longest words first so 'exp' wins over 'e' and 'sinh' over 'sin'
        vocabulary.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        NotationTokenizer {
            src: Scanner::new(source),
            vocabulary,
        }
    }

    fn scan_name(&mut self) -> Option<String> {
        let src = &mut self.src;
        if self.vocabulary.iter().any(|w| src.accept_str(w)) {
            Some(self.src.extract_string())
        } else {
            None
        }
    }

    // true if a vocabulary word starts right after the cursor
    fn name_ahead(&mut self) -> bool {
        let backtrack = self.src.pos();
        let vocabulary = &self.vocabulary;
        let src = &mut self.src;
        let found = vocabulary.iter().any(|w| src.accept_str(w));
        self.src.set_pos(backtrack);
        found
    }

    fn scan_word(&mut self) -> Option<String> {
        self.src.accept_if(|c| c.is_ascii_alphabetic())?;
        while matches!(self.src.peek(), Some(c) if c.is_ascii_alphabetic()) && !self.name_ahead() {
            self.src.next();
        }
        Some(self.src.extract_string())
    }

    fn get_piece(&mut self) -> Option<Piece> {
        if self.src.skip_matching(|c| c.is_whitespace()) {
            return Some(Piece::Space(self.src.extract_string()));
        }
        if self.src.accept_if(|c| c.is_ascii_digit()).is_some() {
            self.src.skip_matching(|c| c.is_ascii_digit() || *c == '.');
            return Some(Piece::Number(self.src.extract_string()));
        }
        if let Some(name) = self.scan_name() {
            return Some(Piece::Name(name));
        }
        if let Some(word) = self.scan_word() {
            return Some(Piece::Word(word));
        }
        let symbol = self.src.next()?;
        self.src.ignore();
        Some(Piece::Symbol(symbol))
    }
}

impl<I: Iterator<Item = char>> Iterator for NotationTokenizer<'_, I> {
    type Item = Piece;
    fn next(&mut self) -> Option<Self::Item> {
        self.get_piece()
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{NotationTokenizer, Piece};

    const VOCABULARY: &[&str] = &["x", "e", "pi", "exp", "sin", "sinh", "log10", "log2"];

    fn pieces(input: &str) -> Vec<Piece> {
        NotationTokenizer::new(input.chars(), VOCABULARY).collect()
    }

    fn name(s: &str) -> Piece {
        Piece::Name(s.to_string())
    }

    #[test]
    fn splits_letter_runs() {
        assert_eq!(
            pieces("2pix"),
            vec![Piece::Number("2".into()), name("pi"), name("x")]
        );
        assert_eq!(pieces("ex"), vec![name("e"), name("x")]);
        assert_eq!(pieces("exp"), vec![name("exp")]);
        assert_eq!(pieces("sinhx"), vec![name("sinh"), name("x")]);
        assert_eq!(pieces("xsin"), vec![name("x"), name("sin")]);
    }

    #[test]
    fn keeps_digit_suffixed_names() {
        assert_eq!(
            pieces("log10(x)"),
            vec![
                name("log10"),
                Piece::Symbol('('),
                name("x"),
                Piece::Symbol(')')
            ]
        );
        assert_eq!(
            pieces("log3"),
            vec![Piece::Word("log".into()), Piece::Number("3".into())]
        );
    }

    #[test]
    fn unknown_words_and_spaces() {
        assert_eq!(
            pieces("max (2.5 ,y)"),
            vec![
                Piece::Word("ma".into()),
                name("x"),
                Piece::Space(" ".into()),
                Piece::Symbol('('),
                Piece::Number("2.5".into()),
                Piece::Space(" ".into()),
                Piece::Symbol(','),
                Piece::Word("y".into()),
                Piece::Symbol(')'),
            ]
        );
    }

    #[test]
    fn numbers_start_with_a_digit() {
        assert_eq!(
            pieces(".5x"),
            vec![Piece::Symbol('.'), Piece::Number("5".into()), name("x")]
        );
        assert_eq!(pieces("2."), vec![Piece::Number("2.".into())]);
    }

    #[test]
    fn whitespace_and_digit_runs() {
        assert_eq!(
            pieces("2 \t x"),
            vec![
                Piece::Number("2".into()),
                Piece::Space(" \t ".into()),
                name("x"),
            ]
        );
        assert_eq!(
            pieces("3.25.1x"),
            vec![Piece::Number("3.25.1".into()), name("x")]
        );
    }

    #[test]
    fn renders_back_verbatim() {
        let input = "  2pi x*exp(-x)/ sinh(3.5) ";
        let rendered: String = pieces(input).iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, input);
    }
}
