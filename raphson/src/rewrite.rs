use crate::context::CONTEXT;
use lexers::{NotationTokenizer, Piece};
use tracing::trace;

// What a rule expects at one position of the piece stream.
#[derive(Clone, Copy, Debug)]
enum Slot {
    /// a number whose last character is a digit
    DigitEnd,
    /// a number, they always start with a digit
    DigitStart,
    Name(&'static str),
    OpenParen,
    CloseParen,
    /// lowercase letters immediately followed by '(', the '(' included
    Call,
}

impl Slot {
    // index right after the slot when it matches at 'at'
    fn matches(self, pieces: &[Piece], at: usize) -> Option<usize> {
        let piece = pieces.get(at)?;
        let matched = match self {
            Slot::DigitEnd => {
                matches!(piece, Piece::Number(n) if n.ends_with(|c: char| c.is_ascii_digit()))
            }
            Slot::DigitStart => matches!(piece, Piece::Number(_)),
            Slot::Name(name) => piece.is_name(name),
            Slot::OpenParen => *piece == Piece::Symbol('('),
            Slot::CloseParen => *piece == Piece::Symbol(')'),
            Slot::Call => {
                let letters = pieces[at..]
                    .iter()
                    .take_while(|p| is_lowercase_word(p))
                    .count();
                return match pieces.get(at + letters) {
                    Some(Piece::Symbol('(')) if letters > 0 => Some(at + letters + 1),
                    _ => None,
                };
            }
        };
        matched.then_some(at + 1)
    }
}

fn is_lowercase_word(piece: &Piece) -> bool {
    match piece {
        Piece::Name(w) | Piece::Word(w) => w
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
        _ => false,
    }
}

// Condition on the character right before or after a match.
#[derive(Clone, Copy, Debug)]
enum Guard {
    Any,
    /// not a letter, digit or underscore (a word boundary)
    NotWord,
    /// not a lowercase letter
    NotLetter,
}

impl Guard {
    fn allows(self, neighbour: Option<char>) -> bool {
        match (self, neighbour) {
            (Guard::Any, _) | (_, None) => true,
            (Guard::NotWord, Some(c)) => !(c.is_alphanumeric() || c == '_'),
            (Guard::NotLetter, Some(c)) => !c.is_ascii_lowercase(),
        }
    }
}

/// Inserts '*' between consecutive slots. Whitespace between slots is
/// dropped along with the match.
struct Rule {
    label: &'static str,
    slots: &'static [Slot],
    before: Guard,
    after: Guard,
}

const fn rule(label: &'static str, slots: &'static [Slot], before: Guard, after: Guard) -> Rule {
    Rule {
        label,
        slots,
        before,
        after,
    }
}

const PI: Slot = Slot::Name("pi");
const E: Slot = Slot::Name("e");
const X: Slot = Slot::Name("x");

// Order matters, earlier rules see the text before later ones.
const RULES: &[Rule] = &[
    rule("digit pi x", &[Slot::DigitEnd, PI, X], Guard::Any, Guard::Any),
    rule("digit e x", &[Slot::DigitEnd, E, X], Guard::Any, Guard::NotLetter),
    rule("digit pi", &[Slot::DigitEnd, PI], Guard::Any, Guard::NotWord),
    rule("digit e", &[Slot::DigitEnd, E], Guard::Any, Guard::NotWord),
    rule("digit x", &[Slot::DigitEnd, X], Guard::Any, Guard::Any),
    rule("x digit", &[X, Slot::DigitStart], Guard::Any, Guard::Any),
    rule("pi x", &[PI, X], Guard::Any, Guard::Any),
    rule("e x", &[E, X], Guard::NotWord, Guard::NotLetter),
    rule("number (", &[Slot::DigitEnd, Slot::OpenParen], Guard::NotWord, Guard::Any),
    rule("x (", &[X, Slot::OpenParen], Guard::NotWord, Guard::Any),
    rule("pi (", &[PI, Slot::OpenParen], Guard::Any, Guard::Any),
    rule("e (", &[E, Slot::OpenParen], Guard::NotWord, Guard::Any),
    rule(") (", &[Slot::CloseParen, Slot::OpenParen], Guard::Any, Guard::Any),
    rule(") x", &[Slot::CloseParen, X], Guard::Any, Guard::Any),
    rule(") call", &[Slot::CloseParen, Slot::Call], Guard::Any, Guard::Any),
    rule("digit call", &[Slot::DigitEnd, Slot::Call], Guard::Any, Guard::Any),
    rule("x call", &[X, Slot::Call], Guard::NotWord, Guard::Any),
    rule("pi call", &[PI, Slot::Call], Guard::Any, Guard::Any),
    rule("e call", &[E, Slot::Call], Guard::NotWord, Guard::Any),
];

impl Rule {
    fn match_at<'p>(&self, pieces: &'p [Piece], start: usize) -> Option<(usize, Vec<&'p [Piece]>)> {
        let before = start
            .checked_sub(1)
            .and_then(|b| pieces[b].text().chars().last());
        if !self.before.allows(before) {
            return None;
        }
        let mut parts = Vec::with_capacity(self.slots.len());
        let mut at = start;
        for (n, slot) in self.slots.iter().enumerate() {
            if n > 0 && matches!(pieces.get(at), Some(Piece::Space(_))) {
                at += 1;
            }
            let end = slot.matches(pieces, at)?;
            parts.push(&pieces[at..end]);
            at = end;
        }
        let after = pieces.get(at).and_then(|p| p.text().chars().next());
        if !self.after.allows(after) {
            return None;
        }
        Some((at, parts))
    }

    // non-overlapping matches, left to right
    fn apply(&self, pieces: &[Piece]) -> Vec<Piece> {
        let mut out = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            match self.match_at(pieces, i) {
                Some((end, parts)) => {
                    for (n, part) in parts.into_iter().enumerate() {
                        if n > 0 {
                            out.push(Piece::Symbol('*'));
                        }
                        out.extend_from_slice(part);
                    }
                    i = end;
                }
                None => {
                    out.push(pieces[i].clone());
                    i += 1;
                }
            }
        }
        out
    }
}

fn render(pieces: &[Piece]) -> String {
    pieces.iter().map(Piece::text).collect()
}

/// Make implicit multiplication explicit (`2x` to `2*x`, `x(x+1)` to
/// `x*(x+1)`) and spell powers as `**`. Never fails, text that no rule
/// recognizes is left as is.
pub fn rewrite(text: &str) -> String {
    let text = text.replace('^', "**");
    let vocabulary = CONTEXT.names();
    let mut pieces: Vec<Piece> = NotationTokenizer::new(text.chars(), &vocabulary).collect();
    for rule in RULES {
        let rewritten = rule.apply(&pieces);
        if rewritten != pieces {
            trace!(rule = rule.label, text = %render(&rewritten), "implicit multiplication");
            pieces = rewritten;
        }
    }
    render(&pieces)
}

///////////////////////////////////////////////////////////////////////////////
