mod helpers;
mod math_tokenizer;
mod notation_tokenizer;
mod scanner;

pub use helpers::{scan_identifier, scan_math_op, scan_number};
pub use math_tokenizer::{MathToken, MathTokenizer};
pub use notation_tokenizer::{NotationTokenizer, Piece};
pub use scanner::Scanner;
