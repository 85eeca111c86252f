#![deny(warnings)]

use crate::scanner::Scanner;

/*
 * The caller of these functions is expected to setup the scanner for a
 * clear start, ie: call scanner.ignore() to start fresh
 */

fn is_digit(c: &char) -> bool {
    c.is_ascii_digit()
}

// scan numbers like [0-9]*(\.[0-9]*)?([eE][+-]?[0-9]+)? with at least one digit
pub fn scan_number<I: Iterator<Item = char>>(scanner: &mut Scanner<I>) -> Option<String> {
    let backtrack = scanner.pos();
    let int_part = scanner.skip_matching(is_digit);
    let frac_part = scanner.accept(&'.').is_some() && scanner.skip_matching(is_digit);
    if !int_part && !frac_part {
        scanner.set_pos(backtrack);
        return None;
    }
    // check for exponent part, else it's just a plain decimal
    let backtrack = scanner.pos();
    if scanner.accept_any(&['e', 'E']).is_some() {
        scanner.accept_any(&['+', '-']); // exponent sign is optional
        if !scanner.skip_matching(is_digit) {
            scanner.set_pos(backtrack);
        }
    }
    Some(scanner.extract_string())
}

pub fn scan_math_op<I: Iterator<Item = char>>(scanner: &mut Scanner<I>) -> Option<String> {
    if scanner.accept(&'*').is_some() {
        // accept '*', '**'
        scanner.accept(&'*');
        Some(scanner.extract_string())
    } else if scanner.accept_any(&['+', '-', '/', '%', '(', ')', ',']).is_some() {
        Some(scanner.extract_string())
    } else {
        None
    }
}

// scan [a-zA-Z_][a-zA-Z0-9_]*
pub fn scan_identifier<I: Iterator<Item = char>>(scanner: &mut Scanner<I>) -> Option<String> {
    scanner.accept_if(|c| c.is_ascii_alphabetic() || *c == '_')?;
    scanner.skip_matching(|c| c.is_ascii_alphanumeric() || *c == '_');
    Some(scanner.extract_string())
}

///////////////////////////////////////////////////////////////////////////////
