/// Replace the unicode glyphs people paste into math input with their
/// ASCII spelling. Characters without a mapping pass through untouched.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\u{2212}' | '\u{2013}' | '\u{2014}' => out.push('-'),
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '²' => out.push_str("^2"),
            '³' => out.push_str("^3"),
            '√' => out.push_str("sqrt"),
            'π' => out.push_str("pi"),
            '∞' => out.push_str("inf"),
            other => out.push(other),
        }
    }
    out
}

///////////////////////////////////////////////////////////////////////////////
