use crate::canonical::CanonicalExpression;
use crate::error::ValidationError;

pub const MAX_NESTING: usize = 10;

/// Check that `raw` can be solved before iterating on it: sane parentheses
/// and a value at `x = 1`.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    checked(raw).map(|_| ())
}

// Same as validate but hands back the canonical form for reuse.
pub(crate) fn checked(raw: &str) -> Result<CanonicalExpression, ValidationError> {
    let (mut depth, mut deepest, mut closed_early) = (0usize, 0usize, false);
    for c in raw.chars() {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' if depth == 0 => closed_early = true,
            ')' => depth -= 1,
            _ => (),
        }
    }
    if deepest > MAX_NESTING {
        return Err(ValidationError::ExcessiveNesting {
            depth: deepest,
            max: MAX_NESTING,
        });
    }
    if depth != 0 || closed_early {
        return Err(ValidationError::UnbalancedParentheses);
    }
    let canonical = CanonicalExpression::new(raw);
    canonical
        .evaluate(1.0)
        .map_err(ValidationError::Uncomputable)?;
    Ok(canonical)
}

///////////////////////////////////////////////////////////////////////////////
