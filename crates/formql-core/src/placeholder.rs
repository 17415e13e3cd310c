//! Placeholder translation.
//!
//! The serializer emits generic `?` markers. This stage rewrites them into
//! PostgreSQL positional placeholders in one left-to-right pass; swapping
//! this function is the only change needed to target a dialect that keeps
//! untyped `?` markers.

/// Replaces each `?` with a sequential `$N` placeholder.
///
/// A doubled `??` is an escape for one literal `?` and consumes no
/// argument position.
#[must_use]
pub fn replace_placeholders(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut position = 0_usize;
    let mut chars = query.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '?' {
            if chars.peek() == Some(&'?') {
                chars.next();
                out.push('?');
            } else {
                position += 1;
                out.push_str(&format!("${position}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}
