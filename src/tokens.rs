//! Positional token helpers used by the normalization pipeline.
//!
//! All operations here are defined for every input: out-of-range positions
//! clamp or yield an empty result instead of panicking, which keeps the
//! combinatorial generator total.

/// Check whether a string parses as a floating-point number.
///
/// Empty strings are not numeric. This is the test used to decide whether a
/// hyphen- or boundary-split fragment is a numeric house/building suffix.
pub fn is_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok()
}

/// Join `tokens[start..stop]` with `delimiter`.
///
/// Returns an empty string when `start` is past the end of the slice or the
/// range is empty. `stop` past the end is clamped.
pub fn join_range(tokens: &[String], delimiter: char, start: usize, stop: usize) -> String {
    if start >= tokens.len() || start >= stop {
        return String::new();
    }
    let stop = stop.min(tokens.len());

    let mut out = String::with_capacity(tokens[start..stop].iter().map(|t| t.len() + 1).sum());
    out.push_str(&tokens[start]);
    for token in &tokens[start + 1..stop] {
        out.push(delimiter);
        out.push_str(token);
    }
    out
}

/// Insert `element` before `position`, clamping `position` to the length.
///
/// This primitive underlies every split operation: splitting token `i` into
/// two tokens rewrites token `i` to its left fragment and inserts the right
/// fragment via `insert_at(tokens, i + 1, right)`.
pub fn insert_at(tokens: &mut Vec<String>, position: usize, element: String) {
    let position = position.min(tokens.len());
    tokens.insert(position, element);
}
