//! Jyutping to canonical phonemic spelling.
//!
//! The rewrites are literal and strictly sequential: each one runs over the
//! whole string before the next starts, so later rules see the output of
//! earlier ones (`aa` first becomes `ää`, then folds back to `a`).

/// Ordered literal substitutions.
const REWRITES: &[(&str, &str)] = &[
    ("a", "ä"),
    ("ää", "a"),
    ("oe", "ö"),
    ("eo", "ö"),
    ("yu", "ü"),
    ("j", "y"),
];

/// Rewrite a reference-dialect reading (one or more space-separated tokens).
pub fn canonicalize(reading: &str) -> String {
    let folded = REWRITES
        .iter()
        .fold(reading.to_string(), |acc, (from, to)| acc.replace(from, to));
    insert_labial_glide(&folded)
}

/// `gu`/`ku` become `gwu`/`kwu` unless the `u` is followed by `ng` or `k`.
fn insert_labial_glide(reading: &str) -> String {
    let chars: Vec<char> = reading.chars().collect();
    let mut out = String::with_capacity(reading.len() + 2);
    for (idx, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if matches!(ch, 'g' | 'k') && chars.get(idx + 1) == Some(&'u') {
            let rest = &chars[idx + 2..];
            let blocked = rest.starts_with(&['n', 'g']) || rest.first() == Some(&'k');
            if !blocked {
                out.push('w');
            }
        }
    }
    out
}
