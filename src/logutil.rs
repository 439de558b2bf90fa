//! Log formatting for raw player input.

/// Characters of an input line kept in the log. A real guess is at most a few
/// digits, so anything longer is pasted junk.
const GUESS_PREVIEW: usize = 24;

/// Render one line of player input for a single-line log entry.
///
/// Quotes and control characters use Rust's debug escapes (`\n`, `\"`,
/// `\u{7}`), so the result is safe to wrap in quotes. Input past
/// [`GUESS_PREVIEW`] characters is cut and the number of dropped characters
/// noted, e.g. `999999…(+176 chars)`.
pub fn preview_input(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .take(GUESS_PREVIEW)
        .flat_map(char::escape_debug)
        .collect();
    let dropped = raw.chars().count().saturating_sub(GUESS_PREVIEW);
    if dropped > 0 {
        out.push_str(&format!("…(+{} chars)", dropped));
    }
    out
}
