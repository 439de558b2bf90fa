//! Guess validation.

use std::num::IntErrorKind;

use crate::game::errors::ValidationError;

/// Parse a submitted guess.
///
/// The trimmed input must be a whole decimal integer with an optional sign.
/// Trailing junk is rejected rather than ignored, so `"3.5.2"` and `"318abc"`
/// are both invalid. Integers too large for `i64` are still integers: they
/// clamp to `i64::MAX`/`i64::MIN` and simply never match a total.
pub fn parse_guess(raw: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValidationError {
                input: raw.to_string(),
            }),
        },
    }
}
