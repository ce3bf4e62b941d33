//! Comparison scale - parsing of pairwise judgment values.
//!
//! Judgments live on the continuous 1/9..9 ratio scale. Users may type them
//! as plain numbers (`3`, `0.5`), fractions (`1/3`) or percentages (`50%`,
//! read as the ratio 0.5). A blank judgment means "no preference" (1).

use crate::domain::foundation::ValidationError;

/// Lower bound of the comparison scale.
pub const SCALE_MIN: f64 = 1.0 / 9.0;

/// Upper bound of the comparison scale.
pub const SCALE_MAX: f64 = 9.0;

/// Returns true if the value lies on the 1/9..9 scale.
///
/// A small slack admits `0.111` typed for 1/9.
pub fn within_scale(value: f64) -> bool {
    (SCALE_MIN - 1e-3..=SCALE_MAX).contains(&value)
}

/// Parses a textual judgment into a positive ratio.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFormat` for unparseable text or a zero
/// denominator, and `ValidationError::OutOfRange` for values that are not
/// strictly positive and finite.
pub fn parse_comparison_value(raw: &str) -> Result<f64, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(1.0);
    }

    let value = if let Some((numerator, denominator)) = text.split_once('/') {
        let numerator = parse_number(numerator, text)?;
        let denominator = parse_number(denominator, text)?;
        if denominator == 0.0 {
            return Err(ValidationError::invalid_format(
                "comparison value",
                format!("'{}' has a zero denominator", text),
            ));
        }
        numerator / denominator
    } else if let Some(percent) = text.strip_suffix('%') {
        parse_number(percent, text)? / 100.0
    } else {
        parse_number(text, text)?
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::out_of_range(
            "comparison value",
            SCALE_MIN,
            SCALE_MAX,
            value,
        ));
    }

    Ok(value)
}

fn parse_number(part: &str, whole: &str) -> Result<f64, ValidationError> {
    part.trim().parse::<f64>().map_err(|_| {
        ValidationError::invalid_format("comparison value", format!("'{}' is not a number", whole))
    })
}
