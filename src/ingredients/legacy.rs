use log::debug;
use thiserror::Error;

use crate::model::RecipeIngredient;

/// Unit tokens recognized in free-text ingredient lines (matched case-insensitively)
pub const COMMON_UNITS: &[&str] = &[
    "g", "gram", "grams", "kg", "ml", "l", "tsp", "tbsp", "cup", "cups", "oz", "lb", "pinch",
    "clove", "cloves", "slice", "slices", "whole",
];

const DEFAULT_UNIT: &str = "whole";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngredientError {
    #[error("Ingredient lines must not be empty")]
    Empty,
}

/// Parse a free-text line such as `"1 1/2 tsp salt"` into an ingredient
///
/// Lines that don't start with a number become a bare name without any
/// measurement. A number followed by a token outside [`COMMON_UNITS`] gets the
/// unit `whole`, and that token starts the name.
pub fn parse_legacy_ingredient(line: &str) -> Result<RecipeIngredient, IngredientError> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(IngredientError::Empty);
    }

    let Some(first) = parse_numeric_token(tokens[0]) else {
        return Ok(RecipeIngredient::named(trimmed));
    };

    let second = tokens.get(1).and_then(|token| parse_fraction(token));
    let value = first + second.unwrap_or(0.0);
    let consumed = if second.is_some() { 2 } else { 1 };

    let Some(unit_candidate) = tokens.get(consumed) else {
        return Ok(RecipeIngredient::named(trimmed).with_amount(value, DEFAULT_UNIT));
    };

    if is_common_unit(unit_candidate) {
        let rest = tokens[consumed + 1..].join(" ");
        let name = if rest.is_empty() { trimmed.to_string() } else { rest };
        return Ok(RecipeIngredient::named(name).with_amount(value, *unit_candidate));
    }

    debug!(
        "Unit '{}' not recognized in '{}', defaulting to '{}'",
        unit_candidate, trimmed, DEFAULT_UNIT
    );
    Ok(RecipeIngredient::named(tokens[consumed..].join(" ")).with_amount(value, DEFAULT_UNIT))
}

fn is_common_unit(token: &str) -> bool {
    let lower = token.to_lowercase();
    COMMON_UNITS.contains(&lower.as_str())
}

/// `n/d` with a nonzero denominator
fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    if !is_digits(numerator) || !is_digits(denominator) {
        return None;
    }

    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator)
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    if let Some(fraction) = parse_fraction(token) {
        return Some(fraction);
    }

    // Rust's float parser also accepts words like "inf" and "nan"
    let value: f64 = token.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
