use crate::model::RecipeIngredient;

/// Display labels for eighths 1..=7
const EIGHTHS: [&str; 7] = ["1/8", "1/4", "3/8", "1/2", "5/8", "3/4", "7/8"];

/// Format a quantity the way a kitchen measures it: whole numbers plus eighths
///
/// Values are snapped to the nearest eighth, rounding half up (`f64::round`
/// rounds half away from zero, which is the same on non-negative input), so
/// `0.0625` becomes `"1/8"`.
pub fn format_kitchen_fraction(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value}");
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 8.0).round() / 8.0;
    let whole = rounded.floor();
    let eighths = ((rounded - whole) * 8.0).round() as usize;

    match eighths {
        0 => format!("{whole}"),
        1..=7 if whole > 0.0 => format!("{whole} {}", EIGHTHS[eighths - 1]),
        1..=7 => EIGHTHS[eighths - 1].to_string(),
        _ => rounded.to_string(),
    }
}

/// Display strings for one ingredient at a servings multiplier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurement {
    /// e.g. `"1 1/2 cups"`
    pub common: Option<String>,
    /// e.g. `"190 g"`
    pub grams: Option<String>,
}

impl Measurement {
    /// `"1 cup (120 g)"`, or whichever half is present
    pub fn display(&self) -> Option<String> {
        match (&self.common, &self.grams) {
            (Some(common), Some(grams)) => Some(format!("{common} ({grams})")),
            (Some(common), None) => Some(common.clone()),
            (None, Some(grams)) => Some(grams.clone()),
            (None, None) => None,
        }
    }
}

/// Scale and format an ingredient's measurements
///
/// A zero gram weight is treated as absent.
pub fn format_measurement(ingredient: &RecipeIngredient, multiplier: f64) -> Measurement {
    let common = ingredient.amount.as_ref().map(|amount| {
        format!(
            "{} {}",
            format_kitchen_fraction(amount.value * multiplier),
            amount.unit
        )
    });
    let grams = ingredient
        .grams
        .filter(|grams| *grams > 0.0)
        .map(|grams| format!("{} g", (grams * multiplier).round()));

    Measurement { common, grams }
}
