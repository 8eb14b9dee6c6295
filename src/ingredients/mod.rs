mod format;
mod legacy;
mod scale;

pub use self::format::{format_kitchen_fraction, format_measurement, Measurement};
pub use self::legacy::{parse_legacy_ingredient, IngredientError, COMMON_UNITS};
pub use self::scale::{scale, servings_multiplier, ServingsScale};
