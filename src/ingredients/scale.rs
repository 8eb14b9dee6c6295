use crate::model::{RecipeIngredient, RecipeIngredientAmount};

/// Ratio of desired servings to the recipe's base servings
pub fn servings_multiplier(target_servings: f64, base_servings: f64) -> f64 {
    target_servings / base_servings
}

/// Scale both the common-unit amount and the gram weight linearly
///
/// No rounding happens here; display rounding is done by the formatters.
pub fn scale(ingredient: &RecipeIngredient, multiplier: f64) -> RecipeIngredient {
    RecipeIngredient {
        name: ingredient.name.clone(),
        amount: ingredient
            .amount
            .as_ref()
            .map(|amount| RecipeIngredientAmount {
                value: amount.value * multiplier,
                unit: amount.unit.clone(),
            }),
        grams: ingredient.grams.map(|grams| grams * multiplier),
    }
}

/// Servings stepper for a recipe
///
/// Starts at the recipe's own servings, fractional or not. Stepping down
/// never goes below one serving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServingsScale {
    base: f64,
    servings: f64,
}

impl ServingsScale {
    pub fn new(base_servings: f64) -> Self {
        Self {
            base: base_servings,
            servings: base_servings,
        }
    }

    /// Jump straight to a servings count
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = f64::from(servings.max(1));
        self
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    pub fn increment(&mut self) {
        self.servings += 1.0;
    }

    pub fn decrement(&mut self) {
        self.servings = (self.servings - 1.0).max(1.0);
    }

    pub fn multiplier(&self) -> f64 {
        servings_multiplier(self.servings, self.base)
    }
}
