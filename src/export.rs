//! Plain-text exports of a recipe at a chosen servings count

use crate::ingredients::{format_measurement, servings_multiplier};
use crate::model::{Recipe, RecipeIngredient};

/// `"{name} - {common} ({grams})"`, degrading to whichever measurement exists
pub fn shopping_list_line(ingredient: &RecipeIngredient, multiplier: f64) -> String {
    match format_measurement(ingredient, multiplier).display() {
        Some(measurement) => format!("{} - {}", ingredient.name, measurement),
        None => ingredient.name.clone(),
    }
}

fn shopping_list_lines(ingredients: &[RecipeIngredient], multiplier: f64) -> Vec<String> {
    ingredients
        .iter()
        .map(|ingredient| shopping_list_line(ingredient, multiplier))
        .collect()
}

/// Title followed by one line per ingredient
///
/// Returns `None` when there is nothing to shop for.
pub fn shopping_list_text(
    title: &str,
    ingredients: &[RecipeIngredient],
    multiplier: f64,
) -> Option<String> {
    if ingredients.is_empty() {
        return None;
    }

    let mut lines = vec![title.to_string()];
    lines.extend(shopping_list_lines(ingredients, multiplier));
    Some(lines.join("\n"))
}

/// The whole recipe as text, with ingredients scaled to `servings`
pub fn full_recipe_text(recipe: &Recipe, servings: f64) -> Option<String> {
    if recipe.ingredients.is_empty() {
        return None;
    }

    let multiplier = servings_multiplier(servings, recipe.servings);

    let mut lines = vec![
        recipe.title.clone(),
        recipe.description.clone(),
        String::new(),
        format!("Prep: {}m", recipe.prep_minutes),
        format!("Cook: {}m", recipe.cook_minutes),
        format!("Total: {}m", recipe.total_minutes),
        format!("Servings: {servings}"),
        String::new(),
        "Ingredients".to_string(),
    ];
    lines.extend(
        shopping_list_lines(&recipe.ingredients, multiplier)
            .into_iter()
            .map(|line| format!("- {line}")),
    );
    lines.push(String::new());
    lines.push("Method".to_string());
    lines.push(recipe.body.trim().to_string());

    Some(lines.join("\n"))
}
