//! Coercion of decoded front matter into typed recipe fields
//!
//! Every failure names the path of the offending field so authors can find
//! the problem in the source file.

use serde_yaml::{Mapping, Value};

use crate::error::FieldError;
use crate::ingredients::parse_legacy_ingredient;
use crate::model::{RecipeFrontmatter, RecipeIngredient, RecipeIngredientAmount};

type FieldResult<T> = Result<T, FieldError>;

/// The two shapes an ingredient entry may take in front matter
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientEntry<'a> {
    /// Free text such as `"2 cups flour"`
    Legacy(&'a str),
    /// A mapping with `name` plus `amount` and/or `grams`
    Structured(&'a Mapping),
}

impl<'a> IngredientEntry<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(line) => Some(IngredientEntry::Legacy(line.as_str())),
            Value::Mapping(map) => Some(IngredientEntry::Structured(map)),
            _ => None,
        }
    }
}

pub fn frontmatter(map: &Mapping) -> FieldResult<RecipeFrontmatter> {
    Ok(RecipeFrontmatter {
        title: string(map.get("title"), "title")?,
        date: date(map.get("date"), "date")?,
        description: string(map.get("description"), "description")?,
        tags: string_array(map.get("tags"), "tags")?,
        prep_minutes: number(map.get("prepMinutes"), "prepMinutes")?,
        cook_minutes: number(map.get("cookMinutes"), "cookMinutes")?,
        total_minutes: number(map.get("totalMinutes"), "totalMinutes")?,
        servings: servings(map.get("servings"))?,
        ingredients: ingredients(map.get("ingredients"))?,
    })
}

fn string(value: Option<&Value>, field: &str) -> FieldResult<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(FieldError::new(field, "must be a non-empty string")),
    }
}

fn date(value: Option<&Value>, field: &str) -> FieldResult<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(FieldError::new(field, "must be a valid date string")),
    }
}

fn number(value: Option<&Value>, field: &str) -> FieldResult<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::new(field, "must be a valid number"))
}

fn non_negative(value: Option<&Value>, field: &str) -> FieldResult<f64> {
    let n = number(value, field)?;
    if n < 0.0 {
        return Err(FieldError::new(field, "must not be negative"));
    }
    Ok(n)
}

fn servings(value: Option<&Value>) -> FieldResult<f64> {
    let n = number(value, "servings")?;
    if n <= 0.0 {
        return Err(FieldError::new("servings", "must be greater than zero"));
    }
    Ok(n)
}

fn string_array(value: Option<&Value>, field: &str) -> FieldResult<Vec<String>> {
    let invalid = || FieldError::new(field, "must be a string array");
    let items = value.and_then(Value::as_sequence).ok_or_else(invalid)?;

    items
        .iter()
        .map(|item| item.as_str().map(str::trim).ok_or_else(invalid))
        .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
        .map(|item| item.map(str::to_string))
        .collect()
}

fn ingredients(value: Option<&Value>) -> FieldResult<Vec<RecipeIngredient>> {
    let items = value
        .and_then(Value::as_sequence)
        .ok_or_else(|| FieldError::new("ingredients", "must be an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| ingredient(item, &format!("ingredients[{index}]")))
        .collect()
}

fn ingredient(value: &Value, path: &str) -> FieldResult<RecipeIngredient> {
    match IngredientEntry::from_value(value) {
        Some(IngredientEntry::Legacy(line)) => {
            parse_legacy_ingredient(line).map_err(|e| FieldError::new(path, e.to_string()))
        }
        Some(IngredientEntry::Structured(map)) => structured_ingredient(map, path),
        None => Err(FieldError::new(path, "must be a string or a mapping")),
    }
}

fn structured_ingredient(map: &Mapping, path: &str) -> FieldResult<RecipeIngredient> {
    let name = string(map.get("name"), &format!("{path}.name"))?;
    let amount = map
        .get("amount")
        .map(|value| amount(value, &format!("{path}.amount")))
        .transpose()?;
    let grams = map
        .get("grams")
        .map(|value| non_negative(Some(value), &format!("{path}.grams")))
        .transpose()?;

    if amount.is_none() && grams.is_none() {
        return Err(FieldError::new(
            path,
            format!("(\"{name}\") must include at least one measurement: amount or grams"),
        ));
    }

    Ok(RecipeIngredient {
        name,
        amount,
        grams,
    })
}

fn amount(value: &Value, path: &str) -> FieldResult<RecipeIngredientAmount> {
    let map = value
        .as_mapping()
        .ok_or_else(|| FieldError::new(path, "must be a mapping with value and unit"))?;

    Ok(RecipeIngredientAmount {
        value: non_negative(map.get("value"), &format!("{path}.value"))?,
        unit: string(map.get("unit"), &format!("{path}.unit"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::decode;

    const VALID: &str = r#"
title: Tomato Soup
date: 2024-01-01
description: Warming and quick.
tags: [soup, quick]
prepMinutes: 10
cookMinutes: 25
totalMinutes: 35
servings: 4
ingredients:
  - name: tomatoes
    amount: { value: 800, unit: g }
    grams: 800
  - "1 1/2 tsp salt"
"#;

    fn with_line_replaced(from: &str, to: &str) -> Mapping {
        decode(&VALID.replace(from, to)).unwrap()
    }

    fn field_of(map: &Mapping) -> String {
        frontmatter(map).unwrap_err().field
    }

    #[test]
    fn test_valid_frontmatter() {
        let fm = frontmatter(&decode(VALID).unwrap()).unwrap();
        assert_eq!(fm.title, "Tomato Soup");
        assert_eq!(fm.date, "2024-01-01");
        assert_eq!(fm.tags, vec!["soup", "quick"]);
        assert_eq!(fm.total_minutes, 35.0);
        assert_eq!(fm.servings, 4.0);
        assert_eq!(fm.ingredients.len(), 2);
        assert_eq!(fm.ingredients[0].grams, Some(800.0));
        assert_eq!(fm.ingredients[0].amount.as_ref().unwrap().unit, "g");
        assert_eq!(fm.ingredients[1].name, "salt");
        assert_eq!(fm.ingredients[1].amount.as_ref().unwrap().value, 1.5);
    }

    #[test]
    fn test_strings_are_trimmed() {
        let map = with_line_replaced("title: Tomato Soup", "title: '  Tomato Soup  '");
        assert_eq!(frontmatter(&map).unwrap().title, "Tomato Soup");
    }

    #[test]
    fn test_block_list_tags_drop_blanks() {
        let map = with_line_replaced("tags: [soup, quick]", "tags:\n  - soup\n  - ' '\n  - quick");
        assert_eq!(frontmatter(&map).unwrap().tags, vec!["soup", "quick"]);
    }

    #[test]
    fn test_missing_servings() {
        let map = with_line_replaced("servings: 4\n", "");
        assert_eq!(field_of(&map), "servings");
    }

    #[test]
    fn test_zero_servings() {
        let map = with_line_replaced("servings: 4", "servings: 0");
        let err = frontmatter(&map).unwrap_err();
        assert_eq!(err.field, "servings");
        assert_eq!(err.message, "must be greater than zero");
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(field_of(&with_line_replaced("title: Tomato Soup", "title: ''")), "title");
        assert_eq!(field_of(&with_line_replaced("title: Tomato Soup", "title: 12")), "title");
        assert_eq!(
            field_of(&with_line_replaced("prepMinutes: 10", "prepMinutes: ten")),
            "prepMinutes"
        );
        assert_eq!(
            field_of(&with_line_replaced("cookMinutes: 25", "cookMinutes: .inf")),
            "cookMinutes"
        );
        assert_eq!(field_of(&with_line_replaced("tags: [soup, quick]", "tags: soup")), "tags");
        assert_eq!(field_of(&with_line_replaced("tags: [soup, quick]", "tags: [soup, 3]")), "tags");
        assert_eq!(field_of(&with_line_replaced("date: 2024-01-01", "date: true")), "date");
    }

    #[test]
    fn test_structured_ingredient_without_measurement() {
        let map = with_line_replaced("  - \"1 1/2 tsp salt\"", "  - name: salt");
        let err = frontmatter(&map).unwrap_err();
        assert_eq!(err.field, "ingredients[1]");
        assert!(err.message.contains("salt"));
    }

    #[test]
    fn test_nested_ingredient_paths() {
        assert_eq!(
            field_of(&with_line_replaced("grams: 800", "grams: -5")),
            "ingredients[0].grams"
        );
        assert_eq!(
            field_of(&with_line_replaced("unit: g }", "unit: '' }")),
            "ingredients[0].amount.unit"
        );
        assert_eq!(
            field_of(&with_line_replaced("{ value: 800, unit: g }", "{ value: lots, unit: g }")),
            "ingredients[0].amount.value"
        );
        assert_eq!(
            field_of(&with_line_replaced("{ value: 800, unit: g }", "800")),
            "ingredients[0].amount"
        );
        assert_eq!(
            field_of(&with_line_replaced("  - name: tomatoes", "  - name: ''")),
            "ingredients[0].name"
        );
    }

    #[test]
    fn test_empty_legacy_line() {
        let map = with_line_replaced("\"1 1/2 tsp salt\"", "\"   \"");
        let err = frontmatter(&map).unwrap_err();
        assert_eq!(err.field, "ingredients[1]");
        assert_eq!(err.message, "Ingredient lines must not be empty");
    }

    #[test]
    fn test_ingredient_of_wrong_shape() {
        let map = with_line_replaced("\"1 1/2 tsp salt\"", "42");
        assert_eq!(field_of(&map), "ingredients[1]");
    }

    #[test]
    fn test_grams_only_ingredient() {
        let map = with_line_replaced("    amount: { value: 800, unit: g }\n", "");
        let fm = frontmatter(&map).unwrap();
        assert_eq!(fm.ingredients[0].amount, None);
        assert_eq!(fm.ingredients[0].grams, Some(800.0));
    }
}
