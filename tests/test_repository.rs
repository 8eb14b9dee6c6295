use recipe_archive::{RecipeError, RecipeRepository};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn recipe_file(title: &str, date: &str, tags: &str) -> String {
    format!(
        r#"---
title: {title}
date: {date}
description: A recipe called {title}.
tags: {tags}
prepMinutes: 10
cookMinutes: 20
totalMinutes: 30
servings: 2
ingredients:
  - name: flour
    amount: {{ value: 1, unit: cup }}
    grams: 120
---

## Execution
1. Cook {title}.
"#
    )
}

fn write(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "pancakes.md",
        &recipe_file("Pancakes", "2024-01-01", "[breakfast, sweet]"),
    );
    write(
        dir.path(),
        "shakshuka.md",
        &recipe_file("Shakshuka", "2024-06-15", "[breakfast, eggs, vegetarian]"),
    );
    write(
        dir.path(),
        "brownies.md",
        &recipe_file("Brownies", "2023-12-31", "\n  - sweet\n  - baking"),
    );
    dir
}

#[test]
fn test_list_slugs_only_markdown_files() {
    let dir = fixture();
    write(dir.path(), "notes.txt", "not a recipe");
    fs::create_dir(dir.path().join("drafts.md")).unwrap();

    let repo = RecipeRepository::new(dir.path());
    assert_eq!(
        repo.list_slugs().unwrap(),
        vec!["brownies", "pancakes", "shakshuka"]
    );
}

#[test]
fn test_load_all_sorted_by_date_descending() {
    let dir = fixture();
    let recipes = RecipeRepository::new(dir.path()).load_all().unwrap();

    let dates: Vec<&str> = recipes.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-06-15", "2024-01-01", "2023-12-31"]);
    assert_eq!(recipes[0].slug, "shakshuka");
    assert_eq!(recipes[0].body, "## Execution\n1. Cook Shakshuka.");
}

#[test]
fn test_load_all_keeps_slug_order_for_equal_dates() {
    let dir = tempfile::tempdir().unwrap();
    for slug in ["c-soup", "a-soup", "b-soup"] {
        write(
            dir.path(),
            &format!("{slug}.md"),
            &recipe_file(slug, "2024-02-02", "[soup]"),
        );
    }

    let recipes = RecipeRepository::new(dir.path()).load_all().unwrap();
    let slugs: Vec<&str> = recipes.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a-soup", "b-soup", "c-soup"]);
}

#[test]
fn test_list_tags_deduplicated_and_sorted() {
    let dir = fixture();
    let tags = RecipeRepository::new(dir.path()).list_tags().unwrap();
    assert_eq!(
        tags,
        vec!["baking", "breakfast", "eggs", "sweet", "vegetarian"]
    );
}

#[test]
fn test_list_summaries_match_load_all() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());

    let summaries = repo.list_summaries().unwrap();
    let recipes = repo.load_all().unwrap();
    assert_eq!(summaries.len(), recipes.len());
    for (summary, recipe) in summaries.iter().zip(&recipes) {
        assert_eq!(summary.slug, recipe.slug);
        assert_eq!(summary.frontmatter, recipe.frontmatter);
    }
}

#[test]
fn test_list_summaries_by_tag() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());

    let sweet = repo.list_summaries_by_tag("sweet").unwrap().unwrap();
    let slugs: Vec<&str> = sweet.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["pancakes", "brownies"]);

    assert!(repo.list_summaries_by_tag("dinner").unwrap().is_none());
}

#[test]
fn test_load_by_slug() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());

    let recipe = repo.load_by_slug("pancakes").unwrap();
    assert_eq!(recipe.title, "Pancakes");
    assert_eq!(recipe.tags, vec!["breakfast", "sweet"]);
    assert_eq!(recipe.ingredients[0].grams, Some(120.0));
}

#[test]
fn test_load_by_slug_nonexistent_is_none() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());
    assert!(repo.load_by_slug("nonexistent").is_none());
    assert!(repo.load_by_slug("../pancakes").is_none());
    assert!(repo.load_by_slug("").is_none());
}

#[test]
fn test_load_by_slug_malformed_is_none() {
    let dir = fixture();
    write(dir.path(), "broken.md", "no frontmatter here");
    write(
        dir.path(),
        "invalid.md",
        &recipe_file("Invalid", "2024-01-01", "[x]").replace("servings: 2\n", ""),
    );

    let repo = RecipeRepository::new(dir.path());
    assert!(repo.load_by_slug("broken").is_none());
    assert!(repo.load_by_slug("invalid").is_none());
}

#[test]
fn test_missing_servings_fails_load_all() {
    let dir = fixture();
    write(
        dir.path(),
        "invalid.md",
        &recipe_file("Invalid", "2024-01-01", "[x]").replace("servings: 2\n", ""),
    );

    let err = RecipeRepository::new(dir.path()).load_all().unwrap_err();
    match &err {
        RecipeError::Validation { slug, error } => {
            assert_eq!(slug, "invalid");
            assert_eq!(error.field, "servings");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Every batch query shares the failure
    let repo = RecipeRepository::new(dir.path());
    assert!(repo.list_summaries().is_err());
    assert!(repo.list_tags().is_err());
}

#[test]
fn test_ingredient_without_measurement_names_path() {
    let dir = fixture();
    let content = recipe_file("Salad", "2024-04-04", "[salad]").replace(
        "    grams: 120\n",
        "    grams: 120\n  - name: lettuce\n",
    );
    write(dir.path(), "salad.md", &content);

    let err = RecipeRepository::new(dir.path()).load_all().unwrap_err();
    assert_eq!(err.field(), Some("ingredients[1]"));
    assert!(err.to_string().contains("lettuce"));
}

#[test]
fn test_missing_delimiters_is_parse_error() {
    let dir = fixture();
    write(dir.path(), "broken.md", "title: Broken\n\nBody");

    let err = RecipeRepository::new(dir.path()).load_all().unwrap_err();
    assert!(matches!(err, RecipeError::Parse { .. }));
    assert!(err
        .to_string()
        .contains("missing valid frontmatter delimiters"));
}

#[test]
fn test_unreadable_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = RecipeRepository::new(dir.path().join("missing"));

    assert!(matches!(repo.list_slugs(), Err(RecipeError::Io { .. })));
    assert!(matches!(repo.load_all(), Err(RecipeError::Io { .. })));
}

#[test]
fn test_reads_reflect_latest_files() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());
    assert_eq!(repo.load_all().unwrap().len(), 3);

    write(
        dir.path(),
        "pancakes.md",
        &recipe_file("Crepes", "2025-01-01", "[breakfast]"),
    );
    write(
        dir.path(),
        "omelette.md",
        &recipe_file("Omelette", "2024-03-03", "[eggs]"),
    );

    let recipes = repo.load_all().unwrap();
    assert_eq!(recipes.len(), 4);
    assert_eq!(recipes[0].title, "Crepes");
}

#[test]
fn test_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "stew.markdown",
        &recipe_file("Stew", "2024-01-01", "[stew]"),
    );
    write(
        dir.path(),
        "soup.md",
        &recipe_file("Soup", "2024-01-01", "[soup]"),
    );

    let repo = RecipeRepository::new(dir.path()).with_extension("markdown");
    assert_eq!(repo.list_slugs().unwrap(), vec!["stew"]);
    assert!(repo.load_by_slug("stew").is_some());
    assert!(repo.load_by_slug("soup").is_none());
}

#[test]
fn test_related_summaries_share_a_tag() {
    let dir = fixture();
    let repo = RecipeRepository::new(dir.path());

    let pancakes = repo.load_by_slug("pancakes").unwrap();
    let related = repo.related_summaries(&pancakes, 3).unwrap();
    let slugs: Vec<&str> = related.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["shakshuka", "brownies"]);

    let brownies = repo.load_by_slug("brownies").unwrap();
    let related = repo.related_summaries(&brownies, 3).unwrap();
    let slugs: Vec<&str> = related.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["pancakes"]);

    assert_eq!(repo.related_summaries(&pancakes, 1).unwrap().len(), 1);
}
