//! Search, tag filtering and ordering of recipe listings

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::Serialize;

use crate::model::{Recipe, RecipeSummary};

/// How many tag suggestions the browser offers at once
pub const SUGGESTED_TAG_LIMIT: usize = 20;

/// How many related recipes a detail page lists
pub const RELATED_RECIPE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Newest first
    #[default]
    DateDesc,
    /// Quickest first, then by title
    TimeAsc,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" | "date_desc" => Ok(SortMode::DateDesc),
            "time" | "time_asc" => Ok(SortMode::TimeAsc),
            other => Err(format!("unknown sort mode '{other}' (expected 'date' or 'time')")),
        }
    }
}

/// Which tags a recipe must carry to be listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    /// Recipes with this tag
    Tag(String),
    /// Recipes with every one of these tags
    AllOf(Vec<String>),
}

impl TagFilter {
    pub fn matches(&self, summary: &RecipeSummary) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => summary.tags.contains(tag),
            TagFilter::AllOf(tags) => tags.iter().all(|tag| summary.tags.contains(tag)),
        }
    }
}

/// Case-insensitive substring search over title, description, tags and ingredients
pub fn matches_query(summary: &RecipeSummary, query: &str) -> bool {
    let mut haystack = vec![summary.title.clone(), summary.description.clone()];
    haystack.extend(summary.tags.iter().cloned());
    for ingredient in &summary.ingredients {
        haystack.push(ingredient.name.clone());
        if let Some(amount) = &ingredient.amount {
            haystack.push(amount.unit.clone());
        }
        if let Some(grams) = ingredient.grams.filter(|g| *g != 0.0) {
            haystack.push(grams.to_string());
        }
    }

    haystack
        .join(" ")
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Summaries passing both the text query and the tag filter, order kept
///
/// A blank query matches everything.
pub fn filter<'a>(
    summaries: &'a [RecipeSummary],
    query: &str,
    tags: &TagFilter,
) -> Vec<&'a RecipeSummary> {
    let query = query.trim();
    summaries
        .iter()
        .filter(|summary| query.is_empty() || matches_query(summary, query))
        .filter(|summary| tags.matches(summary))
        .collect()
}

pub fn sort(summaries: &mut [&RecipeSummary], mode: SortMode) {
    match mode {
        SortMode::DateDesc => summaries.sort_by(|a, b| b.date.cmp(&a.date)),
        SortMode::TimeAsc => summaries.sort_by(|a, b| {
            a.total_minutes
                .partial_cmp(&b.total_minutes)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

/// How many recipes carry each tag, skipping `excluded`
pub fn tag_counts<'a, I>(summaries: I, excluded: &HashSet<String>) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a RecipeSummary>,
{
    let mut counts = BTreeMap::new();
    for summary in summaries {
        for tag in summary.tags.iter().filter(|tag| !excluded.contains(*tag)) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tags to offer next, most used first
///
/// Counts run over the summaries carrying every `selected` tag, leaving the
/// selected tags out. Ties are broken by name. Only tags containing `search`
/// (case-insensitive, trimmed) are kept.
pub fn suggest_tags(
    summaries: &[RecipeSummary],
    selected: &[String],
    search: &str,
    limit: usize,
) -> Vec<TagCount> {
    let selection = TagFilter::AllOf(selected.to_vec());
    let excluded: HashSet<String> = selected.iter().cloned().collect();
    let counts = tag_counts(
        summaries.iter().filter(|summary| selection.matches(summary)),
        &excluded,
    );

    // BTreeMap iterates by name, and the sort is stable
    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let search = search.trim().to_lowercase();
    ranked
        .into_iter()
        .filter(|entry| search.is_empty() || entry.tag.to_lowercase().contains(&search))
        .take(limit)
        .collect()
}

/// Other recipes sharing at least one tag with `recipe`, in listing order
pub fn related<'a>(
    recipe: &Recipe,
    candidates: &'a [RecipeSummary],
    limit: usize,
) -> Vec<&'a RecipeSummary> {
    candidates
        .iter()
        .filter(|candidate| candidate.slug != recipe.slug)
        .filter(|candidate| candidate.tags.iter().any(|tag| recipe.tags.contains(tag)))
        .take(limit)
        .collect()
}
