use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::browse;
use crate::config::ArchiveConfig;
use crate::error::{RecipeError, Result};
use crate::frontmatter::{self, MISSING_DELIMITERS};
use crate::model::{Recipe, RecipeSummary};
use crate::validate;

/// Reads recipes from a directory of markdown files
///
/// Every query reads the directory again, so results always reflect the
/// files currently on disk.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    content_dir: PathBuf,
    extension: String,
}

impl RecipeRepository {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            extension: "md".to_string(),
        }
    }

    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self::new(config.content_dir.clone()).with_extension(config.extension.as_str())
    }

    /// Recognize files with this extension (without the dot) as recipes
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Stems of every recipe file, sorted
    pub fn list_slugs(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.content_dir).map_err(|source| RecipeError::Io {
            path: self.content_dir.clone(),
            source,
        })?;

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RecipeError::Io {
                path: self.content_dir.clone(),
                source,
            })?;
            let path = entry.path();
            let extension = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || extension != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }

        slugs.sort();
        debug!(
            "Found {} recipe files in {}",
            slugs.len(),
            self.content_dir.display()
        );
        Ok(slugs)
    }

    /// Every recipe, newest first
    ///
    /// Dates are compared as plain strings, so they must be zero-padded
    /// `YYYY-MM-DD`. Recipes sharing a date keep slug order. The first file
    /// that fails to parse aborts the whole load.
    pub fn load_all(&self) -> Result<Vec<Recipe>> {
        let mut recipes = self
            .list_slugs()?
            .iter()
            .map(|slug| self.parse_recipe(slug))
            .collect::<Result<Vec<_>>>()?;

        recipes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(recipes)
    }

    /// A single recipe, or `None` if it is missing or malformed
    pub fn load_by_slug(&self, slug: &str) -> Option<Recipe> {
        if !is_safe_slug(slug) {
            debug!("Rejected recipe slug '{}'", slug);
            return None;
        }

        match self.parse_recipe(slug) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                debug!("Recipe '{}' not available: {}", slug, e);
                None
            }
        }
    }

    pub fn list_summaries(&self) -> Result<Vec<RecipeSummary>> {
        Ok(self
            .load_all()?
            .into_iter()
            .map(RecipeSummary::from)
            .collect())
    }

    /// Every distinct tag, sorted ascending
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let tags: BTreeSet<String> = self
            .load_all()?
            .into_iter()
            .flat_map(|recipe| recipe.frontmatter.tags)
            .collect();

        Ok(tags.into_iter().collect())
    }

    /// Summaries carrying `tag`, or `None` if no recipe uses that tag
    pub fn list_summaries_by_tag(&self, tag: &str) -> Result<Option<Vec<RecipeSummary>>> {
        let summaries = self.list_summaries()?;
        let tagged: Vec<RecipeSummary> = summaries
            .into_iter()
            .filter(|summary| summary.tags.iter().any(|t| t == tag))
            .collect();

        Ok((!tagged.is_empty()).then_some(tagged))
    }

    /// Up to `limit` other recipes sharing a tag with `recipe`, newest first
    pub fn related_summaries(
        &self,
        recipe: &Recipe,
        limit: usize,
    ) -> Result<Vec<RecipeSummary>> {
        let summaries = self.list_summaries()?;
        Ok(browse::related(recipe, &summaries, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    fn recipe_path(&self, slug: &str) -> PathBuf {
        self.content_dir.join(format!("{}.{}", slug, self.extension))
    }

    fn parse_recipe(&self, slug: &str) -> Result<Recipe> {
        let path = self.recipe_path(slug);
        let content =
            fs::read_to_string(&path).map_err(|source| RecipeError::Io { path, source })?;

        parse_recipe(slug, &content)
    }
}

/// Parse one recipe file's content
pub fn parse_recipe(slug: &str, content: &str) -> Result<Recipe> {
    let (block, body) = frontmatter::split(content).ok_or_else(|| RecipeError::Parse {
        slug: slug.to_string(),
        message: MISSING_DELIMITERS.to_string(),
    })?;

    let map = frontmatter::decode(block).map_err(|message| RecipeError::Parse {
        slug: slug.to_string(),
        message,
    })?;

    let frontmatter = validate::frontmatter(&map).map_err(|error| RecipeError::Validation {
        slug: slug.to_string(),
        error,
    })?;

    Ok(Recipe {
        slug: slug.to_string(),
        frontmatter,
        body: body.trim().to_string(),
    })
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains(['/', '\\'])
        && slug != "."
        && slug != ".."
}
