pub mod browse;
pub mod config;
pub mod error;
pub mod export;
pub mod frontmatter;
pub mod ingredients;
pub mod method;
pub mod model;
pub mod repository;
pub mod validate;

pub use crate::config::ArchiveConfig;
pub use crate::error::{FieldError, RecipeError, Result};
pub use crate::model::{
    Recipe, RecipeFrontmatter, RecipeIngredient, RecipeIngredientAmount, RecipeSummary,
};
pub use crate::repository::{parse_recipe, RecipeRepository};

/// Open the repository described by `recipes.toml` and `RECIPES__*` variables
pub fn open_repository() -> Result<RecipeRepository> {
    let config = ArchiveConfig::load()?;
    Ok(RecipeRepository::from_config(&config))
}

/// Load every recipe in `content_dir`, newest first
pub fn load_recipes(content_dir: impl Into<std::path::PathBuf>) -> Result<Vec<Recipe>> {
    RecipeRepository::new(content_dir).load_all()
}
