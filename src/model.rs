use serde::Serialize;

/// A quantity in a common kitchen unit, e.g. 1.5 cups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredientAmount {
    pub value: f64,
    pub unit: String,
}

impl RecipeIngredientAmount {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<RecipeIngredientAmount>,
    /// Mass in grams at the recipe's base servings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
}

impl RecipeIngredient {
    /// An ingredient with no measurement at all
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            grams: None,
        }
    }

    pub fn with_amount(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.amount = Some(RecipeIngredientAmount::new(value, unit));
        self
    }

    pub fn with_grams(mut self, grams: f64) -> Self {
        self.grams = Some(grams);
        self
    }
}

/// Validated front matter of a recipe file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFrontmatter {
    pub title: String,
    /// `YYYY-MM-DD`; compared as a plain string
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
    pub prep_minutes: f64,
    pub cook_minutes: f64,
    pub total_minutes: f64,
    pub servings: f64,
    pub ingredients: Vec<RecipeIngredient>,
}

/// A fully loaded recipe: front matter, slug and markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub slug: String,
    #[serde(flatten)]
    pub frontmatter: RecipeFrontmatter,
    pub body: String,
}

/// Listing projection of a recipe without its body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub slug: String,
    #[serde(flatten)]
    pub frontmatter: RecipeFrontmatter,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        RecipeSummary {
            slug: recipe.slug,
            frontmatter: recipe.frontmatter,
        }
    }
}

impl std::ops::Deref for Recipe {
    type Target = RecipeFrontmatter;

    fn deref(&self) -> &Self::Target {
        &self.frontmatter
    }
}

impl std::ops::Deref for RecipeSummary {
    type Target = RecipeFrontmatter;

    fn deref(&self) -> &Self::Target {
        &self.frontmatter
    }
}
