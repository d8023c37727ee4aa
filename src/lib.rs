//! Annotate recipe instructions with Cooklang markup.
//!
//! A scraped recipe's ingredient lines are parsed into name, quantity and
//! unit, then the first mention of each ingredient in the instructions is
//! rewritten as `@name{quantity%unit}` and durations become `~{amount%unit}`.

pub mod annotate;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod ingredients;
pub mod listing;
pub mod model;
pub mod scrape;

use log::debug;

pub use annotate::{annotate, Annotation, Diagnostic};
pub use builder::{Leaflet, LeafletBuilder, LeafletResult};
pub use config::LeafletConfig;
pub use document::{CookDocument, OutputTarget};
pub use error::LeafletError;
pub use ingredients::parse_ingredient;
pub use listing::{ListWalker, ListingSummary};
pub use model::{Ingredient, ScrapedRecipe};
pub use scrape::{RecipeSource, WebScraper};

/// Parse a recipe's ingredient lines and annotate its instructions
pub fn annotate_recipe(recipe: &ScrapedRecipe) -> Result<Annotation, LeafletError> {
    if recipe.instructions.trim().is_empty() {
        return Err(LeafletError::MissingField("instructions"));
    }

    let ingredients: Vec<Ingredient> = recipe
        .ingredients
        .iter()
        .map(|line| parse_ingredient(line))
        .collect();
    debug!("Parsed ingredients for {}: {:?}", recipe.title, ingredients);

    Ok(annotate(&recipe.instructions, &ingredients))
}

/// Annotate a recipe and render it as a `.cook` document
pub fn render_recipe(recipe: &ScrapedRecipe) -> Result<LeafletResult, LeafletError> {
    let annotation = annotate_recipe(recipe)?;
    Ok(LeafletResult {
        document: CookDocument::new(recipe, annotation.instructions),
        diagnostics: annotation.diagnostics,
    })
}

/// Scrape a recipe from `url` and render it
pub async fn import_recipe(
    source: &dyn RecipeSource,
    url: &str,
) -> Result<LeafletResult, LeafletError> {
    let recipe = source.scrape(url).await?;
    debug!("{:#?}", recipe);
    render_recipe(&recipe)
}
