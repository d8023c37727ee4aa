use serde::{Deserialize, Serialize};

/// A recipe as handed over by a scraper, before any annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecipe {
    pub title: String,
    /// Source URL
    #[serde(default)]
    pub link: String,
    /// Total time in minutes
    #[serde(default)]
    pub total_time: u32,
    #[serde(default)]
    pub image: String,
    pub instructions: String,
    /// Raw ingredient lines in scraper order
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// An ingredient line split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    /// Non-negative; 0 when the line carries no amount
    pub quantity: f64,
    /// Empty when the line carries no unit
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}
