use crate::model::ScrapedRecipe;
use scraper::Html;

mod json_ld;
mod microdata;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, Box<dyn std::error::Error>>;
}
