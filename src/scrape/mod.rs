//! Recipe scraping
//!
//! Fetches a recipe page and reads the title, ingredients, instructions,
//! image and total time from its structured data. None of this is needed by
//! the annotator itself, which only sees the resulting [`ScrapedRecipe`].

mod duration;
pub mod extractors;
mod fetcher;

pub use duration::duration_minutes;
pub use fetcher::RequestFetcher;

use crate::config::LeafletConfig;
use crate::error::LeafletError;
use crate::model::ScrapedRecipe;
use async_trait::async_trait;
use extractors::{Extractor, JsonLdExtractor, MicroDataExtractor, ParsingContext};
use log::debug;
use scraper::Html;

/// Anything that can turn a URL into a scraped recipe
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedRecipe, LeafletError>;
}

/// Scrapes schema.org recipes from web pages
pub struct WebScraper {
    fetcher: RequestFetcher,
}

impl WebScraper {
    pub fn new(fetcher: RequestFetcher) -> Self {
        Self { fetcher }
    }

    pub fn from_config(config: &LeafletConfig) -> Result<Self, LeafletError> {
        Ok(Self::new(RequestFetcher::from_config(config)?))
    }

    pub fn fetcher(&self) -> &RequestFetcher {
        &self.fetcher
    }
}

#[async_trait]
impl RecipeSource for WebScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedRecipe, LeafletError> {
        let html = self.fetcher.fetch(url).await?;
        extract_recipe(&html, url)
    }
}

/// Read a recipe out of an HTML page, trying JSON-LD before microdata
pub fn extract_recipe(html: &str, url: &str) -> Result<ScrapedRecipe, LeafletError> {
    let context = ParsingContext {
        url: url.to_string(),
        document: Html::parse_document(html),
    };

    let extractors: Vec<Box<dyn Extractor>> =
        vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)];

    for extractor in extractors {
        match extractor.parse(&context) {
            Ok(recipe) => return Ok(recipe),
            Err(e) => debug!("Extractor failed for {}: {}", url, e),
        }
    }

    Err(LeafletError::UnsupportedSource {
        domain: domain_of(url),
    })
}

/// Host part of a URL, or the URL itself when it cannot be parsed
pub fn domain_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("https://www.bbcgoodfood.com/recipes/soup"), "www.bbcgoodfood.com");
        assert_eq!(domain_of("not a url"), "not a url");
    }

    #[test]
    fn test_unsupported_page() {
        let result = extract_recipe("<html><body>Hello</body></html>", "https://example.org/x");
        match result {
            Err(LeafletError::UnsupportedSource { domain }) => assert_eq!(domain, "example.org"),
            other => panic!("expected UnsupportedSource, got {other:?}"),
        }
    }

    #[test]
    fn test_falls_back_to_microdata() {
        let html = r#"
            <html><body>
            <div itemscope itemtype="http://schema.org/Recipe">
                <span itemprop="name">Toast</span>
                <span itemprop="recipeIngredient">1 slice bread</span>
                <p itemprop="recipeInstructions">Toast the bread.</p>
            </div>
            </body></html>
        "#;
        let recipe = extract_recipe(html, "https://example.org/toast").unwrap();
        assert_eq!(recipe.title, "Toast");
        assert_eq!(recipe.instructions, "Toast the bread.");
    }
}
