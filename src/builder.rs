use std::io::{self, Write};
use std::time::Duration;

use crate::annotate::{report, Diagnostic};
use crate::config::LeafletConfig;
use crate::document::CookDocument;
use crate::model::ScrapedRecipe;
use crate::scrape::{RequestFetcher, WebScraper};
use crate::{import_recipe, render_recipe, LeafletError};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Scrape the recipe from a URL
    Url(String),
    /// Use an already scraped recipe
    Recipe(ScrapedRecipe),
}

/// A rendered document and what happened to each ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafletResult {
    pub document: CookDocument,
    pub diagnostics: Vec<Diagnostic>,
}

impl LeafletResult {
    pub fn matched_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_match()).count()
    }

    /// Write the recipe's title and image, then one entry per ingredient
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Title: {}", self.document.title)?;
        writeln!(out, "Image: {}", self.document.image)?;
        report(&self.diagnostics, out)
    }
}

/// Builder for configuring and running an import
#[derive(Debug, Default)]
pub struct LeafletBuilder {
    source: Option<InputSource>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl LeafletBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use leaflet::Leaflet;
    ///
    /// let builder = Leaflet::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to a recipe that was scraped elsewhere
    ///
    /// No network access happens when building from a recipe.
    ///
    /// # Example
    /// ```
    /// use leaflet::{Leaflet, ScrapedRecipe};
    ///
    /// let recipe = ScrapedRecipe {
    ///     title: "Toast".to_string(),
    ///     instructions: "Toast the bread for 2 minutes.".to_string(),
    ///     ingredients: vec!["1 slice bread".to_string()],
    ///     ..Default::default()
    /// };
    /// let builder = Leaflet::builder().recipe(recipe);
    /// ```
    pub fn recipe(mut self, recipe: ScrapedRecipe) -> Self {
        self.source = Some(InputSource::Recipe(recipe));
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use leaflet::Leaflet;
    /// use std::time::Duration;
    ///
    /// let builder = Leaflet::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the user agent sent when scraping
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build and run the import
    ///
    /// # Errors
    /// Returns `LeafletError` if:
    /// - No input source was specified
    /// - The page cannot be fetched
    /// - No recipe can be read from the page
    /// - The recipe has no instructions
    ///
    /// # Example
    /// ```no_run
    /// # use leaflet::Leaflet;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Leaflet::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// println!("{}", result.document);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<LeafletResult, LeafletError> {
        let source = self.source.ok_or_else(|| {
            LeafletError::BuilderError(
                "No input source specified. Use .url() or .recipe()".to_string(),
            )
        })?;

        match source {
            InputSource::Url(url) => {
                let defaults = LeafletConfig::default();
                let timeout = self.timeout.unwrap_or(defaults.request_timeout());
                let user_agent = self.user_agent.unwrap_or(defaults.user_agent);
                let scraper = WebScraper::new(RequestFetcher::new(Some(timeout), &user_agent)?);
                import_recipe(&scraper, &url).await
            }
            InputSource::Recipe(recipe) => render_recipe(&recipe),
        }
    }
}

/// Main entry point for the builder API
pub struct Leaflet;

impl Leaflet {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use leaflet::Leaflet;
    ///
    /// let builder = Leaflet::builder();
    /// ```
    pub fn builder() -> LeafletBuilder {
        LeafletBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_source() {
        let result = Leaflet::builder().build().await;
        assert!(matches!(result, Err(LeafletError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_build_from_recipe() {
        let recipe = ScrapedRecipe {
            title: "Toast".to_string(),
            link: "https://example.com/toast".to_string(),
            instructions: "Toast the bread for 2 minutes.".to_string(),
            ingredients: vec!["1 slice bread".to_string()],
            ..Default::default()
        };

        let result = Leaflet::builder().recipe(recipe).build().await.unwrap();

        assert_eq!(
            result.document.instructions,
            "Toast the @bread{1%slice} for ~{2%minutes}."
        );
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn test_report() {
        let recipe = ScrapedRecipe {
            title: "Toast".to_string(),
            image: "https://example.com/toast.jpg".to_string(),
            instructions: "Butter the toast.".to_string(),
            ingredients: vec!["1 tbsp butter".to_string(), "jam".to_string()],
            ..Default::default()
        };
        let result = render_recipe(&recipe).unwrap();

        let mut out = Vec::new();
        result.report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Title: Toast\n\
             Image: https://example.com/toast.jpg\n\
             \n\
             ✅ @Butter{1%tablespoon}\n\
             ... Butter the toast. ...\n\
             \x20   ^^^^^^\n\
             \n\
             ❌ @jam{}\n"
        );
    }

    #[tokio::test]
    async fn test_default_user_agent_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/toast")
            .match_header("user-agent", LeafletConfig::default().user_agent.as_str())
            .with_status(200)
            .with_body("<html><body>No recipe</body></html>")
            .create_async()
            .await;

        let result = Leaflet::builder()
            .url(format!("{}/toast", server.url()))
            .build()
            .await;

        assert!(matches!(result, Err(LeafletError::UnsupportedSource { .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_user_agent() {
        let result = Leaflet::builder()
            .url("https://example.com/recipe")
            .user_agent("bad\nagent")
            .build()
            .await;
        assert!(matches!(result, Err(LeafletError::HeaderError(_))));
    }
}
