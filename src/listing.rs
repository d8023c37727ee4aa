//! Paginated recipe lists
//!
//! A list API answers with a page of item links and the URL of the next page.
//! Every item is imported and written before the next page is requested.

use crate::config::ListingConfig;
use crate::document::OutputTarget;
use crate::error::LeafletError;
use crate::import_recipe;
use crate::scrape::{RecipeSource, RequestFetcher};
use log::{info, warn};
use reqwest::Url;
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// One page of a recipe list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListPage {
    #[serde(rename = "nextUrl", default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    pub url: String,
}

/// Totals for a finished walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub pages: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Walks a list API page by page, importing every recipe it links to
pub struct ListWalker<'a> {
    fetcher: &'a RequestFetcher,
    source: &'a dyn RecipeSource,
    output: OutputTarget,
    page_delay: Duration,
    max_pages: Option<usize>,
    diagnostics: Option<&'a mut dyn Write>,
}

impl<'a> ListWalker<'a> {
    pub fn new(
        fetcher: &'a RequestFetcher,
        source: &'a dyn RecipeSource,
        output: OutputTarget,
    ) -> Self {
        let listing = ListingConfig::default();
        Self {
            fetcher,
            source,
            output,
            page_delay: Duration::from_millis(listing.page_delay_ms),
            max_pages: listing.max_pages,
            diagnostics: None,
        }
    }

    pub fn with_listing(mut self, listing: &ListingConfig) -> Self {
        self.page_delay = Duration::from_millis(listing.page_delay_ms);
        self.max_pages = listing.max_pages;
        self
    }

    /// Report every imported recipe's ingredient matches to `out`
    pub fn with_diagnostics(mut self, out: &'a mut dyn Write) -> Self {
        self.diagnostics = Some(out);
        self
    }

    /// Walk from `list_url` until the list runs out or `max_pages` is reached
    ///
    /// A recipe that cannot be imported is logged and skipped. A page that
    /// cannot be fetched ends the walk with an error.
    pub async fn walk(&mut self, list_url: &str) -> Result<ListingSummary, LeafletError> {
        let mut summary = ListingSummary::default();
        let mut next = Some(list_url.to_string());

        while let Some(page_url) = next.take() {
            if self.max_pages.is_some_and(|max| summary.pages >= max) {
                info!("Stopping after {} pages", summary.pages);
                break;
            }

            let page: ListPage = self.fetcher.fetch_json(&page_url).await?;
            summary.pages += 1;
            info!(
                "Page {}: {} recipes from {}",
                summary.pages,
                page.items.len(),
                page_url
            );

            for item in &page.items {
                match self.import_item(&page_url, &item.url).await {
                    Ok(_) => summary.written += 1,
                    Err(e) if e.is_item_level() => {
                        warn!("Skipping {}: {}", item.url, e);
                        summary.skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            next = match page.next_url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => Some(resolve(&page_url, url)?),
                _ => None,
            };

            if next.is_some() && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        info!(
            "Walked {} pages: {} written, {} skipped",
            summary.pages, summary.written, summary.skipped
        );
        Ok(summary)
    }

    async fn import_item(
        &mut self,
        page_url: &str,
        item_url: &str,
    ) -> Result<Option<PathBuf>, LeafletError> {
        let url = resolve(page_url, item_url)?;
        let result = import_recipe(self.source, &url).await?;
        info!(
            "{}: matched {}/{} ingredients",
            result.document.title,
            result.matched_count(),
            result.diagnostics.len()
        );
        if let Some(out) = self.diagnostics.as_mut() {
            writeln!(out)?;
            result.report(out)?;
        }
        self.output.write(&result.document).await
    }
}

/// Join a possibly relative link onto the page it came from
fn resolve(base: &str, link: &str) -> Result<String, LeafletError> {
    let base = Url::parse(base)
        .map_err(|e| LeafletError::ParseError(format!("Invalid list URL '{base}': {e}")))?;
    base.join(link)
        .map(String::from)
        .map_err(|e| LeafletError::ParseError(format!("Invalid item URL '{link}': {e}")))
}
