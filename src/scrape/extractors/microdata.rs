use super::{Extractor, ParsingContext};
use crate::model::ScrapedRecipe;
use crate::scrape::duration::duration_minutes;
use log::debug;
use scraper::{ElementRef, Html, Selector};

pub struct MicroDataExtractor;

fn selector(css: &str) -> Result<Selector, Box<dyn std::error::Error>> {
    Selector::parse(css).map_err(|e| format!("Invalid selector '{css}': {e:?}").into())
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // Look for elements with itemscope and itemtype containing "Recipe"
        let selector = selector("[itemscope]").ok()?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Value of the first matching itemprop, preferring `content` and `datetime` attributes
    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = selector(&format!("[itemprop='{prop}']")).ok()?;
        let el = root.select(&selector).next()?;
        let value = el
            .value()
            .attr("content")
            .or_else(|| el.value().attr("datetime"))
            .or_else(|| el.value().attr("src"))
            .map(str::to_string)
            .unwrap_or_else(|| element_text(el));
        (!value.is_empty()).then_some(value)
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let Ok(selector) = selector(&format!("[itemprop='{prop}']")) else {
            return Vec::new();
        };
        root.select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(
        &self,
        context: &ParsingContext,
    ) -> Result<ScrapedRecipe, Box<dyn std::error::Error>> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Unscoped itemprop lookups pick up unrelated page content, so a Recipe
        // container is required.
        let container = self
            .find_recipe_container(&context.document)
            .ok_or("No MicroData Recipe container found")?;

        let title = self
            .get_itemprop(container, "name")
            .ok_or("Could not extract recipe name")?;

        let image = self.get_itemprop(container, "image").unwrap_or_default();

        let total_time = self
            .get_itemprop(container, "totalTime")
            .and_then(|t| duration_minutes(&t))
            .unwrap_or(0);

        // Try 'recipeIngredient' and the older 'ingredients'
        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients");
        }

        let mut steps = self.get_itemprop_list(container, "recipeInstructions");
        if steps.is_empty() {
            steps = self.get_itemprop_list(container, "instructions");
        }

        if ingredients.is_empty() && steps.is_empty() {
            return Err("Could not extract recipe content".into());
        }

        Ok(ScrapedRecipe {
            title,
            link: context.url.clone(),
            total_time,
            image,
            instructions: steps.join("\n"),
            ingredients,
        })
    }
}
