use super::{Extractor, ParsingContext};
use crate::model::ScrapedRecipe;
use crate::scrape::duration::duration_minutes;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe, url: &str) -> ScrapedRecipe {
        let total_time = json_ld_recipe
            .total_time
            .as_deref()
            .and_then(duration_minutes)
            .or_else(|| {
                let prep = json_ld_recipe.prep_time.as_deref().and_then(duration_minutes);
                let cook = json_ld_recipe.cook_time.as_deref().and_then(duration_minutes);
                match (prep, cook) {
                    (None, None) => None,
                    (prep, cook) => Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
                }
            })
            .unwrap_or(0);

        // Use the first image if multiple are available
        let image = match json_ld_recipe.image {
            Some(ImageType::String(i)) => decode_html_symbols(&i),
            Some(ImageType::MultipleStrings(imgs)) => imgs
                .first()
                .map(|i| decode_html_symbols(i))
                .unwrap_or_default(),
            Some(ImageType::Object(i)) => i.url,
            Some(ImageType::MultipleObjects(imgs)) => {
                imgs.into_iter().next().map(|i| i.url).unwrap_or_default()
            }
            Some(ImageType::None) | None => String::new(),
        };

        let ingredients = match json_ld_recipe.recipe_ingredient {
            Some(RecipeIngredients::Strings(ingredients)) => ingredients
                .into_iter()
                .filter(|ing| !ing.trim().is_empty())
                .map(|ing| decode_html_symbols(ing.trim()))
                .collect(),
            Some(RecipeIngredients::Objects(ingredients)) => ingredients
                .into_iter()
                .filter(|ing| !ing.name.trim().is_empty())
                .map(|ing| {
                    let amount = ing.amount.as_deref().unwrap_or("").trim();
                    let name = decode_html_symbols(&ing.name);
                    if amount.is_empty() {
                        name
                    } else {
                        format!("{amount} {name}")
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let steps: Vec<String> = match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::String(instructions)) => vec![instructions],
            Some(RecipeInstructions::Multiple(instructions)) => instructions,
            Some(RecipeInstructions::MultipleObject(instructions)) => {
                instructions.into_iter().map(|obj| obj.text).collect()
            }
            Some(RecipeInstructions::HowTo(sections)) => {
                sections.into_iter().flat_map(howto_texts).collect()
            }
            Some(RecipeInstructions::NestedSections(sections)) => sections
                .into_iter()
                .flatten()
                .flat_map(howto_texts)
                .collect(),
            None => Vec::new(),
        };

        // One step per line
        let instructions = steps
            .iter()
            .map(|step| decode_html_symbols(step.trim()))
            .filter(|step| !step.is_empty())
            .collect::<Vec<String>>()
            .join("\n");

        ScrapedRecipe {
            title: decode_html_symbols(json_ld_recipe.name.trim()),
            link: url.to_string(),
            total_time,
            image,
            instructions,
            ingredients,
        }
    }
}

fn step_texts(step: HowToStep) -> Vec<String> {
    let mut texts = Vec::new();
    // Prefer text over name
    if let Some(text) = step.text {
        texts.push(text);
    } else if let Some(name) = step.name {
        texts.push(name);
    }
    if let Some(desc) = step.description {
        texts.push(desc);
    }
    texts
}

fn howto_texts(howto: HowTo) -> Vec<String> {
    match howto {
        HowTo::HowToStep(step) => step_texts(step),
        HowTo::HowToSection(section) => section
            .item_list_element
            .into_iter()
            .flat_map(step_texts)
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    total_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    None,
    String(String),
    Object(ImageObject),
    // potentially multiple images as objects
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
struct RecipeInstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    Objects(Vec<IngredientObject>),
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<RecipeInstructionObject>),
    HowTo(Vec<HowTo>),
    NestedSections(Vec<Vec<HowTo>>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        return items
            .iter()
            .find(|item| is_recipe_type(item) || item.get("recipeInstructions").is_some());
    }
    if is_recipe_type(json_ld) {
        return Some(json_ld);
    }
    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|items| items.iter().find(|item| is_recipe_type(item)))
}

impl Extractor for JsonLdExtractor {
    fn parse(
        &self,
        context: &ParsingContext,
    ) -> Result<ScrapedRecipe, Box<dyn std::error::Error>> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| format!("Invalid selector: {e:?}"))?;

        // Try each script element until we find a valid recipe
        for (index, script) in context.document.select(&selector).enumerate() {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json_ld = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };

            match JsonLdRecipe::try_from(recipe) {
                Ok(recipe) => return Ok(self.convert_to_recipe(recipe, &context.url)),
                Err(e) => debug!("JsonLdExtractor: Failed to convert to JsonLdRecipe: {}", e),
            }
        }

        Err("No valid recipe found in any JSON-LD script".into())
    }
}

fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Skip anything before the first object or array
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find(['{', '[']) {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned
        .replace("<!--", "")
        .replace("-->", "")
        .replace(",]", "]")
        .replace(",}", "}")
}
