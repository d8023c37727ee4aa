//! Instruction annotation
//!
//! Turns prose instructions into Cooklang by rewriting the first mention of
//! every ingredient as `@name{quantity%unit}` and every duration as
//! `~{amount%unit}`.
//!
//! Timers are rewritten once over the whole text. Ingredients are then folded
//! over in order, each step searching the text produced by the step before it,
//! so an earlier ingredient can claim a mention a later one would also match.
//!
//! The `@` guard only looks one character back. A later ingredient can still
//! match a word inside an earlier multi-word token (for example "sugar" inside
//! `@brown sugar{}`).

pub mod candidates;
pub mod diagnostics;
pub mod matcher;
pub mod timer;
pub mod token;

use crate::ingredients::{normalize, NormalizedIngredient};
use crate::model::Ingredient;
use log::{debug, warn};

pub use candidates::{candidates, Candidate, STOP_WORDS};
pub use diagnostics::{report, Diagnostic, Excerpt};
pub use matcher::{Mention, MentionPattern};
pub use timer::annotate_timers;
pub use token::{splice, IngredientToken};

/// Annotated instructions plus one diagnostic per ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub instructions: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Annotation {
    pub fn matched_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_match()).count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_match())
    }
}

/// The outcome of annotating a single ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub text: String,
    pub diagnostic: Diagnostic,
}

/// Annotate timers, then every ingredient in order, then double the newlines
pub fn annotate(instructions: &str, ingredients: &[Ingredient]) -> Annotation {
    let timed = annotate_timers(instructions);

    let (text, diagnostics) = ingredients.iter().fold(
        (timed, Vec::with_capacity(ingredients.len())),
        |(text, mut diagnostics), ingredient| {
            let step = annotate_ingredient(text, ingredient);
            diagnostics.push(step.diagnostic);
            (step.text, diagnostics)
        },
    );

    Annotation {
        instructions: double_newlines(&text),
        diagnostics,
    }
}

/// Find and replace the first mention of one ingredient
///
/// The text is returned unchanged when the ingredient is not mentioned.
pub fn annotate_ingredient(text: String, ingredient: &Ingredient) -> Step {
    let normalized = normalize(ingredient);
    let candidates = candidates(&normalized.name);

    let pattern = match MentionPattern::compile(&candidates) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("Could not build a pattern for '{}': {}", normalized.name, e);
            None
        }
    };

    let Some(mention) = pattern.as_ref().and_then(|p| p.find(&text)) else {
        // Reported under the name as parsed, stray characters included
        let diagnostic = Diagnostic::unmatched(token_for(&normalized, &ingredient.name));
        debug!("{}", diagnostic);
        return Step { text, diagnostic };
    };

    let token = IngredientToken::new(
        mention.as_str(&text),
        &normalized.quantity,
        &normalized.unit,
    );
    let diagnostic = Diagnostic::matched(
        token.to_string(),
        Excerpt::around(&text, mention.start, mention.end),
    );
    debug!("{}", diagnostic);

    Step {
        text: splice(&text, &mention, &token),
        diagnostic,
    }
}

fn token_for(ingredient: &NormalizedIngredient, name: &str) -> String {
    IngredientToken::new(name, &ingredient.quantity, &ingredient.unit).to_string()
}

/// Every newline becomes a blank line between paragraphs
pub fn double_newlines(text: &str) -> String {
    text.replace('\n', "\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flour_example() {
        let annotation = annotate("Add the flour and mix.", &[Ingredient::new("flour", 2.0, "cup")]);
        assert_eq!(annotation.instructions, "Add the @flour{2%cup} and mix.");
        assert_eq!(annotation.matched_count(), 1);
        assert_eq!(annotation.diagnostics[0].token, "@flour{2%cup}");
    }

    #[test]
    fn test_unmatched_ingredient_is_reported() {
        let annotation = annotate(
            "Add the flour and mix.",
            &[Ingredient::new("turmeric", 1.0, "teaspoon")],
        );
        assert_eq!(annotation.instructions, "Add the flour and mix.");
        assert_eq!(annotation.unmatched().count(), 1);
        assert_eq!(annotation.diagnostics[0].token, "@turmeric{1%teaspoon}");
        assert!(annotation.diagnostics[0].excerpt.is_none());
    }

    #[test]
    fn test_each_step_sees_previous_replacements() {
        let step = annotate_ingredient(
            "Mix flour, then more flour.".to_string(),
            &Ingredient::new("flour", 1.0, "cup"),
        );
        assert_eq!(step.text, "Mix @flour{1%cup}, then more flour.");

        let step = annotate_ingredient(step.text, &Ingredient::new("plain flour", 50.0, "g"));
        assert_eq!(step.text, "Mix @flour{1%cup}, then more @flour{50%g}.");
    }

    #[test]
    fn test_guard_prevents_rematching_token_name() {
        let annotation = annotate(
            "Add the salt.",
            &[
                Ingredient::new("salt", 1.0, "teaspoon"),
                Ingredient::new("sea salt", 0.0, ""),
            ],
        );
        assert_eq!(annotation.instructions, "Add the @salt{1%teaspoon}.");
        assert!(!annotation.diagnostics[1].is_match());
    }

    #[test]
    fn test_matched_text_keeps_original_case() {
        let annotation = annotate("Eggs first.", &[Ingredient::new("eggs", 3.0, "")]);
        assert_eq!(annotation.instructions, "@Eggs{3} first.");
    }

    #[test]
    fn test_timers_run_before_ingredients() {
        let annotation = annotate(
            "Simmer the stock for 20 minutes.",
            &[Ingredient::new("chicken stock", 500.0, "ml")],
        );
        assert_eq!(
            annotation.instructions,
            "Simmer the @stock{500%ml} for ~{20%minutes}."
        );
    }

    #[test]
    fn test_newlines_are_doubled() {
        let annotation = annotate("Step one.\nStep two.", &[]);
        assert_eq!(annotation.instructions, "Step one.\n\nStep two.");
    }

    #[test]
    fn test_small_amount_in_token() {
        let annotation = annotate("Season with salt.", &[Ingredient::new("salt", 0.0, "pinch")]);
        assert_eq!(annotation.instructions, "Season with @salt{1%pinch}.");
    }

    #[test]
    fn test_unmatched_report_uses_parsed_name() {
        let annotation = annotate("Crumble over the top.", &[Ingredient::new("feta )", 100.0, "g")]);
        assert_eq!(annotation.diagnostics[0].token, "@feta ){100%g}");
        assert!(!annotation.diagnostics[0].is_match());
    }

    #[test]
    fn test_zero_quantity_without_unit() {
        let annotation = annotate("Season with pepper.", &[Ingredient::new("black pepper", 0.0, "")]);
        assert_eq!(annotation.instructions, "Season with @pepper{}.");
    }
}
