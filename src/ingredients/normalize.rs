use crate::model::Ingredient;
use regex::Regex;
use std::sync::LazyLock;

/// Units that imply "some" rather than "none" when no amount is given
pub const SMALL_AMOUNT_UNITS: [&str; 6] = ["dash", "pinch", "sprinkle", "smidgen", "drop", "bunch"];

static STRAY_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\)").unwrap());

/// An ingredient ready to be written into a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIngredient {
    pub name: String,
    /// Display form of the quantity, e.g. "2", "0.5", "0.33"
    pub quantity: String,
    pub unit: String,
}

/// Repair the name and render the quantity for display
///
/// This never fails: whatever the parser produced is passed through with
/// best-effort fixes.
pub fn normalize(ingredient: &Ingredient) -> NormalizedIngredient {
    let name = STRAY_PAREN.replace_all(&ingredient.name, "").trim().to_string();
    let unit = ingredient.unit.trim().to_string();

    let mut quantity = format_quantity(ingredient.quantity);
    if quantity == "0" && is_small_amount_unit(&unit) {
        quantity = "1".to_string();
    }

    NormalizedIngredient {
        name,
        quantity,
        unit,
    }
}

pub fn is_small_amount_unit(unit: &str) -> bool {
    SMALL_AMOUNT_UNITS
        .iter()
        .any(|small| small.eq_ignore_ascii_case(unit))
}

/// Whole numbers lose their fractional part, then anything longer than five
/// characters is cut to two decimal places
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() || quantity <= 0.0 {
        return "0".to_string();
    }
    let rendered = if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        quantity.to_string()
    };
    if rendered.len() > 5 {
        format!("{quantity:.2}")
    } else {
        rendered
    }
}
