//! Ingredient line parsing
//!
//! Splits a raw scraped line such as `"2 1/2 cups plain flour, sifted"` into a
//! quantity, a unit and a name. The parser is deliberately forgiving: every
//! line yields an [`Ingredient`], falling back to the whole line as the name.
//!
//! ## Supported quantity formats
//!
//! - Integers and decimals: "2", "1.5"
//! - Fractions and mixed numbers: "1/2", "2 1/4"
//! - Unicode fractions: "½", "1½"
//! - Ranges: "2-3", "2 to 3" (the lower bound is kept)
//! - Articles: "a pinch", "an egg"

use crate::model::Ingredient;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static PARENTHESISED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^()]*\)").unwrap());

static GLUED_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:\.\d+)?)([a-zA-Z]+)\b").unwrap());

static NUMBER_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?|\d+/\d+)(?:-|–)(\d+(?:\.\d+)?|\d+/\d+)$").unwrap()
});

const VULGAR_FRACTIONS: [(char, &str); 15] = [
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Canonical unit name followed by the spellings that map to it
const UNIT_ALIASES: &[(&str, &[&str])] = &[
    ("cup", &["cup", "cups", "c"]),
    ("tablespoon", &["tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbl"]),
    ("teaspoon", &["teaspoon", "teaspoons", "tsp", "tsps"]),
    ("fluid ounce", &["fl oz", "fluid ounce", "fluid ounces"]),
    ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]),
    ("litre", &["l", "liter", "liters", "litre", "litres"]),
    ("pint", &["pint", "pints", "pt"]),
    ("quart", &["quart", "quarts", "qt"]),
    ("gallon", &["gallon", "gallons", "gal"]),
    ("mg", &["mg", "milligram", "milligrams"]),
    ("g", &["g", "gr", "gram", "grams", "gramme", "grammes"]),
    ("kg", &["kg", "kilogram", "kilograms", "kilo", "kilos"]),
    ("ounce", &["oz", "ounce", "ounces"]),
    ("pound", &["lb", "lbs", "pound", "pounds"]),
    ("clove", &["clove", "cloves"]),
    ("can", &["can", "cans", "tin", "tins"]),
    ("package", &["package", "packages", "pack", "packs", "packet", "packets"]),
    ("slice", &["slice", "slices"]),
    ("piece", &["piece", "pieces"]),
    ("stick", &["stick", "sticks"]),
    ("sprig", &["sprig", "sprigs"]),
    ("handful", &["handful", "handfuls"]),
    ("head", &["head", "heads"]),
    ("bunch", &["bunch", "bunches"]),
    ("dash", &["dash", "dashes"]),
    ("pinch", &["pinch", "pinches"]),
    ("sprinkle", &["sprinkle", "sprinkles"]),
    ("smidgen", &["smidgen", "smidgens"]),
    ("drop", &["drop", "drops"]),
];

static UNITS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    UNIT_ALIASES
        .iter()
        .flat_map(|(canonical, aliases)| aliases.iter().map(move |alias| (*alias, *canonical)))
        .collect()
});

/// Parse a raw ingredient line into name, quantity and unit
///
/// Periods are dropped unless they sit between two digits, text after the
/// first comma and complete parenthesised groups are discarded, and a missing
/// quantity becomes 0.
pub fn parse_ingredient(line: &str) -> Ingredient {
    let cleaned = strip_periods(line);
    let without_notes = PARENTHESISED.replace_all(&cleaned, " ");
    let head = without_notes
        .split(',')
        .next()
        .unwrap_or_default()
        .to_string();
    let expanded = split_glued_units(&expand_vulgar_fractions(&head));
    let words: Vec<&str> = expanded.split_whitespace().collect();

    let (quantity, rest) = take_quantity(&words);
    let (unit, rest) = take_unit(rest);
    let rest = match rest.first() {
        Some(word) if word.eq_ignore_ascii_case("of") => &rest[1..],
        _ => rest,
    };

    let mut name = rest.join(" ");
    if name.is_empty() {
        name = cleaned.trim().to_string();
    }

    Ingredient {
        name,
        quantity: quantity.unwrap_or(0.0),
        unit: unit.unwrap_or_default().to_string(),
    }
}

/// Remove periods that are not a decimal separator
fn strip_periods(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            if **c != '.' {
                return true;
            }
            let before = i.checked_sub(1).and_then(|p| chars.get(p));
            let after = chars.get(i + 1);
            matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
        })
        .map(|(_, c)| *c)
        .collect()
}

/// "1½" becomes "1 1/2" so the fraction is its own word
fn expand_vulgar_fractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match VULGAR_FRACTIONS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, ascii)) => {
                out.push(' ');
                out.push_str(ascii);
                out.push(' ');
            }
            None => out.push(c),
        }
    }
    out
}

/// "400g" becomes "400 g" when the suffix is a known unit
fn split_glued_units(text: &str) -> String {
    GLUED_UNIT
        .replace_all(text, |caps: &regex::Captures| match lookup_unit(&caps[2]) {
            Some(_) => format!("{} {}", &caps[1], &caps[2]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn parse_number(word: &str) -> Option<f64> {
    if let Some((num, den)) = word.split_once('/') {
        let num: u32 = num.parse().ok()?;
        let den: u32 = den.parse().ok()?;
        if den == 0 {
            return None;
        }
        return Some(num as f64 / den as f64);
    }
    if !word.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    word.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn is_fraction(word: &str) -> bool {
    word.contains('/') && parse_number(word).is_some()
}

/// Consume a leading quantity, returning it with the remaining words
fn take_quantity<'a, 'b>(words: &'b [&'a str]) -> (Option<f64>, &'b [&'a str]) {
    let Some(first) = words.first() else {
        return (None, words);
    };

    if first.eq_ignore_ascii_case("a") || first.eq_ignore_ascii_case("an") {
        return (Some(1.0), &words[1..]);
    }

    if let Some(caps) = NUMBER_RANGE.captures(first) {
        return (parse_number(&caps[1]), &words[1..]);
    }

    let Some(mut value) = parse_number(first) else {
        return (None, words);
    };
    let mut consumed = 1;

    // Mixed number such as "2 1/4"
    if !first.contains('/') {
        if let Some(next) = words.get(1) {
            if is_fraction(next) {
                value += parse_number(next).unwrap_or(0.0);
                consumed = 2;
            }
        }
    }

    // Worded or spaced range such as "2 to 3" or "2 - 3": keep the lower bound
    if let (Some(sep), Some(upper)) = (words.get(consumed), words.get(consumed + 1)) {
        let is_separator = sep.eq_ignore_ascii_case("to") || *sep == "-" || *sep == "–";
        if is_separator && parse_number(upper).is_some() {
            consumed += 2;
        }
    }

    (Some(value), &words[consumed..])
}

fn lookup_unit(word: &str) -> Option<&'static str> {
    let key = word
        .trim_matches(|c: char| !c.is_alphanumeric() && c != ' ')
        .to_lowercase();
    UNITS.get(key.as_str()).copied()
}

/// Consume a leading unit, trying two-word units such as "fl oz" first
fn take_unit<'a, 'b>(words: &'b [&'a str]) -> (Option<&'static str>, &'b [&'a str]) {
    if words.len() >= 3 {
        if let Some(unit) = lookup_unit(&format!("{} {}", words[0], words[1])) {
            return (Some(unit), &words[2..]);
        }
    }
    // A lone unit word is the name, as in "2 cloves"
    if words.len() >= 2 {
        if let Some(unit) = lookup_unit(words[0]) {
            return (Some(unit), &words[1..]);
        }
    }
    (None, words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let ingredient = parse_ingredient("2 cups flour");
        assert_eq!(ingredient, Ingredient::new("flour", 2.0, "cup"));
    }

    #[test]
    fn test_no_quantity() {
        let ingredient = parse_ingredient("salt");
        assert_eq!(ingredient.name, "salt");
        assert_eq!(ingredient.quantity, 0.0);
        assert_eq!(ingredient.unit, "");
    }

    #[test]
    fn test_count_without_unit() {
        let ingredient = parse_ingredient("3 eggs");
        assert_eq!(ingredient, Ingredient::new("eggs", 3.0, ""));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse_ingredient("1/2 tsp salt").quantity, 0.5);
        assert_eq!(parse_ingredient("2 1/4 cups milk").quantity, 2.25);
        assert_eq!(parse_ingredient("½ tsp salt").quantity, 0.5);
        assert_eq!(parse_ingredient("1½ cups milk").quantity, 1.5);
        assert!((parse_ingredient("1/3 cup oil").quantity - 0.3333).abs() < 0.001);
    }

    #[test]
    fn test_decimal_survives_period_stripping() {
        let ingredient = parse_ingredient("1.5 tbsp. olive oil.");
        assert_eq!(ingredient, Ingredient::new("olive oil", 1.5, "tablespoon"));
    }

    #[test]
    fn test_ranges_keep_lower_bound() {
        assert_eq!(parse_ingredient("2-3 cloves garlic").quantity, 2.0);
        assert_eq!(parse_ingredient("2 to 3 cloves garlic").quantity, 2.0);
        assert_eq!(parse_ingredient("2 to 3 cloves garlic").unit, "clove");
    }

    #[test]
    fn test_article_and_of() {
        let ingredient = parse_ingredient("a pinch of salt");
        assert_eq!(ingredient, Ingredient::new("salt", 1.0, "pinch"));
    }

    #[test]
    fn test_small_amount_without_quantity() {
        let ingredient = parse_ingredient("pinch of nutmeg");
        assert_eq!(ingredient, Ingredient::new("nutmeg", 0.0, "pinch"));
    }

    #[test]
    fn test_comment_and_parentheses_dropped() {
        let ingredient = parse_ingredient("400g can (about 14 oz) chopped tomatoes, drained");
        assert_eq!(ingredient.quantity, 400.0);
        assert_eq!(ingredient.name, "can chopped tomatoes");

        let ingredient = parse_ingredient("1 onion (finely chopped), peeled");
        assert_eq!(ingredient.name, "onion");
    }

    #[test]
    fn test_stray_parenthesis_is_kept_for_normalizer() {
        let ingredient = parse_ingredient("100g feta (crumbled");
        assert_eq!(ingredient.name, "feta (crumbled");
        let ingredient = parse_ingredient("100g feta crumbled)");
        assert_eq!(ingredient.name, "feta crumbled)");
    }

    #[test]
    fn test_two_word_unit() {
        let ingredient = parse_ingredient("4 fl oz double cream");
        assert_eq!(ingredient, Ingredient::new("double cream", 4.0, "fluid ounce"));
    }

    #[test]
    fn test_unit_alone_is_a_name() {
        let ingredient = parse_ingredient("2 cloves");
        assert_eq!(ingredient, Ingredient::new("cloves", 2.0, ""));
    }

    #[test]
    fn test_quantity_only_falls_back_to_line() {
        let ingredient = parse_ingredient("2");
        assert_eq!(ingredient.name, "2");
        assert_eq!(ingredient.quantity, 2.0);
    }
}
