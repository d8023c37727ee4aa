use super::matcher::{Mention, TOKEN_MARKER};
use std::fmt;

/// An ingredient token such as `@flour{2%cup}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientToken<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    pub unit: &'a str,
}

impl<'a> IngredientToken<'a> {
    pub fn new(name: &'a str, quantity: &'a str, unit: &'a str) -> Self {
        Self {
            name,
            quantity,
            unit,
        }
    }

    fn is_zero(&self) -> bool {
        self.quantity == "0"
    }
}

impl fmt::Display for IngredientToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.unit.is_empty() {
            write!(f, "{}{}{{{}%{}}}", TOKEN_MARKER, self.name, self.quantity, self.unit)
        } else if self.is_zero() {
            write!(f, "{}{}{{}}", TOKEN_MARKER, self.name)
        } else {
            write!(f, "{}{}{{{}}}", TOKEN_MARKER, self.name, self.quantity)
        }
    }
}

/// Replace the mention with the token, leaving the rest of the text untouched
///
/// Everything before the mentioned name is kept, guard character included.
pub fn splice(text: &str, mention: &Mention, token: &IngredientToken) -> String {
    let rendered = token.to_string();
    let mut out = String::with_capacity(text.len() + rendered.len());
    out.push_str(&text[..mention.start]);
    out.push_str(&rendered);
    out.push_str(&text[mention.whole_end..]);
    out
}
