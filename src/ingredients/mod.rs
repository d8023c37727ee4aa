mod normalize;
mod parser;

pub use normalize::{
    format_quantity, is_small_amount_unit, normalize, NormalizedIngredient, SMALL_AMOUNT_UNITS,
};
pub use parser::parse_ingredient;
