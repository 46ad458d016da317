pub use crate::recipe::{Recipe, RecipeError, StepSpec};
pub use crate::value::Value;
