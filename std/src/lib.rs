//! Pied Piper standard library.
//!
//! Provides [`Value`], a dynamic value whose capabilities are listed in
//! explicit tables, and [`Recipe`], pipelines written down as TOML or JSON.

pub mod capabilities;
pub mod prelude;
pub mod recipe;
pub mod value;

pub use capabilities::Args;
pub use recipe::{Recipe, RecipeError, StepSpec};
pub use value::Value;
