//! Recipe - a pipeline written down as data.
//!
//! ```toml
//! seed = "h"
//! steps = ["upcase", ["concat", "el", "lo"]]
//!
//! [pipe]
//! label = "greeting"
//! ```
//!
//! A string step is a capability name; an array step is a capability name
//! followed by its arguments. Callables cannot be expressed as data.

use crate::value::Value;
use piper_core::{Descriptor, EndOfPipe, Pipe, PipeError, PiperConfig, Producer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("failed to read recipe {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML recipe: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON recipe: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
    #[error(transparent)]
    Pipe(#[from] PipeError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSpec {
    Name(String),
    Call(Vec<Value>),
}

impl StepSpec {
    pub fn to_descriptor(&self, index: usize) -> Result<Descriptor<Value>, RecipeError> {
        match self {
            StepSpec::Name(name) if name.is_empty() => Err(RecipeError::InvalidStep {
                index,
                reason: "empty capability name".to_string(),
            }),
            StepSpec::Name(name) => Ok(Descriptor::name(name.as_str())),
            StepSpec::Call(parts) => match parts.split_first() {
                Some((Value::Text(name), args)) if !name.is_empty() => {
                    Ok(Descriptor::call(name.as_str(), args.iter().cloned()))
                }
                Some((other, _)) => Err(RecipeError::InvalidStep {
                    index,
                    reason: format!("expected a capability name, got {}", other.inspect()),
                }),
                None => Err(RecipeError::InvalidStep {
                    index,
                    reason: "empty step".to_string(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub seed: Option<Value>,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
    #[serde(default)]
    pub pipe: PiperConfig,
}

impl Recipe {
    pub fn from_toml_str(source: &str) -> Result<Self, RecipeError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, RecipeError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a recipe file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    pub fn push(&mut self, step: StepSpec) {
        self.steps.push(step);
    }

    pub fn descriptors(&self) -> Result<Vec<Descriptor<Value>>, RecipeError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.to_descriptor(index))
            .collect()
    }

    /// Run every step over `seed`, falling back to the recipe's own seed.
    pub fn run(&self, seed: Option<Value>) -> Result<Value, RecipeError> {
        let descriptors = self.descriptors()?;
        let seed = seed.or_else(|| self.seed.clone());
        tracing::debug!(
            recipe = %self.pipe.label,
            steps = descriptors.len(),
            seeded = seed.is_some(),
            "running recipe"
        );

        let pipe = Pipe::construct(seed, None::<Producer<Value>>)?.with_config(self.pipe.clone());
        Ok(pipe.then_all(descriptors)?.end(EndOfPipe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GREETING: &str = r#"
seed = "h"
steps = ["upcase", ["concat", "el", "lo"], ["+", " world"]]

[pipe]
label = "greeting"
"#;

    #[test]
    fn test_toml_recipe() {
        let recipe = Recipe::from_toml_str(GREETING).unwrap();
        assert_eq!(recipe.pipe.label, "greeting");
        assert_eq!(recipe.steps.len(), 3);
        assert_eq!(recipe.run(None).unwrap(), Value::from("Hello world"));
    }

    #[test]
    fn test_seed_override() {
        let recipe = Recipe::from_toml_str(GREETING).unwrap();
        assert_eq!(
            recipe.run(Some(Value::from("j"))).unwrap(),
            Value::from("Jello world")
        );
    }

    #[test]
    fn test_json_recipe() {
        let recipe = Recipe::from_json_str(
            r#"{"seed": "Pied Piper", "steps": ["split", ["join", "-"], "downcase"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.run(None).unwrap(), Value::from("pied-piper"));
    }

    #[test]
    fn test_missing_seed_is_invalid_construction() {
        let recipe = Recipe::from_toml_str(r#"steps = ["upcase"]"#).unwrap();
        match recipe.run(None).unwrap_err() {
            RecipeError::Pipe(err) => assert!(err.is_invalid_construction()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_steps() {
        let recipe = Recipe::from_toml_str("seed = 1\nsteps = [[2, 3]]").unwrap();
        let err = recipe.run(None).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidStep { index: 0, .. }));

        let recipe = Recipe::from_toml_str("seed = 1\nsteps = [\"succ\", []]").unwrap();
        let err = recipe.run(None).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidStep { index: 1, .. }));
    }

    #[test]
    fn test_capability_failure_surfaces() {
        let recipe = Recipe::from_toml_str("seed = 1\nsteps = [\"upcase\"]").unwrap();
        match recipe.run(None).unwrap_err() {
            RecipeError::Pipe(err) => assert!(err.is_no_such_capability()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"seed": 41, "steps": ["succ"]}}"#).unwrap();
        let recipe = Recipe::load(file.path()).unwrap();
        assert_eq!(recipe.run(None).unwrap(), Value::Int(42));
    }
}
