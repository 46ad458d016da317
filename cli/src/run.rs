//! `piper run`: build a recipe from flags and execute it

use anyhow::{Context, Result};
use piper_core::PiperConfig;
use piper_std::{Recipe, StepSpec, Value};

pub struct RunRequest {
    pub steps: Vec<String>,
    pub seed: Option<String>,
    pub recipe: Option<String>,
    pub config: Option<String>,
}

/// JSON when it parses, plain text otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

/// Parse one command-line step.
pub fn parse_step(raw: &str) -> Result<StepSpec> {
    if raw.trim_start().starts_with('[') {
        let parts: Vec<Value> =
            serde_json::from_str(raw).with_context(|| format!("invalid JSON step `{}`", raw))?;
        return Ok(StepSpec::Call(parts));
    }

    match raw.split_once(':') {
        None => Ok(StepSpec::Name(raw.to_string())),
        Some((name, "")) => Ok(StepSpec::Call(vec![Value::from(name)])),
        Some((name, args)) => {
            let mut parts = vec![Value::from(name)];
            parts.extend(args.split(',').map(parse_value));
            Ok(StepSpec::Call(parts))
        }
    }
}

pub fn run_pipeline(request: &RunRequest) -> Result<Value> {
    let mut recipe = match &request.recipe {
        Some(path) => Recipe::load(path).with_context(|| format!("loading recipe {}", path))?,
        None => Recipe::default(),
    };

    if let Some(path) = &request.config {
        recipe.pipe = PiperConfig::load(path).with_context(|| format!("loading config {}", path))?;
    }

    for raw in &request.steps {
        recipe.push(parse_step(raw)?);
    }

    let seed = request.seed.as_deref().map(parse_value);
    tracing::debug!(steps = recipe.steps.len(), "starting pipeline");
    recipe.run(seed).context("pipeline failed")
}

pub fn render(value: &Value, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn request(seed: &str, steps: &[&str]) -> RunRequest {
        RunRequest {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            seed: Some(seed.to_string()),
            recipe: None,
            config: None,
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("41"), Value::Int(41));
        assert_eq!(parse_value("hello"), Value::from("hello"));
        assert_eq!(parse_value("\"41\""), Value::from("41"));
        assert_eq!(parse_value("[1, \"a\"]"), Value::from(vec![Value::Int(1), Value::from("a")]));
    }

    #[test]
    fn test_parse_step_forms() {
        assert_eq!(parse_step("upcase").unwrap(), StepSpec::Name("upcase".into()));
        assert_eq!(
            parse_step("concat:el,lo").unwrap(),
            StepSpec::Call(vec![Value::from("concat"), Value::from("el"), Value::from("lo")])
        );
        assert_eq!(
            parse_step(r#"["join", ", "]"#).unwrap(),
            StepSpec::Call(vec![Value::from("join"), Value::from(", ")])
        );
        assert!(parse_step("[oops").is_err());
    }

    #[test]
    fn test_run_steps() {
        let value = run_pipeline(&request("h", &["upcase", "concat:el,lo"])).unwrap();
        assert_eq!(render(&value, false).unwrap(), "Hello");

        let value = run_pipeline(&request("Pied Piper", &["split", "reverse"])).unwrap();
        assert_eq!(render(&value, true).unwrap(), r#"["Piper","Pied"]"#);
    }

    #[test]
    fn test_run_recipe_then_cli_steps() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "seed = 20\nsteps = [[\"*\", 2]]").unwrap();

        let request = RunRequest {
            steps: vec!["+:2".to_string()],
            seed: None,
            recipe: Some(file.path().display().to_string()),
            config: None,
        };
        assert_eq!(run_pipeline(&request).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_failures_carry_context() {
        let err = run_pipeline(&request("h", &["nonexistent"])).unwrap_err();
        assert_eq!(err.to_string(), "pipeline failed");
        assert!(format!("{:#}", err).contains("undefined capability `nonexistent` for Text"));
    }
}
