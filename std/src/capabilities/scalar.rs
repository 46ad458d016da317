use super::{Args, Table};
use crate::value::Value;
use piper_core::PipeResult;

pub static NIL: Table<()> = &[("to_a", nil_to_a), ("to_i", nil_to_i), ("to_f", nil_to_f)];

pub static BOOL: Table<bool> = &[("&", bool_and), ("|", bool_or), ("^", bool_xor)];

fn nil_to_a(_: (), args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::List(Vec::new()))
}

fn nil_to_i(_: (), args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Int(0))
}

fn nil_to_f(_: (), args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Float(0.0))
}

fn other_truthy(args: &Args) -> PipeResult<bool> {
    args.exactly(1)?;
    Ok(args.get(0).is_some_and(Value::is_truthy))
}

fn bool_and(b: bool, args: Args) -> PipeResult<Value> {
    let other = other_truthy(&args)?;
    Ok(Value::Bool(b && other))
}

fn bool_or(b: bool, args: Args) -> PipeResult<Value> {
    let other = other_truthy(&args)?;
    Ok(Value::Bool(b || other))
}

fn bool_xor(b: bool, args: Args) -> PipeResult<Value> {
    Ok(Value::Bool(b ^ other_truthy(&args)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use piper_core::Receiver;

    #[test]
    fn test_nil_conversions() {
        assert_eq!(Value::Nil.invoke("to_a", vec![], None).unwrap(), Value::List(vec![]));
        assert_eq!(Value::Nil.invoke("to_i", vec![], None).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_bool_operators() {
        let t = Value::Bool(true);
        assert_eq!(t.clone().invoke("&", vec![Value::Nil], None).unwrap(), Value::Bool(false));
        assert_eq!(t.clone().invoke("|", vec![Value::Nil], None).unwrap(), Value::Bool(true));
        assert_eq!(t.invoke("^", vec![Value::Int(1)], None).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_and_checks_arity_even_when_false() {
        let err = Value::Bool(false).invoke("&", vec![], None).unwrap_err();
        assert!(matches!(err, piper_core::PipeError::Arity { .. }));
    }
}
