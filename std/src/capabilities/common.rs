use super::{Args, Table};
use crate::value::Value;
use piper_core::PipeResult;

/// Capabilities every value responds to.
pub static CAPABILITIES: Table<Value> = &[
    ("to_s", to_s),
    ("inspect", inspect),
    ("class", class),
    ("itself", itself),
    ("nil?", is_nil),
    ("!", not),
    ("==", eq),
    ("!=", ne),
];

fn to_s(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(match value {
        Value::Text(s) => Value::Text(s),
        other => Value::Text(other.to_string()),
    })
}

fn inspect(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Text(value.inspect()))
}

fn class(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::from(value.kind()))
}

fn itself(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(value)
}

fn is_nil(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(value.is_nil()))
}

fn not(value: Value, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(!value.is_truthy()))
}

fn eq(value: Value, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(args.get(0) == Some(&value)))
}

fn ne(value: Value, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(args.get(0) != Some(&value)))
}
