use super::{Args, Table};
use crate::value::Value;
use piper_core::{PipeError, PipeResult};

pub static INT: Table<i64> = &[
    ("+", int_add),
    ("-", int_sub),
    ("*", int_mul),
    ("/", int_div),
    ("%", int_rem),
    ("abs", int_abs),
    ("succ", int_succ),
    ("pred", int_pred),
    ("zero?", int_is_zero),
    ("even?", int_is_even),
    ("odd?", int_is_odd),
    ("to_i", int_to_i),
    ("to_f", int_to_f),
];

pub static FLOAT: Table<f64> = &[
    ("+", float_add),
    ("-", float_sub),
    ("*", float_mul),
    ("/", float_div),
    ("abs", float_abs),
    ("round", float_round),
    ("floor", float_floor),
    ("ceil", float_ceil),
    ("zero?", float_is_zero),
    ("to_i", float_to_i),
    ("to_f", float_to_f),
];

/// Right-hand operand of an arithmetic capability.
enum Operand {
    Int(i64),
    Float(f64),
}

fn operand(args: &Args) -> PipeResult<Operand> {
    args.exactly(1)?;
    match args.get(0) {
        Some(Value::Int(n)) => Ok(Operand::Int(*n)),
        Some(Value::Float(x)) => Ok(Operand::Float(*x)),
        Some(other) => Err(args.type_error("Int or Float", other)),
        None => Err(PipeError::failed(args.name(), "missing operand")),
    }
}

fn overflow(args: &Args) -> PipeError {
    PipeError::failed(args.name(), "integer overflow")
}

fn int_arith(
    a: i64,
    args: Args,
    checked: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> PipeResult<Value> {
    match operand(&args)? {
        Operand::Int(b) => checked(a, b).map(Value::Int).ok_or_else(|| overflow(&args)),
        Operand::Float(b) => Ok(Value::Float(float(a as f64, b))),
    }
}

fn int_add(a: i64, args: Args) -> PipeResult<Value> {
    int_arith(a, args, i64::checked_add, |x, y| x + y)
}

fn int_sub(a: i64, args: Args) -> PipeResult<Value> {
    int_arith(a, args, i64::checked_sub, |x, y| x - y)
}

fn int_mul(a: i64, args: Args) -> PipeResult<Value> {
    int_arith(a, args, i64::checked_mul, |x, y| x * y)
}

/// Integer division rounds toward negative infinity.
fn int_div(a: i64, args: Args) -> PipeResult<Value> {
    match operand(&args)? {
        Operand::Int(0) => Err(PipeError::failed("/", "divided by 0")),
        Operand::Int(b) => {
            let q = a.checked_div(b).ok_or_else(|| overflow(&args))?;
            let floored = if a % b != 0 && ((a < 0) != (b < 0)) { q - 1 } else { q };
            Ok(Value::Int(floored))
        }
        Operand::Float(b) => Ok(Value::Float(a as f64 / b)),
    }
}

/// The remainder takes the sign of the divisor.
fn int_rem(a: i64, args: Args) -> PipeResult<Value> {
    match operand(&args)? {
        Operand::Int(0) => Err(PipeError::failed("%", "divided by 0")),
        Operand::Int(b) => {
            let r = a.checked_rem(b).ok_or_else(|| overflow(&args))?;
            let adjusted = if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r };
            Ok(Value::Int(adjusted))
        }
        Operand::Float(b) => {
            let r = a as f64 % b;
            let adjusted = if r != 0.0 && ((r < 0.0) != (b < 0.0)) { r + b } else { r };
            Ok(Value::Float(adjusted))
        }
    }
}

fn int_abs(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    a.checked_abs().map(Value::Int).ok_or_else(|| overflow(&args))
}

fn int_succ(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    a.checked_add(1).map(Value::Int).ok_or_else(|| overflow(&args))
}

fn int_pred(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    a.checked_sub(1).map(Value::Int).ok_or_else(|| overflow(&args))
}

fn int_is_zero(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(a == 0))
}

fn int_is_even(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(a % 2 == 0))
}

fn int_is_odd(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(a % 2 != 0))
}

fn int_to_i(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Int(a))
}

fn int_to_f(a: i64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Float(a as f64))
}

fn float_arith(a: f64, args: Args, op: fn(f64, f64) -> f64) -> PipeResult<Value> {
    let b = match operand(&args)? {
        Operand::Int(n) => n as f64,
        Operand::Float(x) => x,
    };
    Ok(Value::Float(op(a, b)))
}

fn float_add(a: f64, args: Args) -> PipeResult<Value> {
    float_arith(a, args, |x, y| x + y)
}

fn float_sub(a: f64, args: Args) -> PipeResult<Value> {
    float_arith(a, args, |x, y| x - y)
}

fn float_mul(a: f64, args: Args) -> PipeResult<Value> {
    float_arith(a, args, |x, y| x * y)
}

fn float_div(a: f64, args: Args) -> PipeResult<Value> {
    float_arith(a, args, |x, y| x / y)
}

fn float_abs(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Float(a.abs()))
}

/// Converts an integral float to `Int`, failing for NaN and infinities.
fn integral(x: f64, args: &Args) -> PipeResult<Value> {
    if x.is_finite() && x >= i64::MIN as f64 && x <= i64::MAX as f64 {
        Ok(Value::Int(x as i64))
    } else {
        Err(PipeError::failed(args.name(), format!("{} out of integer range", x)))
    }
}

fn float_round(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    integral(a.round(), &args)
}

fn float_floor(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    integral(a.floor(), &args)
}

fn float_ceil(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    integral(a.ceil(), &args)
}

fn float_is_zero(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(a == 0.0))
}

fn float_to_i(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    integral(a.trunc(), &args)
}

fn float_to_f(a: f64, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Float(a))
}
