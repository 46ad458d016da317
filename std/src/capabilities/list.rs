use super::{Args, Table};
use crate::value::Value;
use piper_core::{PipeError, PipeResult};
use std::cmp::Ordering;

pub static CAPABILITIES: Table<Vec<Value>> = &[
    ("map", map),
    ("collect", map),
    ("select", select),
    ("filter", select),
    ("reject", reject),
    ("join", join),
    ("reverse", reverse),
    ("length", length),
    ("size", length),
    ("first", first),
    ("last", last),
    ("empty?", is_empty),
    ("push", push),
    ("concat", concat),
    ("sort", sort),
    ("uniq", uniq),
    ("compact", compact),
    ("flatten", flatten),
    ("sum", sum),
    ("include?", includes),
    ("take", take),
    ("drop", drop),
];

fn map(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    args.block()?;
    items
        .into_iter()
        .map(|item| args.yield_one(item))
        .collect::<PipeResult<Vec<_>>>()
        .map(Value::List)
}

fn retain_by(items: Vec<Value>, args: &Args, keep: bool) -> PipeResult<Value> {
    args.none()?;
    args.block()?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if args.yield_one(item.clone())?.is_truthy() == keep {
            out.push(item);
        }
    }
    Ok(Value::List(out))
}

fn select(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    retain_by(items, &args, true)
}

fn reject(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    retain_by(items, &args, false)
}

fn join_into(items: &[Value], separator: &str, out: &mut String, first: &mut bool) {
    for item in items {
        match item {
            Value::List(nested) => join_into(nested, separator, out, first),
            other => {
                if !*first {
                    out.push_str(separator);
                }
                *first = false;
                out.push_str(&other.to_string());
            }
        }
    }
}

/// Concatenates the elements' text forms; nested lists are joined in place.
fn join(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.at_most(1)?;
    let separator = match args.get(0) {
        None | Some(Value::Nil) => "",
        Some(_) => args.text(0)?,
    };
    let mut out = String::new();
    join_into(&items, separator, &mut out, &mut true);
    Ok(Value::Text(out))
}

fn reverse(mut items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    items.reverse();
    Ok(Value::List(items))
}

fn length(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Int(items.len() as i64))
}

fn first(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(items.into_iter().next().unwrap_or_default())
}

fn last(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(items.into_iter().next_back().unwrap_or_default())
}

fn is_empty(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::Bool(items.is_empty()))
}

fn push(mut items: Vec<Value>, args: Args) -> PipeResult<Value> {
    items.extend(args.into_values());
    Ok(Value::List(items))
}

fn concat(mut items: Vec<Value>, args: Args) -> PipeResult<Value> {
    for index in 0..args.len() {
        match args.get(index) {
            Some(Value::List(more)) => items.extend(more.iter().cloned()),
            Some(other) => return Err(args.type_error("List", other)),
            None => {}
        }
    }
    Ok(Value::List(items))
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn sort(mut items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    for pair in items.windows(2) {
        if compare(&pair[0], &pair[1]).is_none() {
            return Err(PipeError::failed(
                "sort",
                format!("comparison of {} with {} failed", pair[0].inspect(), pair[1].inspect()),
            ));
        }
    }
    // Every neighbour is comparable, so the kinds are uniform (or mixed numeric).
    items.sort_by(|a, b| compare(a, b).unwrap_or(Ordering::Equal));
    Ok(Value::List(items))
}

fn uniq(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    Ok(Value::List(out))
}

fn compact(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    Ok(Value::List(items.into_iter().filter(|v| !v.is_nil()).collect()))
}

fn flatten_into(items: Vec<Value>, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::List(nested) => flatten_into(nested, out),
            other => out.push(other),
        }
    }
}

fn flatten(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, &mut out);
    Ok(Value::List(out))
}

fn sum(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.none()?;
    let mut total = Value::Int(0);
    for item in items {
        total = match (total, item) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| PipeError::failed("sum", "integer overflow"))?,
            (Value::Int(a), Value::Float(b)) => Value::Float(a as f64 + b),
            (Value::Float(a), Value::Int(b)) => Value::Float(a + b as f64),
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (_, other) => {
                return Err(PipeError::failed(
                    "sum",
                    format!("{} can't be coerced into a number", other.kind()),
                ));
            }
        };
    }
    Ok(total)
}

fn includes(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    Ok(Value::Bool(args.get(0).is_some_and(|needle| items.contains(needle))))
}

fn take(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    let n = args.count(0)?;
    Ok(Value::List(items.into_iter().take(n).collect()))
}

fn drop(items: Vec<Value>, args: Args) -> PipeResult<Value> {
    args.exactly(1)?;
    let n = args.count(0)?;
    Ok(Value::List(items.into_iter().skip(n).collect()))
}
