//! Capability tables for [`Value`].
//!
//! Every capability a value exposes is listed in exactly one static table:
//! a `common` table shared by all kinds, then one table per kind. Lookup is
//! a linear scan, common first, so the tables double as documentation.

pub mod common;
pub mod list;
pub mod number;
pub mod scalar;
pub mod text;

use crate::value::Value;
use piper_core::{Callback, PipeError, PipeResult, Receiver};

/// Handler for one capability on receiver type `R`.
pub type Handler<R> = fn(R, Args) -> PipeResult<Value>;

/// A capability table: names paired with handlers.
pub type Table<R> = &'static [(&'static str, Handler<R>)];

fn find<R>(table: Table<R>, name: &str) -> Option<Handler<R>> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, handler)| *handler)
}

fn names<R>(table: Table<R>) -> impl Iterator<Item = &'static str> {
    table.iter().map(|(name, _)| *name)
}

fn dispatch<R>(table: Table<R>, kind: &str, receiver: R, args: Args) -> PipeResult<Value> {
    match find(table, &args.name) {
        Some(handler) => handler(receiver, args),
        None => Err(PipeError::no_such_capability(kind, args.name)),
    }
}

/// Arguments handed to a capability handler.
pub struct Args {
    name: String,
    values: Vec<Value>,
    block: Option<Callback<Value>>,
}

impl Args {
    pub fn new(name: impl Into<String>, values: Vec<Value>, block: Option<Callback<Value>>) -> Self {
        Self {
            name: name.into(),
            values,
            block,
        }
    }

    /// The capability being invoked.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    fn arity_error(&self, expected: impl Into<String>) -> PipeError {
        PipeError::Arity {
            name: self.name.clone(),
            given: self.values.len(),
            expected: expected.into(),
        }
    }

    pub fn none(&self) -> PipeResult<()> {
        self.exactly(0)
    }

    pub fn exactly(&self, n: usize) -> PipeResult<()> {
        if self.values.len() == n {
            Ok(())
        } else {
            Err(self.arity_error(n.to_string()))
        }
    }

    pub fn at_most(&self, n: usize) -> PipeResult<()> {
        if self.values.len() <= n {
            Ok(())
        } else {
            Err(self.arity_error(format!("0..{}", n)))
        }
    }

    pub fn type_error(&self, expected: &'static str, got: &Value) -> PipeError {
        PipeError::ArgumentType {
            name: self.name.clone(),
            expected,
            got: got.kind().to_string(),
        }
    }

    pub fn text(&self, index: usize) -> PipeResult<&str> {
        match self.values.get(index) {
            Some(Value::Text(s)) => Ok(s.as_str()),
            Some(other) => Err(self.type_error("Text", other)),
            None => Err(self.arity_error(format!("{}+", index + 1))),
        }
    }

    pub fn int(&self, index: usize) -> PipeResult<i64> {
        match self.values.get(index) {
            Some(Value::Int(n)) => Ok(*n),
            Some(other) => Err(self.type_error("Int", other)),
            None => Err(self.arity_error(format!("{}+", index + 1))),
        }
    }

    /// A non-negative count, as used by `take`, `drop` and `*`.
    pub fn count(&self, index: usize) -> PipeResult<usize> {
        let n = self.int(index)?;
        usize::try_from(n).map_err(|_| PipeError::failed(&self.name, "negative argument"))
    }

    pub fn block(&self) -> PipeResult<&Callback<Value>> {
        self.block.as_ref().ok_or_else(|| PipeError::MissingBlock {
            name: self.name.clone(),
        })
    }

    /// Invoke the callback on one element.
    pub fn yield_one(&self, item: Value) -> PipeResult<Value> {
        let block = self.block()?;
        block(item, Vec::new())
    }
}

impl Value {
    /// Names of every capability this value responds to.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let own: Vec<&'static str> = match self {
            Value::Nil => names(scalar::NIL).collect(),
            Value::Bool(_) => names(scalar::BOOL).collect(),
            Value::Int(_) => names(number::INT).collect(),
            Value::Float(_) => names(number::FLOAT).collect(),
            Value::Text(_) => names(text::CAPABILITIES).collect(),
            Value::List(_) => names(list::CAPABILITIES).collect(),
        };
        names(common::CAPABILITIES).chain(own).collect()
    }
}

impl Receiver for Value {
    fn receiver_name(&self) -> String {
        self.kind().to_string()
    }

    fn responds_to(&self, name: &str) -> bool {
        if find(common::CAPABILITIES, name).is_some() {
            return true;
        }
        match self {
            Value::Nil => find(scalar::NIL, name).is_some(),
            Value::Bool(_) => find(scalar::BOOL, name).is_some(),
            Value::Int(_) => find(number::INT, name).is_some(),
            Value::Float(_) => find(number::FLOAT, name).is_some(),
            Value::Text(_) => find(text::CAPABILITIES, name).is_some(),
            Value::List(_) => find(list::CAPABILITIES, name).is_some(),
        }
    }

    fn invoke(self, name: &str, args: Vec<Value>, block: Option<Callback<Value>>) -> PipeResult<Value> {
        let args = Args::new(name, args, block);
        if let Some(handler) = find(common::CAPABILITIES, name) {
            return handler(self, args);
        }
        let kind = self.kind();
        match self {
            Value::Nil => dispatch(scalar::NIL, kind, (), args),
            Value::Bool(b) => dispatch(scalar::BOOL, kind, b, args),
            Value::Int(n) => dispatch(number::INT, kind, n, args),
            Value::Float(x) => dispatch(number::FLOAT, kind, x, args),
            Value::Text(s) => dispatch(text::CAPABILITIES, kind, s, args),
            Value::List(items) => dispatch(list::CAPABILITIES, kind, items, args),
        }
    }
}
