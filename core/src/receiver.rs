use crate::descriptor::Callback;
use crate::error::{PipeError, PipeResult};
use std::fmt;

/// The contract for values that expose named capabilities.
///
/// `Receiver` is what makes `MethodName` and `MethodCall` descriptors
/// resolvable: the pipe asks `responds_to` first and only then `invoke`s.
/// Values that are only ever piped through callables need not implement it.
pub trait Receiver: Sized {
    /// Human readable kind of this value, used in error messages.
    fn receiver_name(&self) -> String;

    /// Whether a capability called `name` exists for this value.
    fn responds_to(&self, name: &str) -> bool;

    /// Invoke capability `name` with positional `args` and an optional callback.
    fn invoke(self, name: &str, args: Vec<Self>, block: Option<Callback<Self>>) -> PipeResult<Self>;
}

/// Name-based lookup for one receiver type.
pub type Dispatch<T> = fn(T, &str, Vec<T>, Option<Callback<T>>) -> PipeResult<T>;

/// A capability name bound to the lookup of the type it will be sent to.
///
/// Binding happens when the descriptor is built, so the pipe itself never
/// needs `T: Receiver`.
pub struct Method<T> {
    name: String,
    dispatch: Dispatch<T>,
}

impl<T: Receiver> Method<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dispatch: dispatch::<T>,
        }
    }
}

impl<T> Method<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look the capability up on `value` and invoke it.
    pub fn send(&self, value: T, args: Vec<T>, block: Option<Callback<T>>) -> PipeResult<T> {
        (self.dispatch)(value, &self.name, args, block)
    }
}

impl<T> Clone for Method<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            dispatch: self.dispatch,
        }
    }
}

impl<T> fmt::Debug for Method<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.name, f)
    }
}

/// Missing capabilities are reported here and nowhere else.
fn dispatch<T: Receiver>(
    value: T,
    name: &str,
    args: Vec<T>,
    block: Option<Callback<T>>,
) -> PipeResult<T> {
    if !value.responds_to(name) {
        return Err(PipeError::no_such_capability(value.receiver_name(), name));
    }
    tracing::trace!(
        capability = name,
        argc = args.len(),
        block = block.is_some(),
        "invoking capability"
    );
    value.invoke(name, args, block)
}
