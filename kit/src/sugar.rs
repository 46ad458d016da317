//! Shorthands for building and ending pipes over [`Value`].
//!
//! Pure sugar: nothing here is needed to use [`Pipe`] directly.

use piper_core::{EndOfPipe, Pipe};
use piper_std::Value;

/// Start a pipe over anything convertible into a [`Value`].
pub fn pipe(value: impl Into<Value>) -> Pipe<Value> {
    Pipe::new(value.into())
}

/// The marker that ends a chain.
pub fn pipe_end() -> EndOfPipe {
    EndOfPipe
}
