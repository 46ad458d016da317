//! Flow - the result of one chaining step.
//!
//! A pipe is either still **active** (holding a value, accepting further
//! steps) or **terminal** (the end marker was applied and the raw value came
//! out). There is no way back from terminal to active other than building a
//! new pipe from the value.

use crate::pipe::Pipe;

#[derive(Debug, Clone)]
pub enum Flow<T> {
    /// The chain continues with a new pipe
    Active(Pipe<T>),
    /// The chain was ended; this is the unwrapped value
    Terminal(T),
}

impl<T> Flow<T> {
    /// Check if the chain can continue
    pub fn is_active(&self) -> bool {
        matches!(self, Flow::Active(_))
    }

    /// Check if the chain has been ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Flow::Terminal(_))
    }

    /// Extract the pipe if active
    pub fn into_pipe(self) -> Option<Pipe<T>> {
        match self {
            Flow::Active(p) => Some(p),
            Flow::Terminal(_) => None,
        }
    }

    /// Extract the raw value if terminal
    pub fn into_terminal(self) -> Option<T> {
        match self {
            Flow::Active(_) => None,
            Flow::Terminal(v) => Some(v),
        }
    }

    /// The value either way, discarding the pipe wrapper
    pub fn into_value(self) -> T {
        match self {
            Flow::Active(p) => p.into_inner(),
            Flow::Terminal(v) => v,
        }
    }
}
