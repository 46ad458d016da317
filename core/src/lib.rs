//! Pied Piper core - a value-wrapping pipe combinator.
//!
//! This crate knows nothing about concrete value types. Anything that
//! implements [`Receiver`] can be piped by name; any `Debug` value can be
//! piped through callables.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod flow;
pub mod pipe;
pub mod receiver;

pub use config::{ConfigError, PiperConfig};
pub use descriptor::{
    Arg, Callback, Descriptor, EndOfPipe, Producer, Stage, callback, split_trailing, unary,
};
pub use error::{PipeError, PipeResult};
pub use flow::Flow;
pub use pipe::Pipe;
pub use receiver::{Dispatch, Method, Receiver};

pub mod prelude {
    pub use crate::config::PiperConfig;
    pub use crate::descriptor::{Arg, Descriptor, EndOfPipe, Stage};
    pub use crate::error::{PipeError, PipeResult};
    pub use crate::flow::Flow;
    pub use crate::pipe::Pipe;
    pub use crate::receiver::{Method, Receiver};
}
