//! Pied Piper facade crate.
//!
//! Re-exports the core combinator and the standard value library, and adds
//! the [`pipe`] / [`pipe_end`] shorthands:
//!
//! ```rust
//! use pied_piper::prelude::*;
//!
//! let shout = pipe("h")
//!     .send("upcase")?
//!     .then(Descriptor::call("concat", ["el", "lo"]))?
//!     .end(pipe_end());
//! assert_eq!(shout, Value::from("Hello"));
//! # Ok::<(), PipeError>(())
//! ```

pub mod sugar;

pub use piper_core as core;
pub use piper_std as std;

pub use piper_core::{Descriptor, EndOfPipe, Flow, Pipe, PipeError, PipeResult, PiperConfig};
pub use piper_std::{Recipe, Value};
pub use sugar::{pipe, pipe_end};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::sugar::{pipe, pipe_end};
    pub use piper_core::prelude::*;
    pub use piper_std::prelude::*;
}
