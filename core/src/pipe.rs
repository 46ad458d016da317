//! # Pipe: the value-wrapping combinator
//!
//! A `Pipe` holds exactly one current value. Each step consumes the pipe and
//! either yields a new one around the transformed value or, given
//! [`EndOfPipe`], hands the raw value back.
//!
//! ```rust,ignore
//! let shout = Pipe::new(Value::from("h"))
//!     .send("upcase")?
//!     .then(Descriptor::call("concat", ["el", "lo"]))?
//!     .end(EndOfPipe);
//! assert_eq!(shout, Value::from("Hello"));
//! ```

use crate::config::PiperConfig;
use crate::descriptor::{Descriptor, EndOfPipe, Producer, Stage, split_trailing};
use crate::error::{PipeError, PipeResult};
use crate::flow::Flow;
use crate::receiver::Receiver;
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Pipe<T> {
    value: T,
    /// Number of steps applied since construction
    depth: usize,
    config: Arc<PiperConfig>,
}

impl<T> Pipe<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            depth: 0,
            config: Arc::new(PiperConfig::default()),
        }
    }

    /// Wrap the value returned by `producer`, which is called exactly once.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::new(producer())
    }

    /// Build a pipe from exactly one of a value or a producer.
    ///
    /// A producer's error is returned as is.
    pub fn construct(value: Option<T>, producer: Option<Producer<T>>) -> PipeResult<Self> {
        match (value, producer) {
            (Some(value), None) => Ok(Self::new(value)),
            (None, Some(producer)) => Ok(Self::new(producer()?)),
            (Some(_), Some(_)) => Err(PipeError::InvalidConstruction(
                "initialize with a value or a producer, not both",
            )),
            (None, None) => Err(PipeError::InvalidConstruction(
                "initialize with a value or a producer",
            )),
        }
    }

    pub fn with_config(mut self, config: PiperConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn config(&self) -> &PiperConfig {
        &self.config
    }

    /// The current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Terminate the chain and unwrap the current value.
    pub fn end(self, _marker: EndOfPipe) -> T {
        tracing::trace!(pipe = %self.config.label, depth = self.depth, "pipe ended");
        self.value
    }

    fn succeed(config: Arc<PiperConfig>, depth: usize, value: T) -> Self {
        Self {
            value,
            depth: depth + 1,
            config,
        }
    }
}

impl<T: Debug> Pipe<T> {
    /// The full chaining protocol.
    ///
    /// Exactly one of `stage` and `producer` must be given; the producer is
    /// resolved first. `args` are appended to whatever arguments the
    /// descriptor already carries.
    pub fn step(
        self,
        stage: Option<Stage<T>>,
        args: Vec<T>,
        producer: Option<Producer<Stage<T>>>,
    ) -> PipeResult<Flow<T>> {
        let stage = match (stage, producer) {
            (Some(stage), None) => stage,
            (None, Some(producer)) => producer()?,
            (Some(_), Some(_)) => {
                return Err(PipeError::InvalidConstruction(
                    "chain with a stage or a producer, not both",
                ));
            }
            (None, None) => {
                return Err(PipeError::InvalidConstruction(
                    "chain with a stage or a producer",
                ));
            }
        };

        match stage {
            Stage::End(marker) => Ok(Flow::Terminal(self.end(marker))),
            Stage::Apply(descriptor) => self.apply(descriptor, args).map(Flow::Active),
        }
    }

    /// Apply a stage with no extra arguments.
    pub fn chain(self, stage: impl Into<Stage<T>>) -> PipeResult<Flow<T>> {
        self.step(Some(stage.into()), Vec::new(), None)
    }

    /// Apply a descriptor and keep piping.
    pub fn then(self, descriptor: Descriptor<T>) -> PipeResult<Self> {
        self.apply(descriptor, Vec::new())
    }

    /// Apply a descriptor with trailing arguments and keep piping.
    pub fn then_with(self, descriptor: Descriptor<T>, args: Vec<T>) -> PipeResult<Self> {
        self.apply(descriptor, args)
    }

    /// Apply descriptors left to right, stopping at the first failure.
    pub fn then_all<I>(self, descriptors: I) -> PipeResult<Self>
    where
        I: IntoIterator<Item = Descriptor<T>>,
    {
        descriptors
            .into_iter()
            .try_fold(self, |pipe, descriptor| pipe.apply(descriptor, Vec::new()))
    }

    fn apply(self, descriptor: Descriptor<T>, args: Vec<T>) -> PipeResult<Self> {
        let Pipe {
            value,
            depth,
            config,
        } = self;

        let span = tracing::debug_span!(
            "pipe.step",
            pipe = %config.label,
            depth,
            kind = descriptor.kind()
        );
        let _entered = span.enter();
        if config.log_values {
            tracing::trace!(?value, ?descriptor, "applying step");
        }

        let next = match descriptor {
            Descriptor::MethodName(method) => method.send(value, args, None)?,
            Descriptor::MethodCall(method, call_args) => {
                let (mut params, block) = split_trailing(call_args)?;
                params.extend(args);
                method.send(value, params, block)?
            }
            Descriptor::Reference(f, mut ref_args) => {
                ref_args.extend(args);
                f(value, ref_args)?
            }
            Descriptor::Callable(f) => f(value, args)?,
        };

        if config.log_values {
            tracing::trace!(value = ?next, "step produced");
        }
        Ok(Self::succeed(config, depth, next))
    }
}

impl<T: Receiver + Debug> Pipe<T> {
    /// Invoke the zero-argument capability `name` and keep piping.
    pub fn send(self, name: &str) -> PipeResult<Self> {
        self.apply(Descriptor::name(name), Vec::new())
    }
}
