//! Descriptor - how the next value is derived from the current one.
//!
//! A descriptor is the "stage" of a pipe. It is a closed set of shapes:
//! look up a capability by name, look it up and pass arguments, or call a
//! function value directly. [`EndOfPipe`] is kept out of the enum on purpose
//! so that it can never be mistaken for a transformation.

use crate::error::{PipeError, PipeResult};
use crate::receiver::{Method, Receiver};
use std::fmt;
use std::sync::Arc;

/// A function value usable as a step or as a trailing callback argument.
///
/// Receives the value it is applied to plus any positional arguments.
pub type Callback<T> = Arc<dyn Fn(T, Vec<T>) -> PipeResult<T> + Send + Sync>;

/// A zero-argument function resolved once to obtain a value or a stage.
///
/// An error it returns comes out of the call that resolved it unchanged.
pub type Producer<O> = Box<dyn FnOnce() -> PipeResult<O>>;

/// Wrap a closure into a [`Callback`].
pub fn callback<T, F>(f: F) -> Callback<T>
where
    F: Fn(T, Vec<T>) -> PipeResult<T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a single-argument closure into a [`Callback`] that ignores extra arguments.
pub fn unary<T, F>(f: F) -> Callback<T>
where
    F: Fn(T) -> PipeResult<T> + Send + Sync + 'static,
{
    Arc::new(move |value, _args| f(value))
}

/// Positional argument of a [`Descriptor::MethodCall`].
pub enum Arg<T> {
    Value(T),
    Callable(Callback<T>),
}

impl<T> Arg<T> {
    pub fn value(value: impl Into<T>) -> Self {
        Arg::Value(value.into())
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(T) -> PipeResult<T> + Send + Sync + 'static,
    {
        Arg::Callable(unary(f))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Arg::Callable(_))
    }
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Arg::Value(value)
    }
}

impl<T> Clone for Arg<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Arg::Value(v) => Arg::Value(v.clone()),
            Arg::Callable(f) => Arg::Callable(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Tagged description of one pipe step.
pub enum Descriptor<T> {
    /// Invoke the zero-argument capability `name` on the current value.
    MethodName(Method<T>),
    /// Invoke capability `name` with positional arguments. A callable in the
    /// last position is handed over as the capability's callback.
    MethodCall(Method<T>, Vec<Arg<T>>),
    /// A method reference heading the argument list: `f(current, args...)`.
    Reference(Callback<T>, Vec<T>),
    /// Call `f(current, args...)` directly.
    Callable(Callback<T>),
}

impl<T: Receiver> Descriptor<T> {
    pub fn name(name: impl Into<String>) -> Self {
        Descriptor::MethodName(Method::new(name))
    }

    /// A call with plain value arguments.
    pub fn call<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Descriptor::MethodCall(
            Method::new(name),
            args.into_iter().map(|a| Arg::Value(a.into())).collect(),
        )
    }

    /// A call with arguments exactly as given, callables included.
    pub fn call_args(name: impl Into<String>, args: Vec<Arg<T>>) -> Self {
        Descriptor::MethodCall(Method::new(name), args)
    }

    /// A call whose last argument is the callback `block`, as `map` expects.
    pub fn call_with_block<I, F>(name: impl Into<String>, args: I, block: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
        F: Fn(T) -> PipeResult<T> + Send + Sync + 'static,
    {
        let mut args: Vec<Arg<T>> = args.into_iter().map(|a| Arg::Value(a.into())).collect();
        args.push(Arg::callable(block));
        Descriptor::MethodCall(Method::new(name), args)
    }
}

impl<T> Descriptor<T> {
    pub fn reference<F>(f: F, args: Vec<T>) -> Self
    where
        F: Fn(T, Vec<T>) -> PipeResult<T> + Send + Sync + 'static,
    {
        Descriptor::Reference(callback(f), args)
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(T) -> PipeResult<T> + Send + Sync + 'static,
    {
        Descriptor::Callable(unary(f))
    }

    /// Like [`Descriptor::callable`] but the function also sees the step arguments.
    pub fn callable_with_args<F>(f: F) -> Self
    where
        F: Fn(T, Vec<T>) -> PipeResult<T> + Send + Sync + 'static,
    {
        Descriptor::Callable(callback(f))
    }

    /// Short tag used in tracing output.
    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::MethodName(_) => "method_name",
            Descriptor::MethodCall(..) => "method_call",
            Descriptor::Reference(..) => "reference",
            Descriptor::Callable(_) => "callable",
        }
    }
}

impl<T: Receiver> From<&str> for Descriptor<T> {
    fn from(name: &str) -> Self {
        Descriptor::name(name)
    }
}

impl<T: Receiver> From<String> for Descriptor<T> {
    fn from(name: String) -> Self {
        Descriptor::name(name)
    }
}

impl<T> Clone for Descriptor<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Descriptor::MethodName(method) => Descriptor::MethodName(method.clone()),
            Descriptor::MethodCall(method, args) => {
                Descriptor::MethodCall(method.clone(), args.clone())
            }
            Descriptor::Reference(f, args) => Descriptor::Reference(Arc::clone(f), args.clone()),
            Descriptor::Callable(f) => Descriptor::Callable(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::MethodName(method) => f.debug_tuple("MethodName").field(method).finish(),
            Descriptor::MethodCall(method, args) => {
                f.debug_tuple("MethodCall").field(method).field(args).finish()
            }
            Descriptor::Reference(_, args) => {
                f.debug_tuple("Reference").field(&"..").field(args).finish()
            }
            Descriptor::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Sentinel that terminates a chain and unwraps its value.
///
/// It is its own type, so no wrapped value can ever compare equal to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndOfPipe;

/// What the chaining operation accepts: a transformation or the end marker.
pub enum Stage<T> {
    Apply(Descriptor<T>),
    End(EndOfPipe),
}

impl<T> From<Descriptor<T>> for Stage<T> {
    fn from(descriptor: Descriptor<T>) -> Self {
        Stage::Apply(descriptor)
    }
}

impl<T> From<EndOfPipe> for Stage<T> {
    fn from(marker: EndOfPipe) -> Self {
        Stage::End(marker)
    }
}

impl<T: Receiver> From<&str> for Stage<T> {
    fn from(name: &str) -> Self {
        Stage::Apply(Descriptor::from(name))
    }
}

impl<T: fmt::Debug> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Apply(d) => f.debug_tuple("Apply").field(d).finish(),
            Stage::End(_) => f.write_str("End"),
        }
    }
}

/// Split call arguments into plain parameters and an optional trailing callback.
///
/// This is the only place that inspects argument shapes. A callable anywhere
/// but the last position is rejected.
pub fn split_trailing<T>(mut args: Vec<Arg<T>>) -> PipeResult<(Vec<T>, Option<Callback<T>>)> {
    let block = match args.last() {
        Some(Arg::Callable(_)) => match args.pop() {
            Some(Arg::Callable(f)) => Some(f),
            _ => None,
        },
        _ => None,
    };

    let mut params = Vec::with_capacity(args.len());
    for (position, arg) in args.into_iter().enumerate() {
        match arg {
            Arg::Value(v) => params.push(v),
            Arg::Callable(_) => return Err(PipeError::MisplacedCallable { position }),
        }
    }
    Ok((params, block))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Num(i32);

    impl Receiver for Num {
        fn receiver_name(&self) -> String {
            "Num".to_string()
        }

        fn responds_to(&self, name: &str) -> bool {
            name == "double"
        }

        fn invoke(self, _name: &str, _args: Vec<Self>, _block: Option<Callback<Self>>) -> PipeResult<Self> {
            Ok(Num(self.0 * 2))
        }
    }

    #[test]
    fn test_split_plain_arguments() {
        let (params, block) = split_trailing(vec![Arg::Value(1), Arg::Value(2)]).unwrap();
        assert_eq!(params, vec![1, 2]);
        assert!(block.is_none());
    }

    #[test]
    fn test_split_trailing_callable() {
        let args = vec![Arg::Value(10), Arg::callable(|x: i32| Ok(x * 2))];
        let (params, block) = split_trailing(args).unwrap();
        assert_eq!(params, vec![10]);
        let block = block.expect("trailing callable");
        assert_eq!(block(21, vec![]).unwrap(), 42);
    }

    #[test]
    fn test_split_rejects_leading_callable() {
        let args = vec![Arg::callable(|x: i32| Ok(x)), Arg::Value(1)];
        match split_trailing(args) {
            Err(PipeError::MisplacedCallable { position }) => assert_eq!(position, 0),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("leading callable must be rejected"),
        }
    }

    #[test]
    fn test_split_empty() {
        let (params, block) = split_trailing::<i32>(vec![]).unwrap();
        assert!(params.is_empty());
        assert!(block.is_none());
    }

    #[test]
    fn test_descriptor_kinds() {
        assert_eq!(Descriptor::<Num>::from("double").kind(), "method_name");
        assert_eq!(Descriptor::<Num>::call("double", [Num(1)]).kind(), "method_call");
        assert_eq!(Descriptor::<i32>::callable(|v| Ok(v)).kind(), "callable");
        assert_eq!(
            Descriptor::<i32>::reference(|v, _| Ok(v), vec![]).kind(),
            "reference"
        );
    }

    #[test]
    fn test_debug_hides_functions() {
        let d: Descriptor<Num> = Descriptor::call_with_block("map", Vec::<Num>::new(), |x| Ok(x));
        assert_eq!(format!("{:?}", d), "MethodCall(\"map\", [Callable(..)])");
        assert_eq!(format!("{:?}", Descriptor::<Num>::name("double")), "MethodName(\"double\")");
    }

    #[test]
    fn test_name_descriptors_carry_their_lookup() {
        match Descriptor::<Num>::from("double") {
            Descriptor::MethodName(method) => {
                assert_eq!(method.send(Num(4), vec![], None).unwrap(), Num(8));
            }
            other => panic!("unexpected descriptor: {other:?}"),
        }
    }
}
