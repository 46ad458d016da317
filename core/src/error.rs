use thiserror::Error;

pub type PipeResult<T> = Result<T, PipeError>;

/// Everything a pipe step can fail with.
///
/// The combinator itself only ever raises `InvalidConstruction`,
/// `NoSuchCapability` and `MisplacedCallable`. The remaining variants are
/// for [`Receiver`](crate::Receiver) implementations, and `Other` carries
/// arbitrary errors out of user callables untouched.
#[derive(Error, Debug)]
pub enum PipeError {
    #[error("invalid construction: {0}")]
    InvalidConstruction(&'static str),

    #[error("undefined capability `{name}` for {receiver}")]
    NoSuchCapability { receiver: String, name: String },

    #[error("callable argument at position {position} must be the last argument")]
    MisplacedCallable { position: usize },

    #[error("wrong number of arguments for `{name}` (given {given}, expected {expected})")]
    Arity {
        name: String,
        given: usize,
        expected: String,
    },

    #[error("`{name}` expected {expected}, got {got}")]
    ArgumentType {
        name: String,
        expected: &'static str,
        got: String,
    },

    #[error("`{name}` requires a callable argument")]
    MissingBlock { name: String },

    #[error("`{name}` failed: {reason}")]
    Failed { name: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipeError {
    pub fn no_such_capability(receiver: impl Into<String>, name: impl Into<String>) -> Self {
        PipeError::NoSuchCapability {
            receiver: receiver.into(),
            name: name.into(),
        }
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PipeError::Failed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn is_no_such_capability(&self) -> bool {
        matches!(self, PipeError::NoSuchCapability { .. })
    }

    pub fn is_invalid_construction(&self) -> bool {
        matches!(self, PipeError::InvalidConstruction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = PipeError::no_such_capability("Text", "nonexistent");
        assert_eq!(err.to_string(), "undefined capability `nonexistent` for Text");
        assert!(err.is_no_such_capability());

        let err = PipeError::Arity {
            name: "upcase".into(),
            given: 2,
            expected: "0".into(),
        };
        assert_eq!(
            err.to_string(),
            "wrong number of arguments for `upcase` (given 2, expected 0)"
        );
    }

    #[test]
    fn test_other_is_transparent() {
        let err: PipeError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_invalid_construction());
    }
}
