use thiserror::Error;

/// Errors raised by stream operations that need a particular shape of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("'{op}' cannot be applied to an empty stream")]
    EmptyStream { op: &'static str },

    #[error("index {index} is out of range for a stream of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("'{op}' needs at least {needed} elements, the stream has {found}")]
    TooShort {
        op: &'static str,
        needed: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
