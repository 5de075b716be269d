/// Failure of a shuffle, parameterized by the error type of its random source.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// Sequence to shuffle was not provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Failure reported by the random source, passed through as is.
    #[error(transparent)]
    Source(E),
}

impl<E> Error<E> {
    /// Returns the upstream random source error, if that's what caused this failure.
    pub fn into_source(self) -> Option<E> {
        match self {
            Error::Source(e) => Some(e),
            Error::InvalidArgument(_) => None,
        }
    }
}

/// Failure of a random source provided by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("shared random source lock has been poisoned")]
    Poisoned,
}
