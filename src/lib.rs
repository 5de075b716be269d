//! In-place [Fisher-Yates](https://en.wikipedia.org/wiki/Fisher-Yates_shuffle) shuffling of
//! slices of any element type, driven by a caller-supplied source of randomness.

mod error;
mod shuffler;
mod source;
mod utils;

pub use error::{Error, SourceError};
pub use shuffler::Shuffler;
pub use source::{Options, RandomSource, SharedSource};
pub use utils::RngExt;

pub type Result<T, E> = std::result::Result<T, Error<E>>;
