use crate::error::Error;
use crate::source::RandomSource;
use crate::Result;

/// Shuffles sequences in place using [Fisher-Yates](https://en.wikipedia.org/wiki/Fisher-Yates_shuffle)
/// algorithm. Every permutation of a shuffled sequence is equally likely, given that
/// the underlying random source produces independent, uniformly distributed draws.
///
/// Shuffler only borrows its random source, so the source can be used by its owner again once
/// shuffler goes out of scope. It's not synchronized in any way: sharing the same source between
/// threads requires the source itself to support that (see [crate::SharedSource]).
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use shuffler::Shuffler;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(2023);
/// let mut data = [1, 2, 3, 4, 5];
/// Shuffler::new(&mut rng).shuffle(&mut data).unwrap();
///
/// data.sort();
/// assert_eq!(data, [1, 2, 3, 4, 5]);
/// ```
#[derive(Debug)]
pub struct Shuffler<'a, S: ?Sized> {
    rng: &'a mut S,
}

impl<'a, S> Shuffler<'a, S>
where
    S: RandomSource + ?Sized,
{
    pub fn new(rng: &'a mut S) -> Self {
        Shuffler { rng }
    }

    /// Returns the random source this shuffler draws from.
    pub fn source(&mut self) -> &mut S {
        &mut *self.rng
    }

    /// Shuffles `data` in place. Sequences of 0 and 1 elements are left untouched, without
    /// consulting random source at all.
    ///
    /// Any failure of the random source is returned as [Error::Source] immediately, leaving
    /// `data` partially shuffled (still with the same elements).
    pub fn shuffle<T>(&mut self, data: &mut [T]) -> Result<(), S::Error> {
        log::trace!("shuffling sequence of {} elements", data.len());
        fisher_yates(&mut *self.rng, data).map_err(Error::Source)
    }

    /// Shuffles `data` in place. Absent sequence is rejected with [Error::InvalidArgument]
    /// before random source is consulted.
    pub fn shuffle_checked<T>(&mut self, data: Option<&mut [T]>) -> Result<(), S::Error> {
        match data {
            Some(data) => self.shuffle(data),
            None => Err(Error::InvalidArgument("sequence to shuffle is absent")),
        }
    }

    /// Collects `data` into a new vector and returns it shuffled.
    pub fn shuffled<I>(&mut self, data: I) -> Result<Vec<I::Item>, S::Error>
    where
        I: IntoIterator,
    {
        let mut values: Vec<_> = data.into_iter().collect();
        self.shuffle(&mut values)?;
        Ok(values)
    }
}

/// Walks `data` backwards, swapping every element with one picked at random from the range
/// of not yet visited elements (itself included).
pub(crate) fn fisher_yates<S, T>(
    rng: &mut S,
    data: &mut [T],
) -> std::result::Result<(), S::Error>
where
    S: RandomSource + ?Sized,
{
    for dest in (1..data.len()).rev() {
        let source = rng.next_int(dest + 1)?;
        data.swap(dest, source);
    }
    Ok(())
}
