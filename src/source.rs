use crate::error::SourceError;
use rand::{thread_rng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

/// Source of uniformly distributed integers used to pick swap positions.
///
/// Implementations own their state (seed, algorithm). Consumers only borrow them and never
/// reseed, clone or tear them down. Whether a source can be used from several threads at once
/// is up to the implementation - see [SharedSource] for a lock-guarded one.
pub trait RandomSource {
    type Error;

    /// Returns a uniformly distributed integer in range `[0, bound)`.
    ///
    /// Callers must pass `bound >= 1`. Implementations are free to fail or panic otherwise.
    fn next_int(&mut self, bound: usize) -> Result<usize, Self::Error>;
}

/// Every `rand` generator is a random source that never fails. A zero `bound` panics inside of
/// [Rng::gen_range].
impl<R> RandomSource for R
where
    R: RngCore + ?Sized,
{
    type Error = Infallible;

    #[inline]
    fn next_int(&mut self, bound: usize) -> Result<usize, Self::Error> {
        Ok(self.gen_range(0..bound))
    }
}

/// Cloneable handle to a random generator, which can be shared between owners and threads.
/// Every draw locks the underlying generator for its duration.
#[derive(Debug, Default)]
pub struct SharedSource<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> SharedSource<R> {
    pub fn new(rng: R) -> Self {
        SharedSource {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Returns the wrapped generator if this was the last handle to it. Generator is returned
    /// even if its lock has been poisoned.
    pub fn into_inner(self) -> Option<R> {
        let mutex = Arc::try_unwrap(self.inner).ok()?;
        Some(mutex.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<R> Clone for SharedSource<R> {
    fn clone(&self) -> Self {
        SharedSource {
            inner: self.inner.clone(),
        }
    }
}

impl<R> RandomSource for SharedSource<R>
where
    R: RngCore,
{
    type Error = SourceError;

    fn next_int(&mut self, bound: usize) -> Result<usize, Self::Error> {
        let mut rng = self.inner.lock().map_err(|_| SourceError::Poisoned)?;
        Ok(rng.gen_range(0..bound))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Seed used to initialize generator. When absent, generator is seeded from thread-local
    /// entropy and shuffles are not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options { seed: None }
    }
}

impl Options {
    pub fn with_seed(seed: u64) -> Self {
        Options { seed: Some(seed) }
    }

    /// Creates a new generator configured by these options.
    pub fn rng(&self) -> Result<ChaCha8Rng, rand::Error> {
        match self.seed {
            Some(seed) => {
                log::debug!("seeding generator with {seed}");
                Ok(ChaCha8Rng::seed_from_u64(seed))
            }
            None => {
                log::debug!("seeding generator from thread-local entropy");
                ChaCha8Rng::from_rng(thread_rng())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::SourceError;
    use crate::source::{Options, RandomSource, SharedSource};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rng_draws_stay_within_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for bound in 1..100 {
            for _ in 0..20 {
                let value = rng.next_int(bound).unwrap();
                assert!(value < bound, "{value} is out of [0, {bound})");
            }
        }
        assert_eq!(rng.next_int(1).unwrap(), 0);
    }

    #[test]
    fn shared_source_draws_same_as_wrapped_generator() {
        let mut expected = ChaCha8Rng::seed_from_u64(42);
        let mut shared = SharedSource::new(ChaCha8Rng::seed_from_u64(42));
        let mut other = shared.clone();
        for bound in 2..50 {
            let handle = if bound % 2 == 0 { &mut shared } else { &mut other };
            assert_eq!(handle.next_int(bound), Ok(expected.next_int(bound).unwrap()));
        }
    }

    #[test]
    fn shared_source_into_inner_requires_last_handle() {
        let shared = SharedSource::new(ChaCha8Rng::seed_from_u64(3));
        let other = shared.clone();
        assert!(shared.into_inner().is_none());
        assert!(other.into_inner().is_some());
    }

    #[test]
    fn poisoned_shared_source_fails() {
        let shared = SharedSource::new(ChaCha8Rng::seed_from_u64(7));
        let inner = shared.inner.clone();
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("poisoning the lock");
        })
        .join();
        let mut shared = shared;
        assert_eq!(shared.next_int(10), Err(SourceError::Poisoned));
    }

    #[test]
    fn poisoned_last_handle_still_returns_generator() {
        let shared = SharedSource::new(ChaCha8Rng::seed_from_u64(7));
        let other = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = other.inner.lock().unwrap();
            panic!("poisoning the lock");
        })
        .join();
        assert!(shared.inner.is_poisoned());

        let mut rng = shared.into_inner().expect("last handle lost its generator");
        let mut expected = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(rng.next_int(1000).unwrap(), expected.next_int(1000).unwrap());
    }

    #[test]
    fn options_deserialize_from_json() {
        let options: Options = serde_json::from_str(r#"{"seed":1234}"#).unwrap();
        assert_eq!(options, Options::with_seed(1234));

        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.seed, None);
    }

    #[test]
    fn seeded_options_are_reproducible() {
        let options = Options::with_seed(99);
        let mut a = options.rng().unwrap();
        let mut b = options.rng().unwrap();
        for bound in 2..64 {
            assert_eq!(a.next_int(bound).unwrap(), b.next_int(bound).unwrap());
        }
    }

    #[test]
    fn unseeded_options_create_generator() {
        let mut rng = Options::default().rng().unwrap();
        assert!(rng.next_int(10).unwrap() < 10);
    }
}
