use crate::shuffler::fisher_yates;
use rand::RngCore;

pub trait RngExt: RngCore {
    /// Shuffles `values` in place. Equivalent to [crate::Shuffler::shuffle] over the same
    /// generator, except it cannot fail.
    fn shuffle<V>(&mut self, values: &mut [V]) {
        if let Err(never) = fisher_yates(self, values) {
            match never {}
        }
    }
}

impl<T> RngExt for T where T: RngCore {}
