//! BN254 test suite

#[cfg(test)]
mod field;

#[cfg(test)]
mod groups;



use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

pub(crate) fn rng(seed: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([seed; 32])
}
