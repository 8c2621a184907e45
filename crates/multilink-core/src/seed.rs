//! Seeded random streams
//!
//! Every sampling call in the generator draws from an explicit
//! [`ChaCha8Rng`]. A run has one base seed; the variation pool and each
//! dataset instance get their own stream derived from it, so an instance
//! depends only on the base seed and its own index.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random generator used throughout the crate
pub type GenRng = ChaCha8Rng;

/// Stream selector for [`derive_seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStream {
    /// Primitive variation sampling
    Variations,
    /// One dataset instance, keyed by its numeric index
    Instance(u64),
}

impl SeedStream {
    fn key(self) -> u64 {
        match self {
            SeedStream::Variations => 0x7661_7269_6174_696f,
            SeedStream::Instance(index) => index.wrapping_add(1),
        }
    }
}

/// Pick a base seed from OS entropy
pub fn entropy_seed() -> u64 {
    rand::rngs::OsRng.next_u64()
}

/// Derive the seed of one stream from the run's base seed (splitmix64)
pub fn derive_seed(base: u64, stream: SeedStream) -> u64 {
    let mut z = base ^ stream.key().wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Create the generator for one stream
pub fn stream_rng(base: u64, stream: SeedStream) -> GenRng {
    GenRng::seed_from_u64(derive_seed(base, stream))
}
