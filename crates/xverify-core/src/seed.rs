//! Fixed key-generation seeds.

use std::fmt;

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed length in bytes for both Dilithium5 and ML-DSA-87.
pub const SEED_LEN: usize = 32;

/// The sole entropy input of a vector. Fixed so runs are reproducible.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// The all-zero reference seed.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; SEED_LEN])
    }

    /// Wrap caller-provided seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex rendering for the console report.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `SHAKE256(seed)[..32]`.
    ///
    /// go-qrllib hashes a Dilithium5 seed once before running the round-3
    /// key generator, which then expands it again internally. Matching its
    /// keys requires applying the same pre-hash here.
    #[must_use]
    pub fn shake256_prehash(&self) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(&self.0);
        let mut out = [0u8; SEED_LEN];
        hasher.finalize_xof().read(&mut out);
        Self(out)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::zero()
    }
}

// Seeds here are public test constants, so Debug shows them.
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.to_hex())
    }
}
