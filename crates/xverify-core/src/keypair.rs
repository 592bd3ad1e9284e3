//! Key pair produced by deterministic derivation.

use std::fmt;

use crate::memory::SecretBuffer;
use crate::scheme::Scheme;

/// Public key bytes plus the private signing state.
///
/// Intentionally not `Serialize` and not `Clone`: the signing key lives for
/// exactly one run and is never persisted.
pub struct SigningKeyPair {
    pub(crate) scheme: Scheme,
    pub(crate) public: Vec<u8>,
    pub(crate) secret: SecretBuffer,
}

impl SigningKeyPair {
    /// Scheme the pair belongs to.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Encoded public key.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    /// Length of the encoded signing key.
    #[must_use]
    pub fn secret_key_len(&self) -> usize {
        self.secret.len()
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("scheme", &self.scheme)
            .field("public_len", &self.public.len())
            .finish_non_exhaustive()
    }
}
