//! Holding signing-key material for the lifetime of one run.
//!
//! Private keys are derived, used once to sign, and dropped. They are never
//! written to disk, so the only requirements here are zeroization on drop
//! and a `Debug` impl that cannot leak the bytes into logs.

use std::fmt;

use secrecy::{ExposeSecret, SecretSlice};

/// Variable-length secret bytes, zeroized on drop via `secrecy`.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a new secret allocation.
    ///
    /// The caller remains responsible for zeroizing its own copy.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: data.to_vec().into(),
        }
    }

    /// Borrow the raw bytes for a signing call.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}
