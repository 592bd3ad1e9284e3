//! Dilithium5 (CRYSTALS-Dilithium round 3) via `crystals_dilithium`.
//!
//! Keys follow the go-qrllib convention: the 32-byte seed is pre-hashed with
//! SHAKE256 before the round-3 key generator expands it. Signing is the
//! deterministic round-3 variant, so a fixed seed and message always yield
//! the same signature.

use crystals_dilithium::dilithium5::{Keypair, PublicKey, SecretKey};
use zeroize::Zeroize;

use crate::error::VectorError;
use crate::keypair::SigningKeyPair;
use crate::memory::SecretBuffer;
use crate::scheme::{
    Scheme, DILITHIUM5_PUBLIC_KEY_LEN, DILITHIUM5_SECRET_KEY_LEN, DILITHIUM5_SIGNATURE_LEN,
};
use crate::seed::Seed;

/// Derive the Dilithium5 key pair for `seed`.
///
/// # Errors
///
/// Returns [`VectorError::KeyDerivation`] if the backend produces keys of an
/// unexpected size.
pub fn derive_keypair(seed: &Seed) -> Result<SigningKeyPair, VectorError> {
    let expanded = seed.shake256_prehash();
    let keypair = Keypair::generate(Some(&expanded.as_bytes()[..]));
    drop(expanded);

    let public = keypair.public.to_bytes().to_vec();
    let mut secret_bytes = keypair.secret.to_bytes();
    let secret = SecretBuffer::new(&secret_bytes);
    secret_bytes.zeroize();

    if public.len() != DILITHIUM5_PUBLIC_KEY_LEN {
        return Err(VectorError::KeyDerivation(format!(
            "Dilithium5 public key is {} bytes (expected {DILITHIUM5_PUBLIC_KEY_LEN})",
            public.len()
        )));
    }
    if secret.len() != DILITHIUM5_SECRET_KEY_LEN {
        return Err(VectorError::KeyDerivation(format!(
            "Dilithium5 secret key is {} bytes (expected {DILITHIUM5_SECRET_KEY_LEN})",
            secret.len()
        )));
    }

    Ok(SigningKeyPair {
        scheme: Scheme::Dilithium5,
        public,
        secret,
    })
}

/// Sign `message` deterministically.
///
/// Dilithium5 has no context input; passing one is an error rather than
/// silently dropping it.
///
/// # Errors
///
/// Returns [`VectorError::ContextUnsupported`] if `context` is `Some`, or
/// [`VectorError::Signing`] if the key pair belongs to another scheme.
pub fn sign(
    keypair: &SigningKeyPair,
    message: &[u8],
    context: Option<&[u8]>,
) -> Result<Vec<u8>, VectorError> {
    if context.is_some() {
        return Err(VectorError::ContextUnsupported {
            scheme: Scheme::Dilithium5.display_name(),
        });
    }
    if keypair.scheme != Scheme::Dilithium5 || keypair.secret.len() != DILITHIUM5_SECRET_KEY_LEN {
        return Err(VectorError::Signing(format!(
            "key pair for {} cannot sign Dilithium5",
            keypair.scheme
        )));
    }

    let secret = SecretKey::from_bytes(keypair.secret.expose());
    Ok(secret.sign(message).to_vec())
}

/// Verify a detached Dilithium5 signature.
///
/// # Errors
///
/// Returns [`VectorError::InvalidLength`] for malformed inputs and
/// [`VectorError::VerificationFailed`] if the signature does not verify.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), VectorError> {
    if public_key.len() != DILITHIUM5_PUBLIC_KEY_LEN {
        return Err(VectorError::InvalidLength {
            what: "Dilithium5 public key",
            actual: public_key.len(),
            expected: DILITHIUM5_PUBLIC_KEY_LEN,
        });
    }
    if signature.len() != DILITHIUM5_SIGNATURE_LEN {
        return Err(VectorError::InvalidLength {
            what: "Dilithium5 signature",
            actual: signature.len(),
            expected: DILITHIUM5_SIGNATURE_LEN,
        });
    }

    let pk = PublicKey::from_bytes(public_key);
    if pk.verify(message, signature) {
        Ok(())
    } else {
        Err(VectorError::VerificationFailed {
            scheme: Scheme::Dilithium5.display_name(),
        })
    }
}
