//! ML-DSA-87 (FIPS 204) via `libcrux_ml_dsa::ml_dsa_87`.
//!
//! The seed is used directly as the key-generation input `ξ`; no pre-hash.
//! Signing uses the FIPS 204 deterministic variant (`rnd` = 32 zero bytes).

use libcrux_ml_dsa::ml_dsa_87::{self, MLDSA87Signature, MLDSA87SigningKey, MLDSA87VerificationKey};

use zeroize::Zeroize;

use crate::error::VectorError;
use crate::keypair::SigningKeyPair;
use crate::memory::SecretBuffer;
use crate::scheme::{
    Scheme, MAX_CONTEXT_LEN, ML_DSA_87_PUBLIC_KEY_LEN, ML_DSA_87_SECRET_KEY_LEN,
    ML_DSA_87_SIGNATURE_LEN,
};
use crate::seed::Seed;

/// Signing randomness for the deterministic variant.
const DETERMINISTIC_RND: [u8; 32] = [0u8; 32];

/// Derive the ML-DSA-87 key pair for `seed`.
///
/// # Errors
///
/// Returns [`VectorError::KeyDerivation`] if the backend produces keys of an
/// unexpected size.
pub fn derive_keypair(seed: &Seed) -> Result<SigningKeyPair, VectorError> {
    let kp = ml_dsa_87::generate_key_pair(*seed.as_bytes());

    let public = kp.verification_key.as_ref().to_vec();
    // libcrux key types do not zeroize; the owned copy below does.
    let secret = SecretBuffer::new(kp.signing_key.as_slice());

    if public.len() != ML_DSA_87_PUBLIC_KEY_LEN {
        return Err(VectorError::KeyDerivation(format!(
            "ML-DSA-87 verification key is {} bytes (expected {ML_DSA_87_PUBLIC_KEY_LEN})",
            public.len()
        )));
    }
    if secret.len() != ML_DSA_87_SECRET_KEY_LEN {
        return Err(VectorError::KeyDerivation(format!(
            "ML-DSA-87 signing key is {} bytes (expected {ML_DSA_87_SECRET_KEY_LEN})",
            secret.len()
        )));
    }

    Ok(SigningKeyPair {
        scheme: Scheme::MlDsa87,
        public,
        secret,
    })
}

fn checked_context(context: Option<&[u8]>) -> Result<&[u8], VectorError> {
    let context = context.unwrap_or_default();
    if context.len() > MAX_CONTEXT_LEN {
        return Err(VectorError::ContextTooLong {
            len: context.len(),
            max: MAX_CONTEXT_LEN,
        });
    }
    Ok(context)
}

/// Sign `message` under `context` deterministically.
///
/// An absent context is the empty context.
///
/// # Errors
///
/// Returns [`VectorError::ContextTooLong`] for contexts over 255 bytes and
/// [`VectorError::Signing`] if the backend rejects the operation.
pub fn sign(
    keypair: &SigningKeyPair,
    message: &[u8],
    context: Option<&[u8]>,
) -> Result<Vec<u8>, VectorError> {
    let context = checked_context(context)?;

    let mut sk_bytes: [u8; ML_DSA_87_SECRET_KEY_LEN] =
        keypair.secret.expose().try_into().map_err(|_| {
            VectorError::Signing(format!(
                "key pair for {} cannot sign ML-DSA-87",
                keypair.scheme
            ))
        })?;
    let signing_key = MLDSA87SigningKey::new(sk_bytes);
    sk_bytes.zeroize();

    let signature = ml_dsa_87::sign(&signing_key, message, context, DETERMINISTIC_RND)
        .map_err(|e| VectorError::Signing(format!("ML-DSA-87 signing failed: {e:?}")))?;

    Ok(signature.as_ref().to_vec())
}

/// Verify a detached ML-DSA-87 signature.
///
/// # Errors
///
/// Returns [`VectorError::InvalidLength`] for malformed inputs,
/// [`VectorError::ContextTooLong`] for an oversize context, and
/// [`VectorError::VerificationFailed`] if the signature does not verify.
pub fn verify(
    public_key: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    signature: &[u8],
) -> Result<(), VectorError> {
    let context = checked_context(context)?;

    let vk_bytes: [u8; ML_DSA_87_PUBLIC_KEY_LEN] =
        public_key.try_into().map_err(|_| VectorError::InvalidLength {
            what: "ML-DSA-87 verification key",
            actual: public_key.len(),
            expected: ML_DSA_87_PUBLIC_KEY_LEN,
        })?;
    let sig_bytes: [u8; ML_DSA_87_SIGNATURE_LEN] =
        signature.try_into().map_err(|_| VectorError::InvalidLength {
            what: "ML-DSA-87 signature",
            actual: signature.len(),
            expected: ML_DSA_87_SIGNATURE_LEN,
        })?;

    let vk = MLDSA87VerificationKey::new(vk_bytes);
    let sig = MLDSA87Signature::new(sig_bytes);

    ml_dsa_87::verify(&vk, message, context, &sig).map_err(|_| VectorError::VerificationFailed {
        scheme: Scheme::MlDsa87.display_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &[u8] = b"Cross-verification test message for ML-DSA-87";
    const CONTEXT: &[u8] = b"ZOND";

    #[test]
    fn keygen_from_fixed_seed_is_deterministic() {
        let a = derive_keypair(&Seed::zero()).unwrap();
        let b = derive_keypair(&Seed::zero()).unwrap();
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.secret.expose(), b.secret.expose());
        assert_eq!(a.secret_key_len(), ML_DSA_87_SECRET_KEY_LEN);
    }

    #[test]
    fn sign_verify_roundtrip_with_context() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let sig = sign(&kp, MESSAGE, Some(CONTEXT)).unwrap();
        assert_eq!(sig.len(), ML_DSA_87_SIGNATURE_LEN);
        verify(kp.public_key(), MESSAGE, Some(CONTEXT), &sig).unwrap();
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let a = sign(&kp, MESSAGE, Some(CONTEXT)).unwrap();
        let b = sign(&kp, MESSAGE, Some(CONTEXT)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn absent_context_equals_empty_context() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let none = sign(&kp, MESSAGE, None).unwrap();
        let empty = sign(&kp, MESSAGE, Some(&b""[..])).unwrap();
        assert_eq!(none, empty);
    }

    #[test]
    fn context_changes_signature() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let zond = sign(&kp, MESSAGE, Some(CONTEXT)).unwrap();
        let empty = sign(&kp, MESSAGE, None).unwrap();
        assert_ne!(zond, empty);
    }

    #[test]
    fn wrong_context_fails_verification() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let sig = sign(&kp, MESSAGE, Some(CONTEXT)).unwrap();
        let result = verify(kp.public_key(), MESSAGE, Some(&b"QRL"[..]), &sig);
        assert!(matches!(result, Err(VectorError::VerificationFailed { .. })));
    }

    #[test]
    fn context_length_boundary() {
        let kp = derive_keypair(&Seed::zero()).unwrap();
        let max = vec![0x5A; MAX_CONTEXT_LEN];
        assert!(sign(&kp, MESSAGE, Some(max.as_slice())).is_ok());

        let over = vec![0x5A; MAX_CONTEXT_LEN + 1];
        assert!(matches!(
            sign(&kp, MESSAGE, Some(over.as_slice())),
            Err(VectorError::ContextTooLong { len: 256, max: 255 })
        ));
    }

    #[test]
    fn wrong_key_length_is_reported() {
        let result = verify(&[0u8; 32], MESSAGE, None, &[0u8; ML_DSA_87_SIGNATURE_LEN]);
        assert!(matches!(
            result,
            Err(VectorError::InvalidLength { actual: 32, expected: 2592, .. })
        ));
    }
}
