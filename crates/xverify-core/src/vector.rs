//! Test-vector generation: derive keypair, sign, self-verify.

use crate::error::VectorError;
use crate::keypair::SigningKeyPair;
use crate::scheme::Scheme;
use crate::seed::Seed;
use crate::{dilithium5, mldsa87};

/// Bytes of key/signature shown in the console report.
pub const REPORT_PREFIX_LEN: usize = 32;

/// Inputs a vector is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorInputs {
    /// Key-generation seed.
    pub seed: Seed,
    /// Message bytes to sign.
    pub message: Vec<u8>,
    /// Context bound into the signature (ML-DSA-87 only).
    pub context: Option<Vec<u8>>,
}

impl VectorInputs {
    /// The compiled-in inputs for `scheme`: zero seed, fixed message and,
    /// for ML-DSA-87, the `ZOND` context.
    #[must_use]
    pub fn reference(scheme: Scheme) -> Self {
        Self {
            seed: Seed::zero(),
            message: scheme.reference_message().as_bytes().to_vec(),
            context: scheme.reference_context().map(<[u8]>::to_vec),
        }
    }
}

/// A generated vector: everything the external verifier consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub scheme: Scheme,
    pub seed: Seed,
    pub message: Vec<u8>,
    pub context: Option<Vec<u8>>,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    /// Signing key length, for the report only.
    pub secret_key_len: usize,
}

impl TestVector {
    /// Context bytes as written to the bundle. ML-DSA-87 always writes a
    /// context file, empty when no context was supplied.
    #[must_use]
    pub fn context_bytes(&self) -> &[u8] {
        self.context.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn public_key_prefix_hex(&self) -> String {
        prefix_hex(&self.public_key)
    }

    #[must_use]
    pub fn signature_prefix_hex(&self) -> String {
        prefix_hex(&self.signature)
    }
}

fn prefix_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(REPORT_PREFIX_LEN)])
}

/// Derive the key pair for `scheme` from `seed`.
///
/// # Errors
///
/// Returns [`VectorError::KeyDerivation`] on backend failure.
pub fn derive_keypair(scheme: Scheme, seed: &Seed) -> Result<SigningKeyPair, VectorError> {
    match scheme {
        Scheme::Dilithium5 => dilithium5::derive_keypair(seed),
        Scheme::MlDsa87 => mldsa87::derive_keypair(seed),
    }
}

/// Sign with the scheme the key pair belongs to.
///
/// # Errors
///
/// See [`dilithium5::sign`] and [`mldsa87::sign`].
pub fn sign(
    keypair: &SigningKeyPair,
    message: &[u8],
    context: Option<&[u8]>,
) -> Result<Vec<u8>, VectorError> {
    match keypair.scheme() {
        Scheme::Dilithium5 => dilithium5::sign(keypair, message, context),
        Scheme::MlDsa87 => mldsa87::sign(keypair, message, context),
    }
}

/// Verify a detached signature for `scheme`.
///
/// # Errors
///
/// Returns [`VectorError::VerificationFailed`] if the signature is invalid,
/// [`VectorError::InvalidLength`] for malformed inputs, and
/// [`VectorError::ContextUnsupported`] if a Dilithium5 context is given.
pub fn verify(
    scheme: Scheme,
    public_key: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    signature: &[u8],
) -> Result<(), VectorError> {
    match scheme {
        Scheme::Dilithium5 => {
            if context.is_some() {
                return Err(VectorError::ContextUnsupported {
                    scheme: scheme.display_name(),
                });
            }
            dilithium5::verify(public_key, message, signature)
        }
        Scheme::MlDsa87 => mldsa87::verify(public_key, message, context, signature),
    }
}

/// Generate the vector for `scheme` from `inputs`.
///
/// The signature is verified under the freshly derived public key before
/// the vector is returned; a vector that fails its own check is never
/// handed to the persistence step.
///
/// # Errors
///
/// Returns the first failing stage's error: key derivation, signing, or
/// [`VectorError::SelfVerification`].
pub fn generate(scheme: Scheme, inputs: &VectorInputs) -> Result<TestVector, VectorError> {
    generate_with(scheme, inputs, true)
}

/// [`generate`] with the self-verification step optional.
///
/// # Errors
///
/// As [`generate`]; [`VectorError::SelfVerification`] only when
/// `self_verify` is set.
pub fn generate_with(
    scheme: Scheme,
    inputs: &VectorInputs,
    self_verify: bool,
) -> Result<TestVector, VectorError> {
    let keypair = derive_keypair(scheme, &inputs.seed)?;
    tracing::debug!(scheme = %scheme, pk_len = keypair.public_key().len(), "key pair derived");

    let context = inputs.context.as_deref();
    let signature = sign(&keypair, &inputs.message, context)?;

    if signature.len() != scheme.signature_len() {
        return Err(VectorError::Signing(format!(
            "{scheme} signature is {} bytes (expected {})",
            signature.len(),
            scheme.signature_len()
        )));
    }

    if self_verify {
        verify(
            scheme,
            keypair.public_key(),
            &inputs.message,
            context,
            &signature,
        )
        .map_err(|e| VectorError::SelfVerification(e.to_string()))?;
        tracing::debug!(scheme = %scheme, sig_len = signature.len(), "signature self-verified");
    }

    Ok(TestVector {
        scheme,
        seed: inputs.seed.clone(),
        message: inputs.message.clone(),
        context: inputs.context.clone(),
        public_key: keypair.public_key().to_vec(),
        signature,
        secret_key_len: keypair.secret_key_len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_inputs_match_scheme_constants() {
        let d5 = VectorInputs::reference(Scheme::Dilithium5);
        assert_eq!(d5.message, b"Cross-verification test message for Dilithium5");
        assert!(d5.context.is_none());
        assert_eq!(d5.seed, Seed::zero());

        let m87 = VectorInputs::reference(Scheme::MlDsa87);
        assert_eq!(m87.message, b"Cross-verification test message for ML-DSA-87");
        assert_eq!(m87.context.as_deref(), Some(&b"ZOND"[..]));
    }

    #[test]
    fn generated_vectors_have_scheme_lengths() {
        for scheme in Scheme::ALL {
            let v = generate(scheme, &VectorInputs::reference(scheme)).unwrap();
            assert_eq!(v.public_key.len(), scheme.public_key_len());
            assert_eq!(v.signature.len(), scheme.signature_len());
            assert_eq!(v.secret_key_len, scheme.secret_key_len());
            assert_eq!(v.public_key_prefix_hex().len(), 2 * REPORT_PREFIX_LEN);
        }
    }

    #[test]
    fn dilithium5_with_context_fails_at_signing() {
        let mut inputs = VectorInputs::reference(Scheme::Dilithium5);
        inputs.context = Some(b"ZOND".to_vec());
        let err = generate(Scheme::Dilithium5, &inputs).unwrap_err();
        assert_eq!(err.stage(), crate::error::Stage::Signing);
    }

    #[test]
    fn verify_rejects_cross_scheme_signature() {
        let d5 =
            generate(Scheme::Dilithium5, &VectorInputs::reference(Scheme::Dilithium5)).unwrap();
        let result = verify(Scheme::MlDsa87, &d5.public_key, &d5.message, None, &d5.signature);
        assert!(matches!(result, Err(VectorError::InvalidLength { .. })));
    }

    #[test]
    fn skipping_self_verification_yields_same_vector() {
        let inputs = VectorInputs::reference(Scheme::MlDsa87);
        let checked = generate(Scheme::MlDsa87, &inputs).unwrap();
        let unchecked = generate_with(Scheme::MlDsa87, &inputs, false).unwrap();
        assert_eq!(checked, unchecked);
    }

    #[test]
    fn context_bytes_defaults_to_empty() {
        let mut inputs = VectorInputs::reference(Scheme::MlDsa87);
        inputs.context = None;
        let v = generate(Scheme::MlDsa87, &inputs).unwrap();
        assert!(v.context_bytes().is_empty());
    }
}
