//! Dilithium5 (round 3) reference vector: zero seed, SHAKE256 pre-hash.

use xverify_core::scheme::{DILITHIUM5_PUBLIC_KEY_LEN, DILITHIUM5_SIGNATURE_LEN};
use xverify_core::{generate, Scheme, Seed, VectorInputs};

use super::sha256_hex;

const PK_PREFIX: &str = "b64bc1b2dcc382de5163bac48b2c895e1b1e32c2eaf7ee7b8aa0cd50055eddc8";
const SIG_PREFIX: &str = "1add6b150060c100bfff125e8a711607012cb9ce35a146a2371a8cb27698e51a";
const PK_SHA256: &str = "b0f4b6d7b0709ac1d5ad73cb13682dff7dcd260c0f114b9eae7359a8c2f9050e";
const SIG_SHA256: &str = "e8644e2d16aaa19659884a5350f162b0c31ef0f4acae29de9471146e758db6ca";

#[test]
fn dilithium5_prehashed_seed() {
    assert_eq!(
        Seed::zero().shake256_prehash().to_hex(),
        "f5977c8283546a63723bc31d2619124f11db4658643336741df81757d5ad3062"
    );
}

#[test]
fn dilithium5_reference_public_key() {
    let v = generate(Scheme::Dilithium5, &VectorInputs::reference(Scheme::Dilithium5)).unwrap();
    assert_eq!(v.public_key.len(), DILITHIUM5_PUBLIC_KEY_LEN);
    assert_eq!(v.public_key_prefix_hex(), PK_PREFIX);
    assert_eq!(sha256_hex(&v.public_key), PK_SHA256);
}

#[test]
fn dilithium5_reference_signature() {
    let v = generate(Scheme::Dilithium5, &VectorInputs::reference(Scheme::Dilithium5)).unwrap();
    assert_eq!(v.signature.len(), DILITHIUM5_SIGNATURE_LEN);
    assert_eq!(v.signature_prefix_hex(), SIG_PREFIX);
    assert_eq!(sha256_hex(&v.signature), SIG_SHA256);
}

#[test]
fn dilithium5_repeated_runs_are_identical() {
    let inputs = VectorInputs::reference(Scheme::Dilithium5);
    let a = generate(Scheme::Dilithium5, &inputs).unwrap();
    let b = generate(Scheme::Dilithium5, &inputs).unwrap();
    assert_eq!(a.public_key, b.public_key);
    assert_eq!(a.signature, b.signature);
}
