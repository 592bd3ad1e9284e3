//! ML-DSA-87 (FIPS 204) reference vector: zero seed, deterministic signing.

use xverify_core::scheme::{ML_DSA_87_PUBLIC_KEY_LEN, ML_DSA_87_SIGNATURE_LEN};
use xverify_core::{generate, Scheme, VectorInputs};

use super::sha256_hex;

const PK_PREFIX: &str = "e45ffc8cc73db885dc662e62a18cd8e3803297117fa5658814a985b5ff1db7b4";
const SIG_PREFIX: &str = "405de4108b09730abf60fa196cfd8f8dc0e40e860998ec292a26bd48fb697b8f";
const PK_SHA256: &str = "1d4a461707fc50a7ec93a9c02454778a8b82321ca460eea345e7bbfaff38a3aa";
const SIG_SHA256: &str = "e1ef777c4db275f9100e8f609b4ce81abb4efe33e1792500e64719ecc5b42c09";

/// Same key and message, empty context.
const EMPTY_CTX_SIG_PREFIX: &str =
    "a585d9def6f0c067d20fc3aa8f7bc328b57df3cf6e3573a74538875b7a896dfc";
const EMPTY_CTX_SIG_SHA256: &str =
    "8cdc6a52272f74a4a68b6cc5aa30873bc5fa745aacec73a1e641cbbc004d0ff3";

#[test]
fn mldsa87_reference_public_key() {
    let v = generate(Scheme::MlDsa87, &VectorInputs::reference(Scheme::MlDsa87)).unwrap();
    assert_eq!(v.public_key.len(), ML_DSA_87_PUBLIC_KEY_LEN);
    assert_eq!(v.public_key_prefix_hex(), PK_PREFIX);
    assert_eq!(sha256_hex(&v.public_key), PK_SHA256);
}

#[test]
fn mldsa87_reference_signature_with_zond_context() {
    let v = generate(Scheme::MlDsa87, &VectorInputs::reference(Scheme::MlDsa87)).unwrap();
    assert_eq!(v.context_bytes(), b"ZOND");
    assert_eq!(v.signature.len(), ML_DSA_87_SIGNATURE_LEN);
    assert_eq!(v.signature_prefix_hex(), SIG_PREFIX);
    assert_eq!(sha256_hex(&v.signature), SIG_SHA256);
}

#[test]
fn mldsa87_empty_context_changes_signature_not_key() {
    let zond = generate(Scheme::MlDsa87, &VectorInputs::reference(Scheme::MlDsa87)).unwrap();

    let mut inputs = VectorInputs::reference(Scheme::MlDsa87);
    inputs.context = Some(Vec::new());
    let empty = generate(Scheme::MlDsa87, &inputs).unwrap();

    assert_eq!(empty.public_key, zond.public_key);
    assert_ne!(empty.signature, zond.signature);
    assert_eq!(empty.signature_prefix_hex(), EMPTY_CTX_SIG_PREFIX);
    assert_eq!(sha256_hex(&empty.signature), EMPTY_CTX_SIG_SHA256);
}

#[test]
fn mldsa87_altered_context_changes_signature() {
    let zond = generate(Scheme::MlDsa87, &VectorInputs::reference(Scheme::MlDsa87)).unwrap();

    let mut inputs = VectorInputs::reference(Scheme::MlDsa87);
    inputs.context = Some(b"ZONE".to_vec());
    let altered = generate(Scheme::MlDsa87, &inputs).unwrap();

    assert_eq!(altered.public_key, zond.public_key);
    assert_ne!(altered.signature, zond.signature);
}
