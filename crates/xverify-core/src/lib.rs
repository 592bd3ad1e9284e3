//! `xverify-core`: deterministic Dilithium5 / ML-DSA-87 cross-verification
//! vectors.
//!
//! A run derives a key pair from a fixed seed, signs a fixed message (and,
//! for ML-DSA-87, a fixed context), and writes the public key, signature,
//! message and context as separate files for an independent implementation
//! to verify. The lattice arithmetic lives in `crystals-dilithium` and
//! `libcrux-ml-dsa`; this crate only fixes the inputs and the file layout.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod seed;
pub mod scheme;

pub mod keypair;
pub mod dilithium5;
pub mod mldsa87;

pub mod vector;

pub mod bundle;
pub mod config;

pub use bundle::{
    prepare_isolated_dir, read_bundle, verify_bundle, write_bundle, ArtifactKind, ArtifactSink,
    BundleConfig, FsSink, LoadedBundle, OutputLayout, WrittenBundle, DEFAULT_PRODUCER,
    ISOLATED_DIR_NAME,
};
pub use config::GeneratorConfig;
pub use error::{Stage, VectorError};
pub use keypair::SigningKeyPair;
pub use scheme::Scheme;
pub use seed::{Seed, SEED_LEN};
pub use vector::{generate, generate_with, TestVector, VectorInputs};
