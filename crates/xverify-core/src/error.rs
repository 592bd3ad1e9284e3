//! Error types for `xverify-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::bundle::ArtifactKind;

/// Pipeline stage a [`VectorError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Parsing inputs, configuration, or command-line values.
    Input,
    /// Deterministic key derivation from the seed.
    KeyDerivation,
    /// Signing the message (and context).
    Signing,
    /// Verifying the freshly produced signature before persisting it.
    SelfVerification,
    /// Removing and recreating the output directory.
    OutputDirectory,
    /// Writing one artifact file.
    ArtifactWrite,
    /// Reading a previously written bundle.
    ArtifactRead,
    /// Verifying a previously written bundle.
    Verification,
}

/// Errors produced while generating, persisting, or checking a vector bundle.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The signature backend rejected key generation.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The signature backend rejected signing.
    #[error("signing failed: {0}")]
    Signing(String),

    /// ML-DSA-87 context strings are bounded by FIPS 204.
    #[error("context is {len} bytes (maximum {max})")]
    ContextTooLong {
        /// Length of the rejected context.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A context was supplied to a scheme that does not bind one.
    #[error("{scheme} does not accept a signing context")]
    ContextUnsupported {
        /// Display name of the scheme.
        scheme: &'static str,
    },

    /// The produced signature did not verify under the produced public key.
    #[error("self-verification failed: {0}")]
    SelfVerification(String),

    /// The output directory could not be removed or recreated.
    #[error("output directory {path}: {source}")]
    OutputDirectory {
        /// The directory being prepared.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A single artifact could not be written.
    #[error("failed to write {artifact} to {path}: {source}")]
    ArtifactWrite {
        /// Which artifact failed.
        artifact: ArtifactKind,
        /// Destination path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A single artifact could not be read back.
    #[error("failed to read {artifact} from {path}: {source}")]
    ArtifactRead {
        /// Which artifact failed.
        artifact: ArtifactKind,
        /// Source path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Key or signature bytes have the wrong length for the scheme.
    #[error("invalid {what} length: {actual} bytes (expected {expected})")]
    InvalidLength {
        /// Which value was checked.
        what: &'static str,
        /// Observed length.
        actual: usize,
        /// Length mandated by the scheme.
        expected: usize,
    },

    /// A bundle's signature did not verify.
    #[error("{scheme} signature verification failed")]
    VerificationFailed {
        /// Display name of the scheme.
        scheme: &'static str,
    },

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unrecognized scheme name.
    #[error("unknown scheme: {0:?} (expected \"dilithium5\" or \"mldsa87\")")]
    UnknownScheme(String),

    /// Unrecognized output layout name.
    #[error("unknown output layout: {0:?} (expected \"isolated\" or \"legacy\")")]
    UnknownLayout(String),
}

impl VectorError {
    /// The pipeline stage this error belongs to.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::KeyDerivation(_) => Stage::KeyDerivation,
            Self::Signing(_) | Self::ContextTooLong { .. } | Self::ContextUnsupported { .. } => {
                Stage::Signing
            }
            Self::SelfVerification(_) => Stage::SelfVerification,
            Self::OutputDirectory { .. } => Stage::OutputDirectory,
            Self::ArtifactWrite { .. } => Stage::ArtifactWrite,
            Self::ArtifactRead { .. } => Stage::ArtifactRead,
            Self::InvalidLength { .. } | Self::VerificationFailed { .. } => Stage::Verification,
            Self::Config(_) | Self::UnknownScheme(_) | Self::UnknownLayout(_) => Stage::Input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_write_message_names_the_artifact() {
        let err = VectorError::ArtifactWrite {
            artifact: ArtifactKind::Signature,
            path: PathBuf::from("/tmp/x/goqrllib_mldsa87_sig.bin"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to write signature"), "{msg}");
        assert_eq!(err.stage(), Stage::ArtifactWrite);
    }

    #[test]
    fn context_errors_belong_to_signing_stage() {
        let too_long = VectorError::ContextTooLong { len: 300, max: 255 };
        let unsupported = VectorError::ContextUnsupported { scheme: "Dilithium5" };
        assert_eq!(too_long.stage(), Stage::Signing);
        assert_eq!(unsupported.stage(), Stage::Signing);
        assert_eq!(too_long.to_string(), "context is 300 bytes (maximum 255)");
    }
}
