//! Scheme descriptors: names, sizes, and the compiled-in reference inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bundle::ArtifactKind;
use crate::error::VectorError;

/// Dilithium5 (round 3) public key length.
pub const DILITHIUM5_PUBLIC_KEY_LEN: usize = 2592;
/// Dilithium5 (round 3) secret key length.
pub const DILITHIUM5_SECRET_KEY_LEN: usize = 4864;
/// Dilithium5 (round 3) signature length.
pub const DILITHIUM5_SIGNATURE_LEN: usize = 4595;

/// ML-DSA-87 verification key length (FIPS 204).
pub const ML_DSA_87_PUBLIC_KEY_LEN: usize = 2592;
/// ML-DSA-87 signing key length (FIPS 204).
pub const ML_DSA_87_SECRET_KEY_LEN: usize = 4896;
/// ML-DSA-87 signature length (FIPS 204).
pub const ML_DSA_87_SIGNATURE_LEN: usize = 4627;

/// Longest context string FIPS 204 accepts.
pub const MAX_CONTEXT_LEN: usize = 255;

/// Reference message signed by the Dilithium5 generator.
pub const DILITHIUM5_MESSAGE: &str = "Cross-verification test message for Dilithium5";
/// Reference message signed by the ML-DSA-87 generator.
pub const ML_DSA_87_MESSAGE: &str = "Cross-verification test message for ML-DSA-87";
/// Context bound into every ML-DSA-87 reference signature.
pub const ML_DSA_87_CONTEXT: &[u8] = b"ZOND";

/// A supported signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// CRYSTALS-Dilithium round 3, security level 5.
    Dilithium5,
    /// FIPS 204 ML-DSA-87.
    #[serde(rename = "mldsa87", alias = "ml-dsa-87")]
    MlDsa87,
}

const DILITHIUM5_ARTIFACTS: &[ArtifactKind] = &[
    ArtifactKind::PublicKey,
    ArtifactKind::Signature,
    ArtifactKind::Message,
];

const ML_DSA_87_ARTIFACTS: &[ArtifactKind] = &[
    ArtifactKind::PublicKey,
    ArtifactKind::Signature,
    ArtifactKind::Message,
    ArtifactKind::Context,
];

impl Scheme {
    /// Every supported scheme.
    pub const ALL: [Self; 2] = [Self::Dilithium5, Self::MlDsa87];

    /// Human-readable name used in reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Dilithium5 => "Dilithium5",
            Self::MlDsa87 => "ML-DSA-87",
        }
    }

    /// Scheme segment of output file names.
    #[must_use]
    pub const fn file_tag(self) -> &'static str {
        match self {
            Self::Dilithium5 => "dilithium5",
            Self::MlDsa87 => "mldsa87",
        }
    }

    #[must_use]
    pub const fn public_key_len(self) -> usize {
        match self {
            Self::Dilithium5 => DILITHIUM5_PUBLIC_KEY_LEN,
            Self::MlDsa87 => ML_DSA_87_PUBLIC_KEY_LEN,
        }
    }

    #[must_use]
    pub const fn secret_key_len(self) -> usize {
        match self {
            Self::Dilithium5 => DILITHIUM5_SECRET_KEY_LEN,
            Self::MlDsa87 => ML_DSA_87_SECRET_KEY_LEN,
        }
    }

    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            Self::Dilithium5 => DILITHIUM5_SIGNATURE_LEN,
            Self::MlDsa87 => ML_DSA_87_SIGNATURE_LEN,
        }
    }

    /// Whether signatures bind a context string.
    #[must_use]
    pub const fn supports_context(self) -> bool {
        matches!(self, Self::MlDsa87)
    }

    /// The compiled-in message for this scheme's generator.
    #[must_use]
    pub const fn reference_message(self) -> &'static str {
        match self {
            Self::Dilithium5 => DILITHIUM5_MESSAGE,
            Self::MlDsa87 => ML_DSA_87_MESSAGE,
        }
    }

    /// The compiled-in context, if the scheme carries one.
    #[must_use]
    pub const fn reference_context(self) -> Option<&'static [u8]> {
        match self {
            Self::Dilithium5 => None,
            Self::MlDsa87 => Some(ML_DSA_87_CONTEXT),
        }
    }

    /// Artifacts in an output bundle, in write order.
    #[must_use]
    pub const fn artifacts(self) -> &'static [ArtifactKind] {
        match self {
            Self::Dilithium5 => DILITHIUM5_ARTIFACTS,
            Self::MlDsa87 => ML_DSA_87_ARTIFACTS,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Scheme {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dilithium5" => Ok(Self::Dilithium5),
            "mldsa87" | "ml-dsa-87" => Ok(Self::MlDsa87),
            _ => Err(VectorError::UnknownScheme(s.to_string())),
        }
    }
}
