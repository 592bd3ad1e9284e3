//! CLI error type.

use thiserror::Error;
use xverify_core::{Stage, VectorError};

#[derive(Debug, Error)]
pub enum CliError {
    /// A pipeline step failed.
    #[error("[{step}] {source}")]
    Vector {
        step: &'static str,
        #[source]
        source: VectorError,
    },

    /// The console report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// Logging could not be initialised.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<VectorError> for CliError {
    fn from(source: VectorError) -> Self {
        Self::Vector {
            step: step_name(source.stage()),
            source,
        }
    }
}

impl CliError {
    /// The failed pipeline stage, if the error came from one.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Vector { source, .. } => Some(source.stage()),
            Self::Report(_) | Self::Logging(_) => None,
        }
    }
}

const fn step_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Input => "input",
        Stage::KeyDerivation => "key derivation",
        Stage::Signing => "signing",
        Stage::SelfVerification => "self-verification",
        Stage::OutputDirectory => "output directory preparation",
        Stage::ArtifactWrite => "artifact write",
        Stage::ArtifactRead => "artifact read",
        Stage::Verification => "verification",
    }
}
