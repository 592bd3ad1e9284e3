//! Optional JSON configuration for output location and layout.
//!
//! Only *where* and *how* a bundle is written is configurable. Seeds,
//! messages and contexts are compiled in and have no configuration knob.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bundle::{BundleConfig, OutputLayout, DEFAULT_PRODUCER};
use crate::error::VectorError;

/// Settings read from `--config <file>`.
///
/// Every field is optional in the file; [`Default`] supplies the rest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root the bundle is written under. `None` means the OS temp directory,
    /// resolved by the caller.
    #[serde(default)]
    pub output_root: Option<PathBuf>,

    #[serde(default)]
    pub layout: OutputLayout,

    /// File-name prefix identifying the producing implementation.
    #[serde(default = "default_producer")]
    pub producer: String,

    /// Write `.hex` copies of the public key and signature.
    #[serde(default)]
    pub hex_copies: bool,

    /// Verify each signature before writing it.
    #[serde(default = "default_self_verify")]
    pub self_verify: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            layout: OutputLayout::default(),
            producer: default_producer(),
            hex_copies: false,
            self_verify: default_self_verify(),
        }
    }
}

fn default_producer() -> String {
    DEFAULT_PRODUCER.into()
}

const fn default_self_verify() -> bool {
    true
}

impl GeneratorConfig {
    /// Parse a configuration file.
    ///
    /// Unlike an implicit settings file, an explicitly named configuration
    /// that is missing or malformed is an error: generation must not run
    /// against a location the operator did not ask for.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Config`] if the file cannot be read or parsed,
    /// or if the producer prefix is unusable in a file name.
    pub fn load(path: &Path) -> Result<Self, VectorError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| VectorError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| VectorError::Config(format!("invalid {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject producer prefixes that would escape the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Config`] describing the problem.
    pub fn validate(&self) -> Result<(), VectorError> {
        validate_producer(&self.producer)
    }

    /// Build the bundle location, with `root` standing in for an unset
    /// `outputRoot`.
    #[must_use]
    pub fn bundle_config(&self, fallback_root: &Path) -> BundleConfig {
        let root = self
            .output_root
            .clone()
            .unwrap_or_else(|| fallback_root.to_path_buf());
        BundleConfig::new(root)
            .with_layout(self.layout)
            .with_producer(self.producer.clone())
            .with_hex_copies(self.hex_copies)
    }
}

/// Producer prefixes become part of file names: non-empty, no separators.
///
/// # Errors
///
/// Returns [`VectorError::Config`] for an empty prefix or one containing
/// anything other than ASCII alphanumerics, `-` and `_`.
pub fn validate_producer(producer: &str) -> Result<(), VectorError> {
    if producer.is_empty() {
        return Err(VectorError::Config("producer prefix is empty".into()));
    }
    if !producer
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(VectorError::Config(format!(
            "producer prefix {producer:?} may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
