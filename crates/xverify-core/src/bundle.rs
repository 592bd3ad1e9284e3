//! Output bundles: the files an external verifier reads.
//!
//! Two layouts exist:
//!
//! - [`OutputLayout::Isolated`]: `<root>/qrypto_cross_verify/`, recreated
//!   on every run. Whatever sits at that path beforehand (file, symlink, or
//!   directory) is removed without following links, the directory is
//!   created `0700`, and every artifact is created exclusively with `0600`.
//! - [`OutputLayout::Legacy`]: artifacts written straight into `<root>`
//!   with default permissions. Superseded; kept for verifiers still reading
//!   the flat `/tmp` paths.
//!
//! File names are `<producer>_<scheme>_<artifact>.bin`.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::VectorError;
use crate::scheme::{Scheme, MAX_CONTEXT_LEN};
use crate::vector::{self, TestVector};

/// Directory created under the root by the isolated layout.
pub const ISOLATED_DIR_NAME: &str = "qrypto_cross_verify";

/// Producer prefix expected by the downstream verifier.
pub const DEFAULT_PRODUCER: &str = "goqrllib";

/// Directory mode for the isolated layout.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Artifact file mode for the isolated layout.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

// ---------------------------------------------------------------------------
// Artifacts and layout
// ---------------------------------------------------------------------------

/// One file of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    PublicKey,
    Signature,
    Message,
    Context,
}

impl ArtifactKind {
    /// Artifact segment of the file name.
    #[must_use]
    pub const fn file_tag(self) -> &'static str {
        match self {
            Self::PublicKey => "pk",
            Self::Signature => "sig",
            Self::Message => "msg",
            Self::Context => "ctx",
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PublicKey => "public key",
            Self::Signature => "signature",
            Self::Message => "message",
            Self::Context => "context",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where and how a bundle is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// Dedicated, symlink-safe, owner-only directory.
    #[default]
    Isolated,
    /// Flat files directly under the root.
    Legacy,
}

impl OutputLayout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputLayout {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isolated" => Ok(Self::Isolated),
            "legacy" => Ok(Self::Legacy),
            _ => Err(VectorError::UnknownLayout(s.to_string())),
        }
    }
}

/// Resolved location of a bundle.
///
/// `root` is always passed in explicitly; nothing here consults the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub root: PathBuf,
    pub layout: OutputLayout,
    pub producer: String,
    /// Also write `.hex` copies of the public key and signature.
    pub hex_copies: bool,
}

impl BundleConfig {
    /// Isolated layout under `root` with the default producer prefix.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: OutputLayout::Isolated,
            producer: DEFAULT_PRODUCER.to_string(),
            hex_copies: false,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    #[must_use]
    pub const fn with_hex_copies(mut self, hex_copies: bool) -> Self {
        self.hex_copies = hex_copies;
        self
    }

    /// Directory the artifacts land in.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        match self.layout {
            OutputLayout::Isolated => self.root.join(ISOLATED_DIR_NAME),
            OutputLayout::Legacy => self.root.clone(),
        }
    }

    fn file_stem(&self, scheme: Scheme, artifact: ArtifactKind) -> String {
        format!(
            "{}_{}_{}",
            self.producer,
            scheme.file_tag(),
            artifact.file_tag()
        )
    }

    /// Path of the binary artifact file.
    #[must_use]
    pub fn artifact_path(&self, scheme: Scheme, artifact: ArtifactKind) -> PathBuf {
        self.output_dir()
            .join(format!("{}.bin", self.file_stem(scheme, artifact)))
    }

    /// Path of the hex debugging copy of an artifact.
    #[must_use]
    pub fn hex_path(&self, scheme: Scheme, artifact: ArtifactKind) -> PathBuf {
        self.output_dir()
            .join(format!("{}.hex", self.file_stem(scheme, artifact)))
    }
}

// ---------------------------------------------------------------------------
// Write seam
// ---------------------------------------------------------------------------

/// Destination for artifact bytes.
///
/// [`FsSink`] writes real files; tests substitute sinks that fail on a
/// chosen artifact.
pub trait ArtifactSink {
    /// Write `contents` to `path` following the rules of `layout`.
    ///
    /// # Errors
    ///
    /// Any I/O failure; the caller aborts the bundle on the first one.
    fn write_artifact(&mut self, path: &Path, contents: &[u8], layout: OutputLayout)
        -> io::Result<()>;
}

/// Filesystem-backed [`ArtifactSink`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl ArtifactSink for FsSink {
    fn write_artifact(
        &mut self,
        path: &Path,
        contents: &[u8],
        layout: OutputLayout,
    ) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true);
        match layout {
            // The directory was just recreated, so an existing entry means
            // someone raced us; create_new refuses it (and refuses symlinks).
            OutputLayout::Isolated => {
                options.create_new(true);
                #[cfg(unix)]
                {
                    use std::os::unix::fs::OpenOptionsExt;
                    options.mode(FILE_MODE);
                }
            }
            OutputLayout::Legacy => {
                options.create(true).truncate(true);
            }
        }
        let mut file = options.open(path)?;
        file.write_all(contents)?;
        file.sync_all()
    }
}

// ---------------------------------------------------------------------------
// Directory preparation
// ---------------------------------------------------------------------------

/// Remove whatever exists at `dir` and create a fresh owner-only directory.
///
/// A symlink is unlinked, never followed, so a pre-planted link cannot
/// redirect the writes.
///
/// # Errors
///
/// Returns [`VectorError::OutputDirectory`] if removal or creation fails,
/// including when the path is re-occupied between the two.
pub fn prepare_isolated_dir(dir: &Path) -> Result<(), VectorError> {
    let dir_err = |source: io::Error| VectorError::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    };

    match fs::symlink_metadata(dir) {
        Ok(meta) if meta.file_type().is_dir() => {
            tracing::debug!(path = %dir.display(), "removing existing output directory");
            fs::remove_dir_all(dir).map_err(dir_err)?;
        }
        Ok(_) => {
            tracing::debug!(path = %dir.display(), "removing file or symlink at output path");
            fs::remove_file(dir).map_err(dir_err)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(dir_err(e)),
    }

    if let Some(parent) = dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(dir_err)?;
    }
    create_owner_only_dir(dir).map_err(dir_err)
}

/// Create exactly `dir` (parent must exist) with mode `0700`.
///
/// Fails with `AlreadyExists` if anything, including a directory someone
/// else just created, occupies the path.
fn create_owner_only_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

// ---------------------------------------------------------------------------
// Write / read
// ---------------------------------------------------------------------------

/// Paths written for one bundle, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBundle {
    pub dir: PathBuf,
    pub files: Vec<(ArtifactKind, PathBuf)>,
    pub hex_files: Vec<PathBuf>,
}

impl WrittenBundle {
    /// Path of `artifact`, if it was written.
    #[must_use]
    pub fn path_of(&self, artifact: ArtifactKind) -> Option<&Path> {
        self.files
            .iter()
            .find(|(kind, _)| *kind == artifact)
            .map(|(_, path)| path.as_path())
    }
}

fn artifact_bytes(vector: &TestVector, artifact: ArtifactKind) -> &[u8] {
    match artifact {
        ArtifactKind::PublicKey => &vector.public_key,
        ArtifactKind::Signature => &vector.signature,
        ArtifactKind::Message => &vector.message,
        ArtifactKind::Context => vector.context_bytes(),
    }
}

/// Persist `vector` according to `config`.
///
/// Either every artifact of the scheme is written, or an error naming the
/// first failed artifact is returned and the run must be treated as failed.
///
/// # Errors
///
/// [`VectorError::OutputDirectory`] or [`VectorError::ArtifactWrite`].
pub fn write_bundle<S: ArtifactSink>(
    vector: &TestVector,
    config: &BundleConfig,
    sink: &mut S,
) -> Result<WrittenBundle, VectorError> {
    let dir = config.output_dir();
    match config.layout {
        OutputLayout::Isolated => prepare_isolated_dir(&dir)?,
        OutputLayout::Legacy => {
            fs::create_dir_all(&dir).map_err(|source| VectorError::OutputDirectory {
                path: dir.clone(),
                source,
            })?;
        }
    }

    let scheme = vector.scheme;
    let mut files = Vec::with_capacity(scheme.artifacts().len());
    for &artifact in scheme.artifacts() {
        let path = config.artifact_path(scheme, artifact);
        sink.write_artifact(&path, artifact_bytes(vector, artifact), config.layout)
            .map_err(|source| VectorError::ArtifactWrite {
                artifact,
                path: path.clone(),
                source,
            })?;
        tracing::debug!(artifact = artifact.label(), path = %path.display(), "artifact written");
        files.push((artifact, path));
    }

    let mut hex_files = Vec::new();
    if config.hex_copies {
        for artifact in [ArtifactKind::PublicKey, ArtifactKind::Signature] {
            let path = config.hex_path(scheme, artifact);
            let encoded = hex::encode(artifact_bytes(vector, artifact));
            sink.write_artifact(&path, encoded.as_bytes(), config.layout)
                .map_err(|source| VectorError::ArtifactWrite {
                    artifact,
                    path: path.clone(),
                    source,
                })?;
            hex_files.push(path);
        }
    }

    Ok(WrittenBundle {
        dir,
        files,
        hex_files,
    })
}

/// Artifacts read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBundle {
    pub scheme: Scheme,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    pub message: Vec<u8>,
    /// Present only for context-carrying schemes.
    pub context: Option<Vec<u8>>,
}

fn read_artifact(
    config: &BundleConfig,
    scheme: Scheme,
    artifact: ArtifactKind,
) -> Result<Vec<u8>, VectorError> {
    let path = config.artifact_path(scheme, artifact);
    fs::read(&path).map_err(|source| VectorError::ArtifactRead {
        artifact,
        path,
        source,
    })
}

/// Load the bundle for `scheme` written under `config`.
///
/// # Errors
///
/// [`VectorError::ArtifactRead`] for a missing or unreadable file and
/// [`VectorError::InvalidLength`] if the public key or signature has the
/// wrong size, or the context exceeds 255 bytes.
pub fn read_bundle(config: &BundleConfig, scheme: Scheme) -> Result<LoadedBundle, VectorError> {
    let public_key = read_artifact(config, scheme, ArtifactKind::PublicKey)?;
    if public_key.len() != scheme.public_key_len() {
        return Err(VectorError::InvalidLength {
            what: "public key",
            actual: public_key.len(),
            expected: scheme.public_key_len(),
        });
    }
    let signature = read_artifact(config, scheme, ArtifactKind::Signature)?;
    if signature.len() != scheme.signature_len() {
        return Err(VectorError::InvalidLength {
            what: "signature",
            actual: signature.len(),
            expected: scheme.signature_len(),
        });
    }
    let message = read_artifact(config, scheme, ArtifactKind::Message)?;
    let context = if scheme.supports_context() {
        let context = read_artifact(config, scheme, ArtifactKind::Context)?;
        if context.len() > MAX_CONTEXT_LEN {
            return Err(VectorError::InvalidLength {
                what: "context",
                actual: context.len(),
                expected: MAX_CONTEXT_LEN,
            });
        }
        Some(context)
    } else {
        None
    };

    Ok(LoadedBundle {
        scheme,
        public_key,
        signature,
        message,
        context,
    })
}

/// Load and verify the bundle for `scheme`.
///
/// # Errors
///
/// Any [`read_bundle`] error, or [`VectorError::VerificationFailed`].
pub fn verify_bundle(config: &BundleConfig, scheme: Scheme) -> Result<LoadedBundle, VectorError> {
    let bundle = read_bundle(config, scheme)?;
    vector::verify(
        scheme,
        &bundle.public_key,
        &bundle.message,
        bundle.context.as_deref(),
        &bundle.signature,
    )?;
    Ok(bundle)
}
