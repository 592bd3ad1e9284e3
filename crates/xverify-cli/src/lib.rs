//! `xverify`: command-line front end for `xverify-core`.
//!
//! The binaries are thin: they parse arguments, install logging and hand a
//! stdout writer to [`run`]. Everything else lives here so the whole flow
//! can be driven from tests without spawning a process.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod logging;
pub mod report;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use xverify_core::{
    generate_with, verify_bundle, write_bundle, ArtifactSink, FsSink, GeneratorConfig,
    LoadedBundle, OutputLayout, Scheme, VectorError, VectorInputs, WrittenBundle,
};

pub use error::CliError;

/// Top-level arguments of the `xverify` binary.
#[derive(Debug, Parser)]
#[command(
    name = "xverify",
    version,
    about = "Produce and check Dilithium5 / ML-DSA-87 cross-verification bundles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the reference vector for a scheme and write its bundle.
    Generate {
        /// dilithium5 or mldsa87
        scheme: Scheme,

        #[command(flatten)]
        output: OutputArgs,

        /// Write the bundle without verifying the signature first.
        #[arg(long)]
        no_self_verify: bool,
    },

    /// Read a bundle back and verify its signature.
    Verify {
        /// dilithium5 or mldsa87
        scheme: Scheme,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments of the single-scheme `dilithium5-sign` / `mldsa87-sign` binaries.
#[derive(Debug, Parser)]
#[command(version)]
pub struct SignerCli {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Write the bundle without verifying the signature first.
    #[arg(long)]
    pub no_self_verify: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the bundle goes. Flags override the `--config` file.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Directory the bundle is written under [default: OS temp dir]
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// isolated (default) or legacy
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<OutputLayout>,

    /// File-name prefix identifying the producer [default: goqrllib]
    #[arg(long, value_name = "NAME")]
    pub producer: Option<String>,

    /// Also write .hex copies of the public key and signature.
    #[arg(long)]
    pub hex: bool,

    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl OutputArgs {
    /// Merge flags over the configuration file over defaults.
    ///
    /// # Errors
    ///
    /// [`VectorError::Config`] if the named file cannot be loaded or the
    /// resulting producer prefix is invalid.
    pub fn resolve(&self) -> Result<GeneratorConfig, VectorError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(root) = &self.output_root {
            config.output_root = Some(root.clone());
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(producer) = &self.producer {
            config.producer.clone_from(producer);
        }
        if self.hex {
            config.hex_copies = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Dispatch a parsed subcommand, writing the report to `out`.
///
/// # Errors
///
/// The first failing step, see [`generate`] and [`verify`].
pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::Generate {
            scheme,
            output,
            no_self_verify,
        } => generate(*scheme, output, !*no_self_verify, out).map(drop),
        Command::Verify { scheme, output } => verify(*scheme, output, out).map(drop),
    }
}

/// Generate the reference vector for `scheme` and write its bundle.
///
/// Self-verification runs when both `self_verify` and the configuration
/// allow it.
///
/// # Errors
///
/// Configuration, derivation, signing, self-verification, directory and
/// artifact-write failures, in pipeline order.
pub fn generate<W: Write>(
    scheme: Scheme,
    output: &OutputArgs,
    self_verify: bool,
    out: &mut W,
) -> Result<WrittenBundle, CliError> {
    generate_with_sink(scheme, output, self_verify, &mut FsSink, out)
}

/// [`generate`] writing artifacts through `sink`.
///
/// The completion line is only reported once every artifact is written.
///
/// # Errors
///
/// As [`generate`].
pub fn generate_with_sink<S: ArtifactSink, W: Write>(
    scheme: Scheme,
    output: &OutputArgs,
    self_verify: bool,
    sink: &mut S,
    out: &mut W,
) -> Result<WrittenBundle, CliError> {
    let config = output.resolve()?;
    let bundle_config = config.bundle_config(&std::env::temp_dir());
    let self_verify = self_verify && config.self_verify;
    tracing::info!(
        scheme = %scheme,
        root = %bundle_config.root.display(),
        layout = %bundle_config.layout,
        self_verify,
        "generating vector"
    );

    let vector = generate_with(scheme, &VectorInputs::reference(scheme), self_verify)?;
    report::vector_summary(out, &bundle_config.producer, &vector)?;

    let written = write_bundle(&vector, &bundle_config, sink)?;
    report::written_files(out, &bundle_config.producer, &written)?;
    tracing::info!(dir = %written.dir.display(), files = written.files.len(), "bundle written");
    Ok(written)
}

/// Read the bundle for `scheme` back and verify it.
///
/// # Errors
///
/// Configuration, artifact-read, length and verification failures.
pub fn verify<W: Write>(
    scheme: Scheme,
    output: &OutputArgs,
    out: &mut W,
) -> Result<LoadedBundle, CliError> {
    let config = output.resolve()?;
    let bundle_config = config.bundle_config(&std::env::temp_dir());
    tracing::info!(
        scheme = %scheme,
        dir = %bundle_config.output_dir().display(),
        "verifying bundle"
    );

    let bundle = verify_bundle(&bundle_config, scheme)?;
    report::verified(out, &bundle_config.output_dir(), &bundle)?;
    Ok(bundle)
}

/// Map a run result to the process exit status, printing the diagnostic
/// for a failure to stderr.
#[must_use]
pub fn exit_code(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Shared body of the single-scheme binaries.
#[must_use]
pub fn sign_main(scheme: Scheme) -> ExitCode {
    let cli = SignerCli::parse();
    if let Err(err) = logging::init(cli.verbose) {
        return exit_code(Err(err));
    }
    let mut stdout = std::io::stdout().lock();
    exit_code(generate(scheme, &cli.output, !cli.no_self_verify, &mut stdout).map(drop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definitions_are_consistent() {
        Cli::command().debug_assert();
        SignerCli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = OutputArgs {
            output_root: Some(PathBuf::from("/srv/out")),
            layout: Some(OutputLayout::Legacy),
            producer: Some("qrypto".into()),
            hex: true,
            config: None,
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.output_root, Some(PathBuf::from("/srv/out")));
        assert_eq!(config.layout, OutputLayout::Legacy);
        assert_eq!(config.producer, "qrypto");
        assert!(config.hex_copies);
    }

    #[test]
    fn invalid_producer_flag_is_rejected() {
        let args = OutputArgs {
            producer: Some("../x".into()),
            ..OutputArgs::default()
        };
        assert!(matches!(args.resolve(), Err(VectorError::Config(_))));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
        let err = CliError::from(VectorError::KeyDerivation("boom".into()));
        assert_eq!(exit_code(Err(err)), ExitCode::FAILURE);
    }
}
