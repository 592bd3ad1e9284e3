//! Human-readable progress report.
//!
//! Informational only. Verifiers read the bundle files, never this output.

use std::io::{self, Write};
use std::path::Path;

use xverify_core::{LoadedBundle, TestVector, WrittenBundle};

/// Header, inputs and key/signature summary for a generated vector.
///
/// # Errors
///
/// Any error from `out`.
pub fn vector_summary<W: Write>(
    out: &mut W,
    producer: &str,
    vector: &TestVector,
) -> io::Result<()> {
    writeln!(out, "=== {producer} {} Signature Generation ===", vector.scheme)?;
    writeln!(out, "Seed: {}", vector.seed.to_hex())?;
    writeln!(out, "Message: {:?}", String::from_utf8_lossy(&vector.message))?;
    if vector.scheme.supports_context() {
        writeln!(
            out,
            "Context: {:?}",
            String::from_utf8_lossy(vector.context_bytes())
        )?;
    }
    writeln!(out, "Public key size: {} bytes", vector.public_key.len())?;
    writeln!(out, "Signature size: {} bytes", vector.signature.len())?;
    writeln!(
        out,
        "Public key (first 32 bytes): {}",
        vector.public_key_prefix_hex()
    )?;
    writeln!(
        out,
        "Signature (first 32 bytes): {}",
        vector.signature_prefix_hex()
    )
}

/// List of written files and the completion line.
///
/// # Errors
///
/// Any error from `out`.
pub fn written_files<W: Write>(
    out: &mut W,
    producer: &str,
    bundle: &WrittenBundle,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Output files written:")?;
    for (_, path) in &bundle.files {
        file_line(out, path)?;
    }
    for path in &bundle.hex_files {
        file_line(out, path)?;
    }
    writeln!(out)?;
    writeln!(out, "✓ {producer} signature generation complete")
}

/// Result line for a bundle read back and verified.
///
/// # Errors
///
/// Any error from `out`.
pub fn verified<W: Write>(out: &mut W, dir: &Path, bundle: &LoadedBundle) -> io::Result<()> {
    writeln!(out, "=== {} Signature Verification ===", bundle.scheme)?;
    writeln!(out, "Bundle: {}", dir.display())?;
    writeln!(out, "Public key size: {} bytes", bundle.public_key.len())?;
    writeln!(out, "Signature size: {} bytes", bundle.signature.len())?;
    writeln!(out, "✓ {} signature verified", bundle.scheme)
}

fn file_line<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "  {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xverify_core::{generate, Scheme, VectorInputs};

    #[test]
    fn mldsa87_summary_includes_context() {
        let vector = generate(Scheme::MlDsa87, &VectorInputs::reference(Scheme::MlDsa87)).unwrap();
        let mut out = Vec::new();
        vector_summary(&mut out, "goqrllib", &vector).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== goqrllib ML-DSA-87 Signature Generation ===\n"));
        assert!(text.contains(&format!("Seed: {}\n", "00".repeat(32))));
        assert!(text.contains("Message: \"Cross-verification test message for ML-DSA-87\"\n"));
        assert!(text.contains("Context: \"ZOND\"\n"));
        assert!(text.contains("Public key size: 2592 bytes\n"));
        assert!(text.contains("Signature size: 4627 bytes\n"));
    }

    #[test]
    fn dilithium5_summary_has_no_context_line() {
        let vector =
            generate(Scheme::Dilithium5, &VectorInputs::reference(Scheme::Dilithium5)).unwrap();
        let mut out = Vec::new();
        vector_summary(&mut out, "goqrllib", &vector).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("Context:"));
        assert!(text.contains("Signature size: 4595 bytes\n"));
    }
}
