//! Writes the Dilithium5 reference bundle.

use std::process::ExitCode;

use xverify_core::Scheme;

fn main() -> ExitCode {
    xverify::sign_main(Scheme::Dilithium5)
}
