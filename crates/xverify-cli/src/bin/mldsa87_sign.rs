//! Writes the ML-DSA-87 reference bundle (context `ZOND`).

use std::process::ExitCode;

use xverify_core::Scheme;

fn main() -> ExitCode {
    xverify::sign_main(Scheme::MlDsa87)
}
