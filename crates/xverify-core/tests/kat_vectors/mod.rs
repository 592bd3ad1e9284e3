use sha2::{Digest, Sha256};

mod dilithium5;
mod mldsa87;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
