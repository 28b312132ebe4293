// Error types for the Schmidt-Samoa crate

use std::io;

/// Errors that can occur during key generation, encryption and decryption
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: u64, actual: u64 },

    #[error("Cannot construct a prime of {0} bits")]
    InvalidPrimeSize(u64),

    #[error("Modulus of {bits} bits is too small to hold a data block")]
    ModulusTooSmall { bits: u64 },

    #[error("No modular inverse exists")]
    NoInverse,

    #[error("Malformed ciphertext on line {line}")]
    MalformedCiphertext { line: usize },

    #[error("Decrypted block is not framed by the sentinel byte")]
    InvalidBlock,

    #[error("Malformed key file: {0}")]
    MalformedKey(String),

    #[error("Invalid username {0:?}: must be non-empty and contain no whitespace")]
    InvalidUsername(String),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
