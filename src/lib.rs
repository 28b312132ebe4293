//! Schmidt-Samoa public-key encryption over arbitrary byte streams.
//!
//! Keys are built from two random primes p and q: the public modulus is
//! n = p²q and the private key is (pq, d) with d = n⁻¹ mod lcm(p-1, q-1).
//! Data is split into blocks led by a `0xFF` sentinel byte, each block is
//! encrypted as c = m^n mod n and written as one hexadecimal line.
//!
//! This is a textbook trapdoor permutation: there is no integrity
//! protection and no defense against timing side channels.
//!
//! ```rust,no_run
//! use ss_cipher::{decrypt_bytes, encrypt_bytes, generate_keypair, KeygenConfig};
//!
//! let config = KeygenConfig::default().with_bits(256).with_seed(42);
//! let keypair = generate_keypair(&config).expect("key generation failed");
//!
//! let ciphertext = encrypt_bytes(b"hello", keypair.public_key.n()).expect("encryption failed");
//! let plaintext = decrypt_bytes(&ciphertext, &keypair.private_key).expect("decryption failed");
//! assert_eq!(plaintext, b"hello");
//! ```

pub mod error;
pub mod ss;
pub mod util;

pub use error::{Error, Result};
pub use ss::*;
pub use util::*;
