// Schmidt-Samoa Module - Main module file
// Exports all Schmidt-Samoa functionality

pub mod bigint;
pub mod block;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod randstate;

pub use bigint::{gcd, is_prime, lcm, make_prime, mod_inverse, pow_mod, Prime};
pub use block::{decrypt_block_size, encrypt_block_size, pack_block, unpack_block, SENTINEL};
pub use decrypt::{decrypt, decrypt_bytes, decrypt_file, decrypt_to_string};
pub use encrypt::{encrypt, encrypt_bytes, encrypt_file, encrypt_string};
pub use keygen::{
    generate_keypair, make_private_key, make_public_key, SsKeyPair, SsPrivateKey, SsPublicKey,
    MIN_KEY_BITS,
};
pub use randstate::RandState;
