// Utilities - configuration and key file I/O

pub mod config;
pub mod keyfile;

pub use config::{KeygenConfig, DEFAULT_PRIVATE_KEY_FILE, DEFAULT_PUBLIC_KEY_FILE};
pub use keyfile::{
    load_private_key, load_public_key, read_private_key, read_public_key, save_private_key,
    save_public_key, write_private_key, write_public_key,
};
