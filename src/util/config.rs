// Key Generation Configuration
// Parameters for one key generation run

use std::env;

/// Default public key file name
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "ss.pub";

/// Default private key file name
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "ss.priv";

/// Configuration for key generation
#[derive(Clone, Debug)]
pub struct KeygenConfig {
    /// Minimum bits of the public modulus n
    pub bits: u64,
    /// Miller-Rabin rounds per prime candidate
    pub iterations: u32,
    /// Fixed seed for reproducible keys; OS entropy when unset
    pub seed: Option<u64>,
    /// Owner label stored in the public key; `$USER` when unset
    pub username: Option<String>,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            bits: 256,
            iterations: 50,
            seed: None,
            username: None,
        }
    }
}

impl KeygenConfig {
    pub fn with_bits(mut self, bits: u64) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Username to store in the public key
    pub fn resolve_username(&self) -> String {
        self.username
            .clone()
            .or_else(|| env::var("USER").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeygenConfig::default();
        assert_eq!(config.bits, 256);
        assert_eq!(config.iterations, 50);
        assert!(config.seed.is_none());
        assert!(!config.resolve_username().is_empty());
    }

    #[test]
    fn test_builder() {
        let config = KeygenConfig::default()
            .with_bits(1024)
            .with_iterations(25)
            .with_seed(42)
            .with_username("carol");

        assert_eq!(config.bits, 1024);
        assert_eq!(config.iterations, 25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolve_username(), "carol");
    }
}
