// Schmidt-Samoa Key Generation
// Builds the public modulus n = p^2 * q and the private exponent d

use std::io::{BufRead, Read, Write};

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::Zero;

use super::bigint::{lcm, make_prime, mod_inverse, Prime};
use super::randstate::RandState;
use crate::error::{Error, Result};
use crate::util::config::KeygenConfig;

/// Smallest modulus that still leaves room for one payload byte per block
pub const MIN_KEY_BITS: u64 = 40;

/// Schmidt-Samoa Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsPublicKey {
    n: BigUint,
    username: String,
}

/// Schmidt-Samoa Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsPrivateKey {
    pq: BigUint, // p * q, the decryption modulus
    d: BigUint,  // (p^2 * q)^(-1) mod lcm(p-1, q-1)
}

/// Schmidt-Samoa Key Pair
///
/// Keeps the secret primes around for diagnostics; they are never written
/// to a key file.
#[derive(Debug, Clone)]
pub struct SsKeyPair {
    pub public_key: SsPublicKey,
    pub private_key: SsPrivateKey,
    pub p: Prime,
    pub q: Prime,
    pub bit_length: u64,
}

impl SsPublicKey {
    /// Username must be non-empty and free of whitespace so the key file
    /// stays two whitespace-separated tokens.
    pub fn new(n: BigUint, username: impl Into<String>) -> Result<Self> {
        let username = username.into();
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(Error::InvalidUsername(username));
        }
        Ok(Self { n, username })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a byte stream into hex ciphertext lines
    /// Returns the number of blocks written
    pub fn encrypt<R: Read, W: Write>(&self, input: &mut R, output: &mut W) -> Result<u64> {
        super::encrypt::encrypt_file(input, output, &self.n)
    }
}

impl SsPrivateKey {
    pub fn new(pq: BigUint, d: BigUint) -> Self {
        Self { pq, d }
    }

    pub fn pq(&self) -> &BigUint {
        &self.pq
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Get the bit length of the decryption modulus
    pub fn bit_length(&self) -> u64 {
        self.pq.bits()
    }

    /// Decrypt hex ciphertext lines back into bytes
    /// Returns the number of blocks read
    pub fn decrypt<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<u64> {
        super::decrypt::decrypt_file(input, output, &self.d, &self.pq)
    }
}

/// Generate the secret primes and public modulus
///
/// Draws p with a random size in [bits/5, 2*bits/5) and sizes q to make up
/// the rest, retrying with fresh primes until:
/// - n = p^2 * q has at least `bits` bits
/// - p != q
/// - p mod (q-1) != 0 and q mod (p-1) != 0
/// - p does not divide q-1 and q does not divide p-1
pub fn make_public_key(
    bits: u64,
    iterations: u32,
    rng: &mut RandState,
) -> Result<(Prime, Prime, BigUint)> {
    if bits < MIN_KEY_BITS {
        return Err(Error::InvalidKeySize {
            min: MIN_KEY_BITS,
            actual: bits,
        });
    }

    let low = bits / 5;
    let high = (2 * bits) / 5;

    loop {
        // Step 1: Split the bit budget between p^2 and q
        let p_bits = rng.gen_range_u64(low, high);
        let q_bits = bits - 2 * p_bits;

        // Step 2: Generate two random primes p and q
        let p = make_prime(p_bits, iterations, rng)?;
        let q = make_prime(q_bits, iterations, rng)?;

        // Step 3: Compute n = p^2 * q
        let n = p.value() * p.value() * q.value();

        if n.bits() < bits {
            debug!("rejected n of {} bits, need {}", n.bits(), bits);
            continue;
        }
        if p == q {
            debug!("rejected p == q");
            continue;
        }

        // Step 4: Guard against degenerate factorizations
        let p_minus_1 = p.value() - 1u8;
        let q_minus_1 = q.value() - 1u8;

        if (p.value() % &q_minus_1).is_zero() || (q.value() % &p_minus_1).is_zero() {
            debug!("rejected primes: p mod (q-1) or q mod (p-1) is zero");
            continue;
        }
        if (&q_minus_1 % p.value()).is_zero() || (&p_minus_1 % q.value()).is_zero() {
            debug!("rejected primes: p divides q-1 or q divides p-1");
            continue;
        }

        return Ok((p, q, n));
    }
}

/// Derive the private key from the secret primes
///
/// d is the inverse of p^2 * q modulo lambda = lcm(p-1, q-1).
pub fn make_private_key(p: &Prime, q: &Prime) -> Result<SsPrivateKey> {
    let p_minus_1 = p.value() - 1u8;
    let q_minus_1 = q.value() - 1u8;

    let lambda = lcm(&p_minus_1, &q_minus_1);

    let pq = p.value() * q.value();
    let n = &pq * p.value();

    let d = mod_inverse(&n, &lambda);
    if d.is_zero() {
        return Err(Error::NoInverse);
    }

    Ok(SsPrivateKey { pq, d })
}

/// Generate a Schmidt-Samoa key pair from a configuration
pub fn generate_keypair(config: &KeygenConfig) -> Result<SsKeyPair> {
    let mut rng = match config.seed {
        Some(seed) => RandState::new(seed),
        None => RandState::from_entropy(),
    };

    let (p, q, n) = make_public_key(config.bits, config.iterations, &mut rng)?;
    let private_key = make_private_key(&p, &q)?;
    let public_key = SsPublicKey::new(n, config.resolve_username())?;

    info!(
        "generated key pair for {}: n = {} bits (p = {} bits, q = {} bits), pq = {} bits",
        public_key.username(),
        public_key.bit_length(),
        p.bits(),
        q.bits(),
        private_key.bit_length()
    );

    Ok(SsKeyPair {
        public_key,
        private_key,
        p,
        q,
        bit_length: config.bits,
    })
}
