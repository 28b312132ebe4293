// Schmidt-Samoa Number Theory
// Modular arithmetic and prime generation on top of num-bigint

use std::ops::Deref;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::randstate::RandState;
use crate::error::{Error, Result};

/// Odd primes below 100, used to reject candidates before Miller-Rabin
const SMALL_PRIMES: [u32; 24] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// A big integer that passed the Miller-Rabin test.
///
/// Only [`make_prime`] produces values of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prime(BigUint);

impl Prime {
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_known(value: u64) -> Self {
        Prime(BigUint::from(value))
    }
}

impl Deref for Prime {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Create a big integer from u64
pub fn from_u64(n: u64) -> BigUint {
    BigUint::from(n)
}

/// Parse a plain hexadecimal string
///
/// Only ASCII hex digits are accepted: no sign, no `_` separators, no
/// whitespace. Returns None for anything else, including the empty string.
pub fn from_hex(text: &str) -> Option<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 16)
}

/// Modular exponentiation: base^exponent mod modulus
///
/// Right-to-left square-and-multiply. An exponent of zero yields 1 (0 when
/// the modulus is 1).
///
/// # Panics
/// Panics if `modulus` is zero. [`mod_inverse`] instead returns its 0
/// sentinel for a zero modulus.
pub fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut v = BigUint::one();
    let mut p = base % modulus;
    let mut d = exponent.clone();

    while !d.is_zero() {
        if d.is_odd() {
            v = (&v * &p) % modulus;
        }
        p = (&p * &p) % modulus;
        d >>= 1;
    }

    v
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
///
/// Runs exactly `iterations` witness rounds after the small-prime sieve.
/// A prime is never reported as composite.
pub fn is_prime(n: &BigUint, iterations: u32, rng: &mut RandState) -> bool {
    if *n <= BigUint::one() {
        return false;
    }
    if *n == from_u64(2) || *n == from_u64(3) || *n == from_u64(5) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &small in SMALL_PRIMES.iter() {
        if *n == BigUint::from(small) {
            return true;
        }
        if (n % small).is_zero() {
            return false;
        }
    }

    // Write n-1 as r * 2^s with r odd
    let n_minus_1 = n - 1u8;
    let mut r = n_minus_1.clone();
    let mut s = 0u64;
    while r.is_even() {
        r >>= 1;
        s += 1;
    }

    let two = from_u64(2);

    for _ in 0..iterations {
        // Witness in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut y = pow_mod(&a, &r, n);

        if y.is_one() || y == n_minus_1 {
            continue;
        }

        let mut j = 1;
        while j < s && y != n_minus_1 {
            y = pow_mod(&y, &two, n);
            if y.is_one() {
                return false;
            }
            j += 1;
        }

        if y != n_minus_1 {
            return false;
        }
    }

    true
}

/// Generate a random prime of exactly `bits` bits
///
/// Retries until a candidate passes [`is_prime`].
pub fn make_prime(bits: u64, iterations: u32, rng: &mut RandState) -> Result<Prime> {
    if bits < 2 {
        return Err(Error::InvalidPrimeSize(bits));
    }

    let top_bit = BigUint::one() << (bits - 1);

    loop {
        let candidate = rng.gen_biguint(bits) | &top_bit;

        if is_prime(&candidate, iterations, rng) {
            return Ok(Prime(candidate));
        }
    }
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let t = &a % &b;
        a = b;
        b = t;
    }

    a
}

/// Least common multiple
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    (a * b) / gcd(a, b)
}

/// Compute modular inverse: a^(-1) mod n
///
/// Returns 0 if the inverse doesn't exist; callers must check for it.
/// A zero modulus has no inverses and also yields 0.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let modulus = BigInt::from(n.clone());

    let mut r = modulus.clone();
    let mut r_prime = BigInt::from(a.clone());
    let mut t = BigInt::zero();
    let mut t_prime = BigInt::one();

    while !r_prime.is_zero() {
        let q = r.div_floor(&r_prime);

        let next_r = &r - &q * &r_prime;
        r = std::mem::replace(&mut r_prime, next_r);

        let next_t = &t - &q * &t_prime;
        t = std::mem::replace(&mut t_prime, next_t);
    }

    if r > BigInt::one() {
        return BigUint::zero();
    }

    if t.is_negative() {
        t += &modulus;
    }

    // a >= n can leave t outside [0, n)
    t.mod_floor(&modulus)
        .to_biguint()
        .unwrap_or_else(BigUint::zero)
}
