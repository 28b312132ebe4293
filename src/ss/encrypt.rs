// Schmidt-Samoa Encryption Implementation
// Encrypts byte streams block by block into hex ciphertext lines

use std::io::{Cursor, Read, Write};

use log::{debug, trace};
use num_bigint::BigUint;

use super::bigint::pow_mod;
use super::block::{encrypt_block_size, fill_block, pack_block, SENTINEL};
use crate::error::Result;

/// Encrypt one block: c = m^n mod n
pub fn encrypt(m: &BigUint, n: &BigUint) -> BigUint {
    pow_mod(m, n, n)
}

/// Encrypt everything `input` yields, writing one hex line per block
/// Returns the number of blocks written
///
/// Every block carries up to k-1 payload bytes behind the sentinel. A short
/// read ends the stream, so an empty or block-aligned input still ends with
/// one block holding fewer than k-1 bytes.
pub fn encrypt_file<R, W>(input: &mut R, output: &mut W, n: &BigUint) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let k = encrypt_block_size(n)?;

    let mut block = vec![0u8; k];
    block[0] = SENTINEL;

    let mut blocks = 0u64;

    loop {
        let j = fill_block(input, &mut block[1..])?;

        let m = pack_block(&block[..=j]);
        let c = encrypt(&m, n);
        writeln!(output, "{:x}", c)?;

        blocks += 1;
        trace!("encrypted block {} ({} bytes)", blocks, j);

        if j < k - 1 {
            break;
        }
    }

    output.flush()?;
    debug!("encrypted {} blocks of up to {} bytes", blocks, k - 1);

    Ok(blocks)
}

/// Encrypt bytes into hex ciphertext text
pub fn encrypt_bytes(plaintext: &[u8], n: &BigUint) -> Result<String> {
    let mut input = Cursor::new(plaintext);
    let mut output = Vec::new();

    encrypt_file(&mut input, &mut output, n)?;

    // Output is hex digits and newlines only
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Encrypt a string into hex ciphertext text
pub fn encrypt_string(plaintext: &str, n: &BigUint) -> Result<String> {
    encrypt_bytes(plaintext.as_bytes(), n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ss::keygen::make_public_key;
    use crate::ss::randstate::RandState;
    use crate::Error;

    fn test_modulus() -> BigUint {
        let mut rng = RandState::new(31);
        make_public_key(256, 20, &mut rng).unwrap().2
    }

    #[test]
    fn test_encrypt_is_modpow_with_modulus_exponent() {
        let n = test_modulus();
        let m = BigUint::from(0xFF_1234u32);

        assert_eq!(encrypt(&m, &n), m.modpow(&n, &n));
    }

    #[test]
    fn test_encrypt_bytes_line_count() {
        let n = test_modulus();
        let k = encrypt_block_size(&n).unwrap();

        // Short message: one block
        let ciphertext = encrypt_bytes(b"Hello", &n).unwrap();
        assert_eq!(ciphertext.lines().count(), 1);

        // Three full blocks plus a trailing sentinel-only block
        let message = vec![0x41u8; 3 * (k - 1)];
        let ciphertext = encrypt_bytes(&message, &n).unwrap();
        assert_eq!(ciphertext.lines().count(), 4);

        // Partial final block
        let message = vec![0x41u8; 2 * (k - 1) + 1];
        let ciphertext = encrypt_bytes(&message, &n).unwrap();
        assert_eq!(ciphertext.lines().count(), 3);
    }

    #[test]
    fn test_encrypt_empty() {
        let n = test_modulus();

        let ciphertext = encrypt_bytes(b"", &n).unwrap();
        let expected = encrypt(&BigUint::from(SENTINEL), &n);

        assert_eq!(ciphertext, format!("{:x}\n", expected));
    }

    #[test]
    fn test_encrypt_lines_are_lowercase_hex() {
        let n = test_modulus();
        let ciphertext = encrypt_string("Test message", &n).unwrap();

        for line in ciphertext.lines() {
            assert!(!line.is_empty());
            assert!(line.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert!(BigUint::parse_bytes(line.as_bytes(), 16).unwrap() < n);
        }
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let n = test_modulus();
        assert_eq!(
            encrypt_string("same input", &n).unwrap(),
            encrypt_string("same input", &n).unwrap()
        );
    }

    #[test]
    fn test_encrypt_modulus_too_small() {
        let n = BigUint::from(1_000_003u64);
        assert!(matches!(
            encrypt_bytes(b"x", &n),
            Err(Error::ModulusTooSmall { .. })
        ));
    }
}
