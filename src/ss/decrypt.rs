// Schmidt-Samoa Decryption Implementation
// Turns hex ciphertext lines back into the original bytes

use std::io::{BufRead, Write};

use log::{debug, trace};
use num_bigint::BigUint;

use super::bigint::{from_hex, pow_mod};
use super::block::{decrypt_block_size, unpack_block};
use super::keygen::SsPrivateKey;
use crate::error::{Error, Result};

/// Decrypt one block: m = c^d mod pq
pub fn decrypt(c: &BigUint, d: &BigUint, pq: &BigUint) -> BigUint {
    pow_mod(c, d, pq)
}

/// Decrypt hex ciphertext lines from `input`, writing the recovered bytes
/// Returns the number of blocks read
///
/// Blank lines are skipped and end of input is normal termination.
pub fn decrypt_file<R, W>(input: R, output: &mut W, d: &BigUint, pq: &BigUint) -> Result<u64>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let k = decrypt_block_size(pq)?;
    let mut blocks = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let hex = line.trim();
        if hex.is_empty() {
            continue;
        }

        let c = from_hex(hex)
            .ok_or(Error::MalformedCiphertext { line: index + 1 })?;

        let m = decrypt(&c, d, pq);
        let payload = unpack_block(&m, k)?;
        output.write_all(&payload)?;

        blocks += 1;
        trace!("decrypted block {} ({} bytes)", blocks, payload.len());
    }

    output.flush()?;
    debug!("decrypted {} blocks", blocks);

    Ok(blocks)
}

/// Decrypt hex ciphertext text into bytes
pub fn decrypt_bytes(ciphertext: &str, private_key: &SsPrivateKey) -> Result<Vec<u8>> {
    let mut plaintext = Vec::new();
    private_key.decrypt(ciphertext.as_bytes(), &mut plaintext)?;
    Ok(plaintext)
}

/// Decrypt hex ciphertext text into a string
pub fn decrypt_to_string(ciphertext: &str, private_key: &SsPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    Ok(String::from_utf8(plaintext)?)
}
