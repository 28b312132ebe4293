// Sentinel Block Framing
// Packs byte runs into big integers behind a fixed 0xFF leading byte

use std::io::{self, Read};

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Leading byte of every block. Pins the most significant byte of the
/// packed integer so leading zero bytes of the payload survive the
/// integer round trip.
pub const SENTINEL: u8 = 0xFF;

/// Block width in bytes (sentinel included) for encrypting under `n`
pub fn encrypt_block_size(n: &BigUint) -> Result<usize> {
    block_size(n.sqrt().bits(), n.bits())
}

/// Block width in bytes (sentinel included) for decrypting under `pq`
pub fn decrypt_block_size(pq: &BigUint) -> Result<usize> {
    block_size(pq.bits(), pq.bits())
}

fn block_size(width_bits: u64, modulus_bits: u64) -> Result<usize> {
    let k = width_bits.saturating_sub(1) / 8;

    // One sentinel byte plus at least one payload byte
    if k < 2 {
        return Err(Error::ModulusTooSmall { bits: modulus_bits });
    }

    Ok(k as usize)
}

/// Big-endian import of a framed block (sentinel at index 0)
pub fn pack_block(block: &[u8]) -> BigUint {
    BigUint::from_bytes_be(block)
}

/// Big-endian export of a decrypted block, returning the payload after
/// the sentinel
///
/// Fails with [`Error::InvalidBlock`] if the value is wider than `k` bytes
/// or not led by [`SENTINEL`]; this is how a wrong key shows up.
pub fn unpack_block(m: &BigUint, k: usize) -> Result<Vec<u8>> {
    let mut bytes = m.to_bytes_be();

    if bytes.len() > k || bytes.first() != Some(&SENTINEL) {
        return Err(Error::InvalidBlock);
    }

    bytes.remove(0);
    Ok(bytes)
}

/// Read until `buf` is full or the reader is exhausted.
/// Returns the number of bytes read.
pub fn fill_block<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most one byte per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_block_sizes() {
        // 2^100: sqrt is 2^50 (51 bits) -> (51 - 1) / 8 = 6
        let n = BigUint::from(1u8) << 100u32;
        assert_eq!(encrypt_block_size(&n).unwrap(), 6);

        // 2^64 has 65 bits -> 64 / 8 = 8
        let pq = BigUint::from(1u8) << 64u32;
        assert_eq!(decrypt_block_size(&pq).unwrap(), 8);
    }

    #[test]
    fn test_block_size_too_small() {
        let n = BigUint::from(1u8) << 30u32;
        assert!(matches!(
            encrypt_block_size(&n),
            Err(Error::ModulusTooSmall { bits: 31 })
        ));
        assert!(decrypt_block_size(&BigUint::from(0u8)).is_err());
    }

    #[test]
    fn test_pack_unpack_keeps_leading_zeros() {
        let block = [SENTINEL, 0x00, 0x00, 0x01];
        let m = pack_block(&block);

        assert_eq!(unpack_block(&m, 4).unwrap(), vec![0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_unpack_sentinel_only() {
        let m = pack_block(&[SENTINEL]);
        assert!(unpack_block(&m, 8).unwrap().is_empty());
    }

    #[test]
    fn test_unpack_rejects_bad_framing() {
        // Missing sentinel
        let m = pack_block(&[0x7F, 0x01]);
        assert!(matches!(unpack_block(&m, 4), Err(Error::InvalidBlock)));

        // Too wide for the block
        let m = pack_block(&[SENTINEL, 1, 2, 3, 4]);
        assert!(matches!(unpack_block(&m, 4), Err(Error::InvalidBlock)));

        // Zero exports as a single 0x00 byte
        assert!(matches!(unpack_block(&BigUint::from(0u8), 4), Err(Error::InvalidBlock)));
    }

    #[test]
    fn test_fill_block_short_reads() {
        let data = b"abcdefg";
        let mut reader = Trickle(data);
        let mut buf = [0u8; 5];

        assert_eq!(fill_block(&mut reader, &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"abcde");
        assert_eq!(fill_block(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"fg");
        assert_eq!(fill_block(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_fill_block_cursor() {
        let mut reader = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(fill_block(&mut reader, &mut buf).unwrap(), 3);
    }
}
