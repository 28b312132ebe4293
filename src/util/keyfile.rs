// Key File Operations
// Reads and writes Schmidt-Samoa keys as hexadecimal text

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::ss::bigint::from_hex;
use crate::ss::keygen::{SsPrivateKey, SsPublicKey};

/// Write a public key: n in hex, then the username
pub fn write_public_key<W: Write + ?Sized>(key: &SsPublicKey, output: &mut W) -> Result<()> {
    writeln!(output, "{:x}", key.n())?;
    writeln!(output, "{}", key.username())?;
    output.flush()?;
    Ok(())
}

/// Read a public key written by [`write_public_key`]
pub fn read_public_key<R: Read>(input: R) -> Result<SsPublicKey> {
    let text = read_text(input)?;
    let mut tokens = text.split_whitespace();

    let n = parse_hex(tokens.next(), "n")?;
    let username = tokens
        .next()
        .ok_or_else(|| Error::MalformedKey("missing username".to_string()))?;

    SsPublicKey::new(n, username)
}

/// Write a private key: pq in hex, then d in hex
pub fn write_private_key<W: Write + ?Sized>(key: &SsPrivateKey, output: &mut W) -> Result<()> {
    writeln!(output, "{:x}", key.pq())?;
    writeln!(output, "{:x}", key.d())?;
    output.flush()?;
    Ok(())
}

/// Read a private key written by [`write_private_key`]
pub fn read_private_key<R: Read>(input: R) -> Result<SsPrivateKey> {
    let text = read_text(input)?;
    let mut tokens = text.split_whitespace();

    let pq = parse_hex(tokens.next(), "pq")?;
    let d = parse_hex(tokens.next(), "d")?;

    Ok(SsPrivateKey::new(pq, d))
}

/// Save a public key to a file, replacing any previous contents
pub fn save_public_key<P: AsRef<Path>>(key: &SsPublicKey, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    write_public_key(key, &mut file)
}

/// Save a private key to a file readable and writable by the owner only
pub fn save_private_key<P: AsRef<Path>>(key: &SsPrivateKey, path: P) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // The mode above only applies to newly created files
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(Permissions::from_mode(0o600))?;
    }

    write_private_key(key, &mut file)
}

/// Load a public key from a file
pub fn load_public_key<P: AsRef<Path>>(path: P) -> Result<SsPublicKey> {
    let file = File::open(path)?;
    read_public_key(BufReader::new(file))
}

/// Load a private key from a file
pub fn load_private_key<P: AsRef<Path>>(path: P) -> Result<SsPrivateKey> {
    let file = File::open(path)?;
    read_private_key(BufReader::new(file))
}

fn read_text<R: Read>(input: R) -> Result<String> {
    let mut reader = BufReader::new(input);
    let mut text = String::new();

    // Keys are two short lines; stop after the second
    for _ in 0..2 {
        if reader.read_line(&mut text)? == 0 {
            break;
        }
    }

    Ok(text)
}

fn parse_hex(token: Option<&str>, field: &str) -> Result<BigUint> {
    let token = token.ok_or_else(|| Error::MalformedKey(format!("missing {}", field)))?;

    from_hex(token)
        .ok_or_else(|| Error::MalformedKey(format!("{} is not hexadecimal: {:?}", field, token)))
}
