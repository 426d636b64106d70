// Content fingerprinting using BLAKE3

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::constants::FINGERPRINT_BLOCK_SIZE;
use crate::error::{ClipVaultError, Result};

/// 128-bit content digest used as the dedup key.
/// Identical byte content always produces an identical fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Fingerprint(bytes)
    }

    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(32);
        for byte in &self.0 {
            hex.push_str(&format!("{:02x}", byte));
        }
        hex
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 32 || !s.is_ascii() {
            return Err(ClipVaultError::Schema(format!(
                "invalid fingerprint: {:?}",
                s
            )));
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| {
                ClipVaultError::Schema(format!("invalid fingerprint: {:?}", s))
            })?;
        }
        Ok(Fingerprint(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the fingerprint of a file by streaming it in fixed-size blocks.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let mut file = File::open(path)?;
    fingerprint_reader(&mut file)
}

/// Compute the fingerprint of any readable stream with the default block size.
pub fn fingerprint_reader<R: Read>(reader: &mut R) -> Result<Fingerprint> {
    fingerprint_reader_with_block(reader, FINGERPRINT_BLOCK_SIZE)
}

/// Compute the fingerprint with an explicit block size.
/// The block size never changes the resulting digest, which makes
/// arbitrarily large files safe to hash without loading them fully.
pub fn fingerprint_reader_with_block<R: Read>(
    reader: &mut R,
    block_size: usize,
) -> Result<Fingerprint> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; block_size];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let mut digest = [0u8; 16];
    hasher.finalize_xof().fill(&mut digest);
    Ok(Fingerprint(digest))
}
