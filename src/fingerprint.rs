//! Fingerprint byte layout.
//!
//! ```text
//! [u64 LE full checksum][u32 LE parity 0][u32 LE parity 1]...
//! ```
//!
//! The length is `8 + 4 * ceil(log2(n + 1))` for a record of `n` fields.

use crate::error::{Error, Result};
use crate::parity::parity_count;
use std::fmt;
use std::str::FromStr;

/// Size of the full-record checksum prefix.
pub const FULL_CHECKSUM_SIZE: usize = 8;

/// Size of one parity word.
pub const PARITY_WORD_SIZE: usize = 4;

/// Stored state of a record: full checksum plus parity words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    full: u64,
    parity: Vec<u32>,
}

impl Fingerprint {
    #[must_use]
    pub const fn new(full: u64, parity: Vec<u32>) -> Self {
        Self { full, parity }
    }

    #[must_use]
    pub const fn full(&self) -> u64 {
        self.full
    }

    #[must_use]
    pub fn parity(&self) -> &[u32] {
        &self.parity
    }

    /// Encoded length in bytes for a record of `field_count` fields.
    #[must_use]
    pub const fn len_for_fields(field_count: usize) -> usize {
        FULL_CHECKSUM_SIZE + PARITY_WORD_SIZE * parity_count(field_count)
    }

    /// Encoded length in bytes of this fingerprint.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        FULL_CHECKSUM_SIZE + PARITY_WORD_SIZE * self.parity.len()
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&self.full.to_le_bytes());
        for word in &self.parity {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        buf
    }

    /// Decode a fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFingerprint`] if the length is not
    /// `8 + 4k`. Trailing bytes are never ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let malformed = || Error::MalformedFingerprint { len: bytes.len() };

        let (head, tail) = bytes
            .split_first_chunk::<FULL_CHECKSUM_SIZE>()
            .ok_or_else(malformed)?;
        let words = tail.chunks_exact(PARITY_WORD_SIZE);
        if !words.remainder().is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            full: u64::from_le_bytes(*head),
            parity: words
                .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
                .collect(),
        })
    }

    /// Lowercase hex of [`Fingerprint::to_bytes`].
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the hex form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHex`] for non-hex input, then anything
    /// [`Fingerprint::from_bytes`] rejects.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim()).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<&Fingerprint> for Vec<u8> {
    fn from(fingerprint: &Fingerprint) -> Self {
        fingerprint.to_bytes()
    }
}

impl TryFrom<&[u8]> for Fingerprint {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout_is_little_endian() {
        let fp = Fingerprint::new(0x0102_0304_0506_0708, vec![0x0a0b_0c0d, 0x1122_3344]);
        assert_eq!(
            fp.to_bytes(),
            vec![
                0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, //
                0x0d, 0x0c, 0x0b, 0x0a, //
                0x44, 0x33, 0x22, 0x11,
            ]
        );
        assert_eq!(fp.to_hex(), "08070605040302010d0c0b0a44332211");
    }

    #[test]
    fn test_decode() {
        let fp = Fingerprint::new(u64::MAX - 5, vec![1, 2, 3]);
        let decoded = Fingerprint::from_bytes(&fp.to_bytes()).unwrap();
        assert_eq!(decoded.full(), u64::MAX - 5);
        assert_eq!(decoded.parity(), &[1, 2, 3]);
    }

    #[test]
    fn test_decode_rejects_bad_lengths() {
        for len in [0, 1, 7, 9, 10, 11, 13, 15] {
            let err = Fingerprint::from_bytes(&vec![0; len]).unwrap_err();
            assert!(
                matches!(err, Error::MalformedFingerprint { len: l } if l == len),
                "len {len}"
            );
        }
        assert!(Fingerprint::from_bytes(&[0; 8]).unwrap().parity().is_empty());
        assert_eq!(Fingerprint::from_bytes(&[0; 20]).unwrap().parity().len(), 3);
    }

    #[test]
    fn test_len_for_fields() {
        assert_eq!(Fingerprint::len_for_fields(0), 8);
        assert_eq!(Fingerprint::len_for_fields(1), 12);
        assert_eq!(Fingerprint::len_for_fields(5), 20);
        assert_eq!(Fingerprint::len_for_fields(12), 24);
    }

    #[test]
    fn test_hex_parsing() {
        let fp: Fingerprint = "08070605040302010d0c0b0a".parse().unwrap();
        assert_eq!(fp.full(), 0x0102_0304_0506_0708);
        assert_eq!(fp.parity(), &[0x0a0b_0c0d]);

        assert!(matches!(
            Fingerprint::from_hex("zz"),
            Err(Error::InvalidHex(_))
        ));
        assert!(matches!(
            Fingerprint::from_hex("0011"),
            Err(Error::MalformedFingerprint { len: 2 })
        ));
    }
}
