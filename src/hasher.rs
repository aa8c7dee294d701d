//! Per-field and full-record checksums.
//!
//! Both checksums are FNV-1a. Each field's bytes are written to a fresh
//! 32-bit accumulator and to a single 64-bit accumulator that runs across
//! the whole record, so one pass yields both results.
//!
//! The bytes written for a field are
//! `u32 LE identifier length ++ identifier ++ canonical value`. The length
//! prefix keeps identifier `"AB"` + value `"C"` apart from `"A"` + `"BC"`.

use crate::field::{Field, Fields};
use crate::value::write_len_prefixed;
use tracing::trace;

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;
const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0100_0000_01b3;

/// Streaming 32-bit FNV-1a.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a32(u32);

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self(FNV32_OFFSET)
    }
}

impl Fnv1a32 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u32::from(*byte);
            self.0 = self.0.wrapping_mul(FNV32_PRIME);
        }
    }

    #[must_use]
    pub const fn finish(&self) -> u32 {
        self.0
    }
}

/// Streaming 64-bit FNV-1a.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64(u64);

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self(FNV64_OFFSET)
    }
}

impl Fnv1a64 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(FNV64_PRIME);
        }
    }

    #[must_use]
    pub const fn finish(&self) -> u64 {
        self.0
    }
}

/// Checksums of one record in canonical field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHashes {
    /// Checksum over every field's bytes in one continuous stream.
    pub full: u64,
    /// One checksum per field, independent of the other fields.
    pub fields: Vec<u32>,
}

/// The exact byte stream hashed for one field.
#[must_use]
pub fn field_bytes(field: &Field) -> Vec<u8> {
    let mut buf = Vec::with_capacity(field.id.len() + 16);
    write_len_prefixed(&mut buf, field.id.as_bytes());
    field.value.write_canonical(&mut buf);
    buf
}

/// Hash every field of a record in one pass.
#[must_use]
pub fn hash_fields(fields: &Fields) -> FieldHashes {
    let mut full = Fnv1a64::new();
    let mut checksums = Vec::with_capacity(fields.len());

    for field in fields {
        let bytes = field_bytes(field);
        let mut per_field = Fnv1a32::new();
        per_field.write(&bytes);
        full.write(&bytes);

        trace!(field = %field.id, checksum = per_field.finish(), "hashed field");
        checksums.push(per_field.finish());
    }

    FieldHashes {
        full: full.finish(),
        fields: checksums,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSet;
    use crate::value::FieldValue;

    #[test]
    fn test_fnv_reference_vectors() {
        let mut h32 = Fnv1a32::new();
        h32.write(b"a");
        assert_eq!(h32.finish(), 0xe40c_292c);

        let mut h64 = Fnv1a64::new();
        h64.write(b"a");
        assert_eq!(h64.finish(), 0xaf63_dc4c_8601_ec8c);

        assert_eq!(Fnv1a32::new().finish(), FNV32_OFFSET);
        assert_eq!(Fnv1a64::new().finish(), FNV64_OFFSET);
    }

    #[test]
    fn test_streaming_matches_single_write() {
        let mut split = Fnv1a64::new();
        split.write(b"foo");
        split.write(b"bar");

        let mut whole = Fnv1a64::new();
        whole.write(b"foobar");

        assert_eq!(split.finish(), whole.finish());
    }

    #[test]
    fn test_identifier_is_delimited_from_value() {
        let a = Field {
            id: "AB".into(),
            value: FieldValue::Bytes(b"C".to_vec()),
        };
        let b = Field {
            id: "A".into(),
            value: FieldValue::Bytes(b"BC".to_vec()),
        };
        assert_ne!(field_bytes(&a), field_bytes(&b));

        let fa = FieldSet::new().value("AB", a.value).finish().unwrap();
        let fb = FieldSet::new().value("A", b.value).finish().unwrap();
        assert_ne!(hash_fields(&fa).fields, hash_fields(&fb).fields);
    }

    #[test]
    fn test_field_checksum_independent_of_other_fields() {
        let base = FieldSet::new()
            .field("a", "one")
            .field("b", "two")
            .finish()
            .unwrap();
        let changed = FieldSet::new()
            .field("a", "one")
            .field("b", "three")
            .finish()
            .unwrap();

        let h1 = hash_fields(&base);
        let h2 = hash_fields(&changed);
        assert_eq!(h1.fields[0], h2.fields[0]);
        assert_ne!(h1.fields[1], h2.fields[1]);
        assert_ne!(h1.full, h2.full);
    }

    #[test]
    fn test_full_checksum_is_continuous_stream() {
        let fields = FieldSet::new()
            .field("a", &1_u8)
            .field("b", &2_u8)
            .finish()
            .unwrap();

        let mut expected = Fnv1a64::new();
        for field in &fields {
            expected.write(&field_bytes(field));
        }
        assert_eq!(hash_fields(&fields).full, expected.finish());
    }

    #[test]
    fn test_empty_record() {
        let hashes = hash_fields(&FieldSet::new().finish().unwrap());
        assert_eq!(hashes.full, FNV64_OFFSET);
        assert!(hashes.fields.is_empty());
    }
}
