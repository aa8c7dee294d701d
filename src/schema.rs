//! Schema identity.
//!
//! Parity localizes changes by field position, so a fingerprint is only
//! meaningful for the exact field list it was computed from. A [`SchemaId`]
//! hashes that list; callers store or pin it and check it before comparing.
//!
//! A typical guard lives in the record type's own tests:
//!
//! ```
//! use infohash::{FieldSet, Record, SchemaId};
//!
//! struct Point { x: i32, y: i32 }
//!
//! impl Record for Point {
//!     fn fields(&self) -> FieldSet {
//!         FieldSet::new().field("x", &self.x).field("y", &self.y)
//!     }
//! }
//!
//! let id = SchemaId::of(&Point { x: 0, y: 0 }).unwrap();
//! id.check(id).unwrap();
//! ```

use crate::error::{Error, Result};
use crate::field::{Fields, Record};
use crate::hasher::Fnv1a64;
use crate::value::write_len_prefixed;
use std::fmt;
use std::str::FromStr;

/// FNV-1a 64 over the canonical identifier list, each length-prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(u64);

impl SchemaId {
    /// Schema identity of a record's field list.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidRecordShape`] from field extraction.
    pub fn of<R: Record + ?Sized>(record: &R) -> Result<Self> {
        Ok(Self::from_fields(&Fields::of(record)?))
    }

    #[must_use]
    pub fn from_fields(fields: &Fields) -> Self {
        let mut hasher = Fnv1a64::new();
        let mut buf = Vec::new();
        for id in fields.identifiers() {
            buf.clear();
            write_len_prefixed(&mut buf, id.as_bytes());
            hasher.write(&buf);
        }
        Self(hasher.finish())
    }

    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Fail unless `expected` is this schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] naming both identities.
    pub fn check(self, expected: Self) -> Result<()> {
        if self == expected {
            return Ok(());
        }
        Err(Error::SchemaMismatch {
            expected: expected.to_string(),
            actual: self.to_string(),
        })
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for SchemaId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        u64::from_str_radix(s.trim(), 16)
            .map(Self)
            .map_err(|e| Error::InvalidHex(format!("schema id {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSet;

    fn fields(ids: &[&str]) -> Fields {
        ids.iter()
            .fold(FieldSet::new(), |set, id| set.field(*id, &0_u8))
            .finish()
            .unwrap()
    }

    #[test]
    fn test_independent_of_values_and_declaration_order() {
        let a = FieldSet::new()
            .field("a", "x")
            .field("b", &1_u8)
            .finish()
            .unwrap();
        let b = FieldSet::new()
            .field("b", "other")
            .field("a", &99_u64)
            .finish()
            .unwrap();
        assert_eq!(SchemaId::from_fields(&a), SchemaId::from_fields(&b));
    }

    #[test]
    fn test_changes_when_fields_change() {
        let base = SchemaId::from_fields(&fields(&["a", "b"]));
        assert_ne!(base, SchemaId::from_fields(&fields(&["a", "b", "c"])));
        assert_ne!(base, SchemaId::from_fields(&fields(&["a", "c"])));
        assert_ne!(base, SchemaId::from_fields(&fields(&["a"])));
        // length prefixing keeps ["ab"] apart from ["a", "b"]
        assert_ne!(base, SchemaId::from_fields(&fields(&["ab"])));
    }

    #[test]
    fn test_check() {
        let id = SchemaId::from_fields(&fields(&["a"]));
        assert!(id.check(id).is_ok());

        let other = SchemaId::from_u64(id.as_u64() ^ 1);
        let err = id.check(other).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_display_is_fixed_width_hex() {
        assert_eq!(SchemaId::from_u64(0xab).to_string(), "00000000000000ab");
        assert_eq!(
            "00000000000000ab".parse::<SchemaId>().unwrap(),
            SchemaId::from_u64(0xab)
        );
        assert!(matches!("xyz".parse::<SchemaId>(), Err(Error::InvalidHex(_))));
    }
}
