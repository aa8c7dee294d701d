//! infohash - record fingerprints that name the changed field
//!
//! A fingerprint holds a 64-bit checksum of the whole record plus
//! `ceil(log2(n + 1))` 32-bit parity words over the per-field checksums.
//! Comparing a record with a stored fingerprint tells whether anything
//! changed and, when exactly one field did, which one.
//!
//! # Architecture
//!
//! - [`field`] - Explicit field lists (`Record`, `FieldSet`) and JSON records
//! - [`value`] - Canonical, tagged byte encoding of field values
//! - [`hasher`] - FNV-1a per-field and full-record checksums
//! - [`parity`] - Hamming-style parity words and change localization
//! - [`fingerprint`] - Fingerprint byte layout
//! - [`compare`] - Comparison outcomes
//! - [`schema`] - Schema identity guard
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling
//!
//! # Example
//!
//! ```
//! use infohash::{Comparison, FieldSet, Record};
//!
//! struct Config {
//!     name: String,
//!     retries: u32,
//! }
//!
//! impl Record for Config {
//!     fn fields(&self) -> FieldSet {
//!         FieldSet::new()
//!             .field("name", &self.name)
//!             .field("retries", &self.retries)
//!     }
//! }
//!
//! let mut config = Config { name: "api".into(), retries: 3 };
//! let stored = infohash::encode(&config).unwrap().to_bytes();
//!
//! config.retries = 5;
//! let result = infohash::compare(&config, &stored).unwrap();
//! assert_eq!(result, Comparison::ChangedAt("retries".into()));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod compare;
pub mod error;
pub mod field;
pub mod fingerprint;
pub mod hasher;
pub mod parity;
pub mod schema;
pub mod value;

pub use compare::Comparison;
pub use error::{Error, Result};
pub use field::{Field, FieldSet, Fields, JsonRecord, Record};
pub use fingerprint::Fingerprint;
pub use schema::SchemaId;
pub use value::{FieldValue, ToFieldValue};

use tracing::debug;

/// Fingerprint an already extracted field list.
#[must_use]
pub fn encode_fields(fields: &Fields) -> Fingerprint {
    let hashes = hasher::hash_fields(fields);
    let fingerprint = Fingerprint::new(hashes.full, parity::encode_parity(&hashes.fields));
    debug!(
        fields = fields.len(),
        bytes = fingerprint.encoded_len(),
        "encoded fingerprint"
    );
    fingerprint
}

/// Compare an already extracted field list with stored fingerprint bytes.
///
/// # Errors
///
/// Returns [`Error::MalformedFingerprint`] if `stored` cannot be decoded.
pub fn compare_fields(fields: &Fields, stored: &[u8]) -> Result<Comparison> {
    Ok(compare_fingerprint(fields, &Fingerprint::from_bytes(stored)?))
}

/// Compare an already extracted field list with a decoded fingerprint.
#[must_use]
pub fn compare_fingerprint(fields: &Fields, stored: &Fingerprint) -> Comparison {
    let hashes = hasher::hash_fields(fields);
    compare::compare_checksums(&fields.identifiers(), &hashes, stored)
}

/// Compute the fingerprint of a record.
///
/// Equal records always produce byte-identical fingerprints.
///
/// # Errors
///
/// Returns [`Error::InvalidRecordShape`] if the record's field list has
/// empty or duplicate identifiers.
pub fn encode<R: Record + ?Sized>(record: &R) -> Result<Fingerprint> {
    Ok(encode_fields(&Fields::of(record)?))
}

/// Compare a record with a fingerprint previously returned by [`encode`].
///
/// # Errors
///
/// Returns [`Error::InvalidRecordShape`] for an invalid field list and
/// [`Error::MalformedFingerprint`] for undecodable fingerprint bytes.
pub fn compare<R: Record + ?Sized>(record: &R, stored: &[u8]) -> Result<Comparison> {
    compare_fields(&Fields::of(record)?, stored)
}

/// Like [`compare`], but any change is an error.
///
/// # Errors
///
/// Returns [`Error::FieldChanged`] naming the changed field, or with no
/// field when more than one changed. Extraction and decode errors are
/// passed through.
pub fn verify<R: Record + ?Sized>(record: &R, stored: &[u8]) -> Result<()> {
    compare(record, stored)?.into_result()
}

/// Schema identity of a record's field list.
///
/// # Errors
///
/// Returns [`Error::InvalidRecordShape`] for an invalid field list.
pub fn schema_id<R: Record + ?Sized>(record: &R) -> Result<SchemaId> {
    SchemaId::of(record)
}
