//! Comparison of current checksums against a stored fingerprint.

use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use crate::hasher::FieldHashes;
use crate::parity::locate_change;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Outcome of comparing a record with its stored fingerprint.
///
/// `ChangedUnknown` is a successful outcome: something changed, but not
/// exactly one field that the parity can single out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "field", rename_all = "snake_case")]
pub enum Comparison {
    Unchanged,
    ChangedAt(String),
    ChangedUnknown,
}

impl Comparison {
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Identifier of the single changed field, if localized.
    #[must_use]
    pub fn changed_field(&self) -> Option<&str> {
        match self {
            Self::ChangedAt(id) => Some(id.as_str()),
            Self::Unchanged | Self::ChangedUnknown => None,
        }
    }

    /// Turn any change into [`Error::FieldChanged`].
    ///
    /// # Errors
    ///
    /// Fails unless the comparison is `Unchanged`.
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Unchanged => Ok(()),
            Self::ChangedAt(field) => Err(Error::FieldChanged { field: Some(field) }),
            Self::ChangedUnknown => Err(Error::FieldChanged { field: None }),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("unchanged"),
            Self::ChangedAt(id) => write!(f, "changed: {id}"),
            Self::ChangedUnknown => f.write_str("changed: more than one field"),
        }
    }
}

/// Compare checksums in canonical order with a stored fingerprint.
///
/// `identifiers` and `hashes.fields` must be the same length and come from
/// the same field list the fingerprint was built from.
#[must_use]
pub fn compare_checksums(
    identifiers: &[&str],
    hashes: &FieldHashes,
    stored: &Fingerprint,
) -> Comparison {
    if hashes.full == stored.full() {
        return Comparison::Unchanged;
    }

    match locate_change(&hashes.fields, stored.parity()) {
        Some(index) => {
            debug!(index, field = identifiers[index], "localized single change");
            Comparison::ChangedAt(identifiers[index].to_string())
        }
        None => {
            debug!(fields = identifiers.len(), "change not localizable");
            Comparison::ChangedUnknown
        }
    }
}
