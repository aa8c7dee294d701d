//! Command implementations.

pub mod compare;
pub mod completions;
pub mod hash;
pub mod schema;
pub mod version;

use crate::error::Result;
use crate::field::JsonRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a JSON record from a file, or from stdin when `input` is `-`.
pub(crate) fn read_record(input: &Path) -> Result<JsonRecord> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    debug!(input = %input.display(), bytes = text.len(), "read record");
    JsonRecord::from_json_str(&text)
}
