//! Hash command implementation.

use super::read_record;
use crate::error::Result;
use crate::field::Fields;
use crate::schema::SchemaId;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct HashOutput {
    fingerprint: String,
    schema: String,
    fields: usize,
    bytes: usize,
}

/// Execute the hash command.
///
/// # Errors
///
/// Returns an error if the record cannot be read or has an invalid shape.
pub fn execute(input: &Path, json: bool, quiet: bool) -> Result<()> {
    let record = read_record(input)?;
    let fields = Fields::of(&record)?;
    let fingerprint = crate::encode_fields(&fields);

    if json {
        let output = HashOutput {
            fingerprint: fingerprint.to_hex(),
            schema: SchemaId::from_fields(&fields).to_string(),
            fields: fields.len(),
            bytes: fingerprint.encoded_len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if quiet {
        println!("{fingerprint}");
    } else {
        println!("{}", fingerprint.to_string().bold());
        println!(
            "  {} fields, {} bytes, schema {}",
            fields.len(),
            fingerprint.encoded_len(),
            SchemaId::from_fields(&fields)
        );
    }

    Ok(())
}
