//! Schema command implementation.

use super::read_record;
use crate::error::Result;
use crate::field::Fields;
use crate::schema::SchemaId;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SchemaOutput<'a> {
    schema: String,
    fields: Vec<&'a str>,
}

/// Execute the schema command.
///
/// # Errors
///
/// Returns an error if the record cannot be read or has an invalid shape.
pub fn execute(input: &Path, json: bool, quiet: bool) -> Result<()> {
    let record = read_record(input)?;
    let fields = Fields::of(&record)?;
    let schema = SchemaId::from_fields(&fields);

    if json {
        let output = SchemaOutput {
            schema: schema.to_string(),
            fields: fields.identifiers(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{schema}");
    if !quiet {
        for (position, id) in fields.identifiers().iter().enumerate() {
            println!("  {:>3}  {id}", position + 1);
        }
    }
    Ok(())
}
