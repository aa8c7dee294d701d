//! Compare command implementation.

use super::read_record;
use crate::compare::Comparison;
use crate::error::Result;
use crate::field::Fields;
use crate::fingerprint::Fingerprint;
use crate::schema::SchemaId;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct CompareOutput<'a> {
    changed: bool,
    #[serde(flatten)]
    comparison: &'a Comparison,
}

/// Execute the compare command.
///
/// # Errors
///
/// Returns an error if the record or fingerprint cannot be read, if
/// `schema` does not match the record's field list, or, with `strict`,
/// if any field changed.
pub fn execute(
    input: &Path,
    fingerprint: &str,
    schema: Option<&str>,
    strict: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let record = read_record(input)?;
    let fields = Fields::of(&record)?;

    if let Some(expected) = schema {
        SchemaId::from_fields(&fields).check(expected.parse()?)?;
    }

    let stored = Fingerprint::from_hex(fingerprint)?;
    let comparison = crate::compare_fingerprint(&fields, &stored);
    info!(result = %comparison, "compared record");

    if json {
        let output = CompareOutput {
            changed: !comparison.is_unchanged(),
            comparison: &comparison,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if !quiet {
        match &comparison {
            Comparison::Unchanged => println!("{}", "unchanged".green()),
            Comparison::ChangedAt(field) => {
                println!("{} {}", "changed:".yellow(), field.bold());
            }
            Comparison::ChangedUnknown => {
                println!("{} more than one field", "changed:".yellow());
            }
        }
    }

    if strict {
        return comparison.into_result();
    }

    Ok(())
}
