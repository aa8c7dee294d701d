//! Version command implementation.

use crate::error::Result;
use crate::value::ENCODING_VERSION;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    version: &'static str,
    encoding: u32,
}

/// Print the crate version and the canonical value encoding revision.
///
/// Fingerprints are only comparable between builds that share an
/// encoding revision.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let output = VersionOutput {
        version: env!("CARGO_PKG_VERSION"),
        encoding: ENCODING_VERSION,
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "infohash {} (encoding v{})",
            output.version, output.encoding
        );
    }
    Ok(())
}
