// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/api/openapi.json
//
// Generates the spec without starting the server or touching the database.

use anyhow::{Context, Result};
use devevents_server::openapi::ApiDoc;

fn main() -> Result<()> {
    let json = ApiDoc::to_json().context("Failed to serialize OpenAPI spec")?;
    println!("{}", json);
    Ok(())
}
