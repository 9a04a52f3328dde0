use crate::config::OutputConfig;
use crate::error::ScrapeError;
use crate::model::RecipeSummary;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Indentation used inside the source literal.
const LITERAL_INDENT: &[u8] = b"            ";

/// Pretty-printed JSON array of recipes, two space indent.
pub fn to_json_document(recipes: &[RecipeSummary]) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(recipes)?)
}

/// Read a document written by [`to_json_document`].
pub fn from_json_document(document: &str) -> Result<Vec<RecipeSummary>, ScrapeError> {
    Ok(serde_json::from_str(document)?)
}

/// The recipes as a `const <constant> = [...];` statement for embedding in
/// a script.
pub fn to_source_literal(recipes: &[RecipeSummary], constant: &str) -> Result<String, ScrapeError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(LITERAL_INDENT));
    recipes.serialize(&mut serializer)?;

    Ok(format!(
        "const {} = {};",
        constant,
        String::from_utf8_lossy(&buf)
    ))
}

/// Write the JSON document and the source literal.
pub async fn write_artifacts(
    recipes: &[RecipeSummary],
    output: &OutputConfig,
) -> Result<(), ScrapeError> {
    tokio::fs::write(&output.json_path, to_json_document(recipes)?).await?;
    info!("Recipes saved to {}", output.json_path.display());

    tokio::fs::write(
        &output.js_path,
        to_source_literal(recipes, &output.constant_name)?,
    )
    .await?;
    info!("Array snippet saved to {}", output.js_path.display());

    Ok(())
}
