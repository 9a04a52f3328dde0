use recipe_scrape::output::{from_json_document, to_json_document, to_source_literal, write_artifacts};
use recipe_scrape::{OutputConfig, RecipeSummary};
use std::path::PathBuf;

fn sample_recipes() -> Vec<RecipeSummary> {
    vec![
        RecipeSummary {
            name: "Mom's Black Bean & Rice Bowl".to_string(),
            category: "Bowls".to_string(),
            image: "https://example.com/bowl-600x600.jpg".to_string(),
            url: Some("https://example.com/bowl/".to_string()),
            ingredients: vec!["1 cup rice".to_string(), "1 can black beans".to_string()],
        },
        RecipeSummary::new("Crème Brûlée", "https://example.com/creme.jpg"),
    ]
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("recipe-scrape-{}-{}", std::process::id(), name))
}

#[test]
fn test_document_round_trip() {
    let recipes = sample_recipes();
    let document = to_json_document(&recipes).unwrap();
    assert_eq!(from_json_document(&document).unwrap(), recipes);
}

#[test]
fn test_document_field_order() {
    let document = to_json_document(&sample_recipes()).unwrap();
    let name = document.find("\"name\"").unwrap();
    let category = document.find("\"category\"").unwrap();
    let image = document.find("\"image\"").unwrap();
    let url = document.find("\"url\"").unwrap();
    let ingredients = document.find("\"ingredients\"").unwrap();
    assert!(name < category && category < image && image < url && url < ingredients);
}

#[test]
fn test_source_literal_embeds_same_data() {
    let recipes = sample_recipes();
    let literal = to_source_literal(&recipes, "recipes").unwrap();

    let body = literal
        .strip_prefix("const recipes = ")
        .and_then(|rest| rest.strip_suffix(';'))
        .unwrap();
    assert_eq!(from_json_document(body).unwrap(), recipes);
}

#[tokio::test]
async fn test_write_artifacts() {
    let output = OutputConfig {
        json_path: temp_path("recipes.json"),
        js_path: temp_path("recipes.js"),
        constant_name: "plantRecipes".to_string(),
    };

    write_artifacts(&sample_recipes(), &output).await.unwrap();

    let json = std::fs::read_to_string(&output.json_path).unwrap();
    assert_eq!(from_json_document(&json).unwrap(), sample_recipes());

    let js = std::fs::read_to_string(&output.js_path).unwrap();
    assert!(js.starts_with("const plantRecipes = ["));
    assert!(js.ends_with("];"));

    let _ = std::fs::remove_file(&output.json_path);
    let _ = std::fs::remove_file(&output.js_path);
}
