use serde::{Deserialize, Serialize};

/// Category used when a recipe card carries no category label.
pub const DEFAULT_CATEGORY: &str = "Recipe";

/// Upper bound on ingredient lines kept per recipe.
pub const MAX_INGREDIENTS: usize = 15;

/// One recipe card found on a listing page.
///
/// Field order here is the field order of the written document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub image: String,
    /// Detail page; when absent no ingredients are fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl RecipeSummary {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: default_category(),
            image: image.into(),
            url: None,
            ingredients: Vec::new(),
        }
    }

    /// A card is only kept when it has both a name and an image.
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.image.is_empty()
    }
}
