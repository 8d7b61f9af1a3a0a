use record_store::RecordId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// Neutral gray used when a category has no color, or a task names an
/// unknown category
pub const DEFAULT_CATEGORY_COLOR: &str = "#64748b";

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

/// Custom validator for `#rgb` / `#rrggbb` colors
fn validate_hex_color(color: &str) -> Result<(), validator::ValidationError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_color")
            .with_message("Color must be a hex value like #64748b".into()))
    }
}

/// Category entity. Tasks reference it by `name`, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[ts(as = "String")]
    #[schema(value_type = String)]
    pub id: RecordId,
    pub name: String,
    pub color: String,
    /// Stored as supplied; never recomputed from the task list
    pub task_count: u32,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[serde(default)]
    pub task_count: u32,
}

/// DTO for updating a category; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
    pub task_count: Option<u32>,
}

impl Category {
    pub fn new(id: RecordId, input: CreateCategory) -> Self {
        Self {
            id,
            name: input.name,
            color: input.color,
            task_count: input.task_count,
        }
    }

    /// Apply updates from UpdateCategory DTO
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(task_count) = update.task_count {
            self.task_count = task_count;
        }
    }
}

/// Color of the category called `name`, or [`DEFAULT_CATEGORY_COLOR`]
pub fn category_color<'a>(categories: &'a [Category], name: &str) -> &'a str {
    categories
        .iter()
        .find(|category| category.name == name)
        .map(|category| category.color.as_str())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}
