use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use record_store::RecordId;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use strum::{Display, EnumIter, EnumString};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// Custom validator rejecting titles made only of whitespace
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Title must not be blank".into()));
    }
    Ok(())
}

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
    ToSchema,
    TS,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskPriority {
    Low,
    /// Default priority
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Display weight: high 3 > medium 2 > low 1.
    ///
    /// Used for grouping and coloring only; task lists are never sorted by it.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Theme color token the frontend paints the priority badge with
    pub fn color_token(&self) -> &'static str {
        match self {
            Self::High => "accent",
            Self::Medium => "warning",
            Self::Low => "success",
        }
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the store
    #[ts(as = "String")]
    #[schema(value_type = String)]
    pub id: RecordId,
    pub title: String,
    pub completed: bool,
    pub priority: TaskPriority,
    /// Category name, empty when uncategorized
    pub category: String,
    /// Due day; times of day are not tracked
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Set iff `completed` is true
    pub completed_at: Option<DateTime<Utc>>,
}

/// DTO for creating a new task. New tasks always start pending.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<NaiveDate>,
}

/// DTO for updating an existing task; only supplied fields change.
///
/// `dueDate: null` clears the due date, an absent `dueDate` keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_date_patch")]
    #[schema(value_type = Option<NaiveDate>)]
    #[ts(as = "Option<Option<String>>")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTask {
    /// Update that only changes the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

impl Task {
    /// Build a pending task from a create request
    pub fn new(id: RecordId, input: CreateTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            completed: false,
            priority: input.priority,
            category: input.category,
            due_date: input.due_date,
            created_at: now,
            completed_at: None,
        }
    }

    /// Apply updates from UpdateTask DTO
    pub fn apply_update(&mut self, update: UpdateTask, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = update.completed {
            self.set_completed(completed, now);
        }
    }

    /// Set the completion flag, keeping `completed_at` in step.
    ///
    /// `completed_at` moves only on a transition: false→true stamps `now`,
    /// true→false clears it. Re-completing keeps the existing stamp.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed && !self.completed {
            self.completed_at = Some(now);
        } else if !completed {
            self.completed_at = None;
        }
        self.completed = completed;
    }
}

/// Parse a due date from its wire form.
///
/// Accepts a plain ISO-8601 date or a full timestamp; a timestamp is reduced
/// to the calendar date it was written with.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_due_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid due date '{}'", raw))),
    }
}

fn deserialize_due_date_patch<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_due_date(deserializer).map(Some)
}
