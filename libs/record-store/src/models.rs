use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A record as delivered by the store: field name to JSON value.
pub type Record = Map<String, Value>;

/// Opaque record identifier.
///
/// The hosted store keys records by integer `Id`, other backends use
/// strings. Both deserialize into a `RecordId`; it always serializes as a
/// string in TaskFlow's own API and is converted back with [`RecordId::to_wire`]
/// when sent to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form when the id is a canonical integer, string form
    /// otherwise. `"007"` and `"+5"` stay strings.
    pub fn to_wire(&self) -> Value {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => Value::from(n),
            _ => Value::from(self.0.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => n.into(),
            Raw::Str(s) => s.into(),
        })
    }
}

/// Sort direction understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

/// Field list and ordering for a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchParams {
    pub fields: Vec<String>,
    #[serde(rename = "orderBy", skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
}

impl FetchParams {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            order_by: Vec::new(),
        }
    }

    pub fn order_by_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortType::Asc)
    }

    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortType::Desc)
    }

    fn order_by(mut self, field: impl Into<String>, sort_type: SortType) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.into(),
            sort_type,
        });
        self
    }
}

/// Field-level rejection reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}

/// Outcome for one record of a bulk create/update/delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

/// Envelope returned by every store call.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreResponse<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
}

/// A record the store refused, with its position in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub errors: Vec<FieldError>,
}

impl RecordFailure {
    pub fn from_result(index: usize, result: RecordResult) -> Self {
        Self {
            index,
            message: result.message,
            errors: result.errors.unwrap_or_default(),
        }
    }
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}", self.index)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}
