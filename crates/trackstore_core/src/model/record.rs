//! Record domain model and candidate validation.
//!
//! # Responsibility
//! - Define the canonical record persisted in every collection.
//! - Turn loosely-typed candidate input into a sanitized `Record`.
//!
//! # Invariants
//! - `_id` is a non-empty string.
//! - `titles` is always present; it may be empty but every element is a string.
//! - Sanitized records carry only `_id` and `titles`; other input fields are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a record inside its collection.
pub type RecordId = String;

const ID_FIELD: &str = "_id";
const TITLES_FIELD: &str = "titles";

/// Canonical record stored in a collection.
///
/// Serialized with the exact on-disk field names `_id` and `titles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Unique (per collection) identifier.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Display titles in caller-provided order.
    pub titles: Vec<String>,
}

/// Reason a record or candidate input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NotAnObject,
    MissingId,
    IdNotString,
    EmptyId,
    MissingTitles,
    TitlesNotArray,
    TitleNotString { index: usize },
}

impl RecordValidationError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject => "not_an_object",
            Self::MissingId => "missing_id",
            Self::IdNotString => "id_not_string",
            Self::EmptyId => "empty_id",
            Self::MissingTitles => "missing_titles",
            Self::TitlesNotArray => "titles_not_array",
            Self::TitleNotString { .. } => "title_not_string",
        }
    }
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record must be an object"),
            Self::MissingId => write!(f, "record is missing `_id`"),
            Self::IdNotString => write!(f, "`_id` must be a string"),
            Self::EmptyId => write!(f, "`_id` must not be empty"),
            Self::MissingTitles => write!(f, "record is missing `titles`"),
            Self::TitlesNotArray => write!(f, "`titles` must be an array"),
            Self::TitleNotString { index } => {
                write!(f, "`titles[{index}]` must be a string")
            }
        }
    }
}

impl Error for RecordValidationError {}

impl Record {
    /// Creates a record without validation.
    pub fn new(id: impl Into<RecordId>, titles: Vec<String>) -> Self {
        Self {
            id: id.into(),
            titles,
        }
    }

    /// Creates a record holding exactly one title.
    pub fn with_title(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self::new(id, vec![title.into()])
    }

    /// Validates typed record invariants.
    ///
    /// Title element types are already guaranteed by the type system, so only
    /// the identifier needs a runtime check here.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        Ok(())
    }

    /// Converts this record back into a loosely-typed JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "_id": self.id,
            "titles": self.titles,
        })
    }
}

/// Validates untyped candidate input and projects it onto a `Record`.
///
/// Returns `Ok(record)` with only `_id` and `titles` kept, or the first
/// validation failure found. Never inspects collection state; uniqueness is
/// the store's concern.
pub fn validate_candidate(candidate: &Value) -> Result<Record, RecordValidationError> {
    let fields = candidate
        .as_object()
        .ok_or(RecordValidationError::NotAnObject)?;

    let id = match fields.get(ID_FIELD) {
        None => return Err(RecordValidationError::MissingId),
        Some(Value::String(id)) => id,
        Some(_) => return Err(RecordValidationError::IdNotString),
    };
    if id.is_empty() {
        return Err(RecordValidationError::EmptyId);
    }

    let raw_titles = match fields.get(TITLES_FIELD) {
        None => return Err(RecordValidationError::MissingTitles),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(RecordValidationError::TitlesNotArray),
    };

    let mut titles = Vec::with_capacity(raw_titles.len());
    for (index, item) in raw_titles.iter().enumerate() {
        match item {
            Value::String(title) => titles.push(title.clone()),
            _ => return Err(RecordValidationError::TitleNotString { index }),
        }
    }

    Ok(Record::new(id.clone(), titles))
}
