//! Validating parse of question documents.
//!
//! Two document shapes are accepted:
//!
//! - a bare array of `{section, question, options, answer}` objects
//! - a wrapper object `{"questions": [...]}` whose entries usually carry a
//!   `correct` option index instead of an `answer` string
//!
//! Both shapes go through the same entry parser. Parsing stops at the first
//! offending entry and reports its position and field.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Question, QuestionError};

/// Section label used when an entry does not name one.
pub const DEFAULT_SECTION: &str = "Custom";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected an array of questions or an object with a `questions` array")]
    UnrecognizedShape,

    #[error("entry {index}: expected an object")]
    NotAnObject { index: usize },

    #[error("entry {index}: missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index}: `{field}` must be {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("entry {index}: `options` cannot be empty")]
    EmptyOptions { index: usize },

    #[error("entry {index}: `question` cannot be empty")]
    EmptyPrompt { index: usize },
}

/// Parse a JSON document into questions.
///
/// # Errors
///
/// Returns `ImportError::InvalidJson` when the text is not JSON,
/// `ImportError::UnrecognizedShape` when the document matches neither shape,
/// and a field-level variant for the first invalid entry.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    questions_from_value(&value)
}

/// Same as [`parse_questions`] for an already decoded document.
///
/// # Errors
///
/// See [`parse_questions`].
pub fn questions_from_value(value: &Value) -> Result<Vec<Question>, ImportError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ImportError::UnrecognizedShape),
        },
        _ => return Err(ImportError::UnrecognizedShape),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> Result<Question, ImportError> {
    let Some(obj) = entry.as_object() else {
        return Err(ImportError::NotAnObject { index });
    };

    let prompt = optional_string(obj, index, "question")?
        .ok_or(ImportError::MissingField {
            index,
            field: "question",
        })?;
    let options = parse_options(obj, index)?;
    let section = optional_string(obj, index, "section")?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SECTION);

    // An empty option text does not count as a resolved answer.
    let by_index = correct_position(obj, index)?
        .and_then(|i| options.get(i))
        .map(String::as_str)
        .filter(|answer| !answer.is_empty());
    let answer = match by_index {
        Some(answer) => answer.to_owned(),
        None => optional_string(obj, index, "answer")?
            .ok_or(ImportError::MissingField {
                index,
                field: "answer",
            })?
            .to_owned(),
    };

    Question::new(section, prompt, options, answer).map_err(|err| match err {
        QuestionError::EmptyPrompt => ImportError::EmptyPrompt { index },
        QuestionError::NoOptions => ImportError::EmptyOptions { index },
    })
}

/// Reads `correct` as an option position.
///
/// Integral numbers (`1`, `1.0`) and numeric strings (`"1"`) are positions.
/// Negative, fractional or unparsable values resolve to nothing so `answer`
/// is used instead.
fn correct_position(obj: &Map<String, Value>, index: usize) -> Result<Option<usize>, ImportError> {
    let position = match obj.get("correct") {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        Some(_) => {
            return Err(ImportError::InvalidField {
                index,
                field: "correct",
                expected: "a number or numeric string",
            });
        }
    };
    Ok(position.and_then(|i| usize::try_from(i).ok()))
}

fn optional_string<'a>(
    obj: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<Option<&'a str>, ImportError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ImportError::InvalidField {
            index,
            field,
            expected: "a string",
        }),
    }
}

fn parse_options(obj: &Map<String, Value>, index: usize) -> Result<Vec<String>, ImportError> {
    let invalid = ImportError::InvalidField {
        index,
        field: "options",
        expected: "an array of strings",
    };
    let items = match obj.get("options") {
        None | Some(Value::Null) => {
            return Err(ImportError::MissingField {
                index,
                field: "options",
            });
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid),
    };
    if items.is_empty() {
        return Err(ImportError::EmptyOptions { index });
    }

    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or_else(|| invalid.clone()))
        .collect()
}
