//! Validation of incoming summary requests.
//!
//! Request bodies arrive as loose JSON. Every field is checked and every problem is
//! collected so the caller sees all of them in a single response.

use crate::error::{Error, FieldErrors};
use crate::language::Language;
use serde_json::{Map, Value};

pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Key used for problems that aren't tied to a single field.
pub const GENERAL_FIELD: &str = "general";

const REQUIRED: &str = "Required";
const EXPECTED_STRING: &str = "Expected string";
const COMPLAINT_ID_REQUIRED: &str = "Complaint ID is required";
const TRANSCRIPT_TOO_SHORT: &str = "Transcript must be at least 50 characters";

/// A request that passed validation and can be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub complaint_id: String,
    pub transcript: String,
    pub language: Language,
}

/// Checks a raw request body and turns it into a [`SummaryRequest`].
pub fn validate(body: &Value) -> Result<SummaryRequest, Error> {
    let Some(object) = body.as_object() else {
        return Err(rejected_input("Expected object"));
    };

    let mut errors = FieldErrors::new();

    let complaint_id = complaint_id(object).map_err(|msg| push(&mut errors, "complaintId", msg));
    let transcript = transcript(object).map_err(|msg| push(&mut errors, "transcript", msg));
    let language = language(object).map_err(|msg| push(&mut errors, "language", msg));

    match (complaint_id, transcript, language) {
        (Ok(complaint_id), Ok(transcript), Ok(language)) => Ok(SummaryRequest {
            complaint_id,
            transcript,
            language,
        }),
        _ => Err(Error::validation(errors)),
    }
}

/// Validation failure for input that couldn't be read as a request at all.
pub fn rejected_input(message: impl Into<String>) -> Error {
    let mut errors = FieldErrors::new();
    push(&mut errors, GENERAL_FIELD, message.into());
    Error::validation(errors)
}

fn push(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn required_string<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, String> {
    match object.get(field) {
        None | Some(Value::Null) => Err(REQUIRED.to_string()),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}

/// The id is the listing key, so it is kept exactly as sent.
fn complaint_id(object: &Map<String, Value>) -> Result<String, String> {
    let value = required_string(object, "complaintId")?;
    if value.trim().is_empty() {
        return Err(COMPLAINT_ID_REQUIRED.to_string());
    }
    Ok(value.to_string())
}

/// Length is measured in UTF-16 code units, the unit browser clients count in.
fn transcript(object: &Map<String, Value>) -> Result<String, String> {
    let value = required_string(object, "transcript")?;
    if value.encode_utf16().count() < MIN_TRANSCRIPT_CHARS {
        return Err(TRANSCRIPT_TOO_SHORT.to_string());
    }
    Ok(value.to_string())
}

fn language(object: &Map<String, Value>) -> Result<Language, String> {
    match object.get("language") {
        None => Ok(Language::default()),
        Some(Value::String(code)) => code.parse().map_err(|_| invalid_language()),
        Some(_) => Err(invalid_language()),
    }
}

fn invalid_language() -> String {
    let expected = Language::CODES
        .iter()
        .map(|code| format!("'{code}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Invalid enum value. Expected {expected}")
}
