//! Transport projections of the catalog entities.
//!
//! DTOs are the JSON shape exchanged with clients. Incoming DTOs are
//! validated and sanitized here before they turn into domain payloads;
//! outgoing DTOs are built from fully loaded entities.

use thiserror::Error;
use validator::ValidationErrors;

pub mod category;
pub mod field_message;
pub mod product;

pub use category::CategoryDto;
pub use field_message::FieldMessage;
pub use product::ProductDto;

/// Result type returned by the DTO conversion helpers.
pub type DtoResult<T> = Result<T, DtoError>;

/// Errors raised while turning a DTO into a domain payload.
#[derive(Debug, Error)]
pub enum DtoError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A field that passed declarative validation but is still unusable.
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl DtoError {
    /// Flatten the error into per-field messages sorted by field name.
    pub fn field_messages(&self) -> Vec<FieldMessage> {
        let mut messages = match self {
            DtoError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    let field_name = to_camel_case(&field.to_string());
                    errors.iter().map(move |error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        FieldMessage::new(field_name.clone(), message)
                    })
                })
                .collect(),
            DtoError::Invalid { field, message } => {
                vec![FieldMessage::new(*field, message.clone())]
            }
        };

        messages.sort_by(|a, b| {
            a.field_name
                .cmp(&b.field_name)
                .then_with(|| a.message.cmp(&b.message))
        });
        messages
    }
}

fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;

    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Trim the input and collapse inner whitespace runs into single spaces.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line and drop leading and trailing blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
