//! Header name and value validation.
//!
//! Names must be RFC 7230 tokens. Values must be text, or a non-empty list
//! of plain values (text or numbers); list keys are dropped and order is
//! kept. Each value is trimmed of surrounding spaces and tabs and must not
//! contain control characters other than horizontal tab.
//!
//! Rejections are reported with exactly one of two kinds:
//! [`ErrorKind::TypeMismatch`] when the argument has the wrong shape, and
//! [`ErrorKind::InvalidArgument`] when the shape is right but the content
//! is not acceptable.

use crate::http::arg::HeaderArg;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    InvalidArgument,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::Other => "Other",
        })
    }
}

/// Errors returned by message mutators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MessageError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other failure; never an acceptable answer to invalid input.
    #[error("{kind}: {message}")]
    Other { kind: String, message: String },
}

impl MessageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MessageError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            MessageError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            MessageError::Other { .. } => ErrorKind::Other,
        }
    }
}

pub struct Validator;

impl Validator {
    /// Validate a header name and return it as text.
    pub fn header_name(name: &HeaderArg) -> Result<&str, MessageError> {
        let name = match name {
            HeaderArg::Text(s) => s.as_str(),
            other => {
                return Err(MessageError::TypeMismatch(format!(
                    "header name must be a string, got {}",
                    other.type_name()
                )));
            }
        };

        if name.is_empty() {
            return Err(MessageError::InvalidArgument(
                "header name must not be empty".to_string(),
            ));
        }

        if !is_token(name) {
            return Err(MessageError::InvalidArgument(format!(
                "header name {:?} is not a valid token",
                name
            )));
        }

        Ok(name)
    }

    /// Normalize a header value into its ordered list of strings.
    pub fn header_values(value: &HeaderArg) -> Result<Vec<String>, MessageError> {
        let values: Vec<String> = match value {
            HeaderArg::Text(s) => vec![s.clone()],
            HeaderArg::List(items) => Self::plain_values(items.iter())?,
            HeaderArg::Keyed(items) => Self::plain_values(items.values())?,
            other => {
                return Err(MessageError::TypeMismatch(format!(
                    "header value must be a string or an array of strings, got {}",
                    other.type_name()
                )));
            }
        };

        values
            .into_iter()
            .map(|v| {
                let v = v.trim_matches(|c: char| c == ' ' || c == '\t');
                if is_field_value(v) {
                    Ok(v.to_string())
                } else {
                    Err(MessageError::InvalidArgument(format!(
                        "header value {:?} contains forbidden characters",
                        v
                    )))
                }
            })
            .collect()
    }

    fn plain_values<'a, I>(items: I) -> Result<Vec<String>, MessageError>
    where
        I: ExactSizeIterator<Item = &'a HeaderArg>,
    {
        if items.len() == 0 {
            return Err(MessageError::InvalidArgument(
                "header values must be a string or a non-empty array of strings".to_string(),
            ));
        }

        items
            .map(|item| match item {
                HeaderArg::Text(s) => Ok(s.clone()),
                HeaderArg::Int(n) => Ok(n.to_string()),
                HeaderArg::Float(n) => Ok(n.to_string()),
                other => Err(MessageError::InvalidArgument(format!(
                    "header values must be strings or numbers, got {}",
                    other.type_name()
                ))),
            })
            .collect()
    }
}

/// RFC 7230 `tchar`
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_tchar)
}

/// Visible ASCII, space, tab and obs-text.
fn is_field_value(s: &str) -> bool {
    s.bytes()
        .all(|b| b == b'\t' || b == b' ' || (0x21..=0x7e).contains(&b) || b >= 0x80)
}
