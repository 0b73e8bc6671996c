//! Immutable HTTP messages.
//!
//! [`HttpMessage`] is the contract every message implementation honours:
//! readers never fail, and every `with*` method returns a new message,
//! leaving the receiver untouched. [`Message`] is the reference
//! implementation, generic over an opaque body type.

use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

use crate::http::HttpVersion;
use crate::http::arg::HeaderArg;
use crate::http::headers::HeaderMap;
use crate::http::validator::{MessageError, Validator};

pub trait HttpMessage: Clone + PartialEq + fmt::Debug {
    type Body: Clone + PartialEq + fmt::Debug;

    fn protocol_version(&self) -> String;

    fn with_protocol_version(&self, version: &str) -> Self;

    /// All headers keyed by canonical name, values in insertion order.
    fn headers(&self) -> IndexMap<String, Vec<String>>;

    /// Case-insensitive presence check.
    fn has_header(&self, name: &str) -> bool;

    /// Values of `name`, or an empty list if absent.
    fn header(&self, name: &str) -> Vec<String>;

    /// Values of `name` joined by a comma, or an empty string if absent.
    fn header_line(&self, name: &str) -> String;

    /// Replace `name` with `value`.
    ///
    /// Fails with [`MessageError::TypeMismatch`] or
    /// [`MessageError::InvalidArgument`] when the name is not a token or
    /// the value is neither text nor a list of text.
    fn with_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError>;

    /// Append `value` to `name`, keeping the stored casing of an existing
    /// entry. Fails like [`with_header`](HttpMessage::with_header).
    fn with_added_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError>;

    /// Drop `name`; absent names are a no-op.
    fn without_header(&self, name: &str) -> Self;

    fn body(&self) -> Self::Body;

    fn with_body(&self, body: Self::Body) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message<B = Vec<u8>> {
    protocol_version: String,
    headers: HeaderMap,
    body: B,
}

impl<B: Default> Message<B> {
    pub fn new() -> Self {
        Self {
            protocol_version: HttpVersion::default().as_str().to_string(),
            headers: HeaderMap::new(),
            body: B::default(),
        }
    }
}

impl<B: Default> Default for Message<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Message<B> {
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body_ref(&self) -> &B {
        &self.body
    }

    fn validated(
        name: HeaderArg,
        value: HeaderArg,
    ) -> Result<(String, Vec<String>), MessageError> {
        let checked = Validator::header_name(&name)
            .map(str::to_string)
            .and_then(|name| Ok((name, Validator::header_values(&value)?)));

        if let Err(err) = &checked {
            debug!(name = %name, value = %value, error = %err, "header rejected");
        }
        checked
    }
}

impl<B> HttpMessage for Message<B>
where
    B: Clone + PartialEq + fmt::Debug,
{
    type Body = B;

    fn protocol_version(&self) -> String {
        self.protocol_version.clone()
    }

    fn with_protocol_version(&self, version: &str) -> Self {
        if HttpVersion::from_text(version).is_none() {
            debug!(version, "unknown protocol version");
        }
        Self {
            protocol_version: version.to_string(),
            ..self.clone()
        }
    }

    fn headers(&self) -> IndexMap<String, Vec<String>> {
        self.headers.to_map()
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    fn header(&self, name: &str) -> Vec<String> {
        self.headers.get_all(name)
    }

    fn header_line(&self, name: &str) -> String {
        self.headers.line(name)
    }

    fn with_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError> {
        let (name, values) = Self::validated(name.into(), value.into())?;
        let mut message = self.clone();
        message.headers.set(&name, values);
        Ok(message)
    }

    fn with_added_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError> {
        let (name, values) = Self::validated(name.into(), value.into())?;
        let mut message = self.clone();
        message.headers.append(&name, values);
        Ok(message)
    }

    fn without_header(&self, name: &str) -> Self {
        let mut message = self.clone();
        message.headers.remove(name);
        message
    }

    fn body(&self) -> B {
        self.body.clone()
    }

    fn with_body(&self, body: B) -> Self {
        Self {
            body,
            protocol_version: self.protocol_version.clone(),
            headers: self.headers.clone(),
        }
    }
}
