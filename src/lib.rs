//! Immutable HTTP message model and a conformance harness for it.
//!
//! - [`http`] holds the header collection, validation rules, the
//!   [`HttpMessage`](http::message::HttpMessage) contract and a reference
//!   [`Message`](http::message::Message).
//! - [`conformance`] drives any implementation of the contract through a
//!   fixed set of probes, given only a [`MessageFactory`](conformance::MessageFactory).
//! - [`config`] loads harness settings (the skip list) from TOML.

pub mod config;
pub mod conformance;
pub mod http;

pub use config::{ConfigError, HarnessConfig};
pub use conformance::{FnFactory, Harness, MessageFactory, Probe, ProbeOutcome, ProbeReport};
pub use http::arg::HeaderArg;
pub use http::headers::HeaderMap;
pub use http::message::{HttpMessage, Message};
pub use http::validator::{ErrorKind, MessageError};
