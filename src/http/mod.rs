pub mod arg;
pub mod headers;
pub mod message;
pub mod validator;

/// Protocol versions a message may carry.
/// Messages store the version as text (see [`message::HttpMessage::protocol_version`]);
/// this enum only names the well-known values.
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy, Default)]
pub enum HttpVersion {
    V1_0,
    #[default]
    V1_1,
    V2_0,
    V3_0,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::V1_0 => "1.0",
            HttpVersion::V1_1 => "1.1",
            HttpVersion::V2_0 => "2.0",
            HttpVersion::V3_0 => "3.0",
        }
    }

    /// Check if a textual version corresponds to a known HTTP version
    pub fn from_text(v: &str) -> Option<HttpVersion> {
        match v {
            "1.0" => Some(HttpVersion::V1_0),
            "1.1" => Some(HttpVersion::V1_1),
            "2" | "2.0" => Some(HttpVersion::V2_0),
            "3" | "3.0" => Some(HttpVersion::V3_0),
            _ => None,
        }
    }
}
