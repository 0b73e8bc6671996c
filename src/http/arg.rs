//! Dynamically typed header arguments.
//!
//! Header mutators accept names and values coming from loosely typed
//! sources (configuration, decoded payloads, adapter glue), so both are
//! passed as a [`HeaderArg`]. The [`validator`](crate::http::validator)
//! decides which shapes are acceptable.

use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderArg {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Positional list, e.g. `["bar", "baz"]`.
    List(Vec<HeaderArg>),
    /// Associative list; only the values matter, in insertion order.
    Keyed(IndexMap<String, HeaderArg>),
    /// Opaque object, identified by its type name.
    Object(String),
}

impl HeaderArg {
    pub fn keyed<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HeaderArg>,
    {
        HeaderArg::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn object(type_name: &str) -> Self {
        HeaderArg::Object(type_name.to_string())
    }

    pub fn empty_list() -> Self {
        HeaderArg::List(Vec::new())
    }

    /// Short type label used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            HeaderArg::Text(_) => "string",
            HeaderArg::Int(_) => "integer",
            HeaderArg::Float(_) => "float",
            HeaderArg::Bool(_) => "boolean",
            HeaderArg::Null => "null",
            HeaderArg::List(_) | HeaderArg::Keyed(_) => "array",
            HeaderArg::Object(name) => name,
        }
    }
}

impl fmt::Display for HeaderArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderArg::Text(s) => write!(f, "{:?}", s),
            HeaderArg::Int(n) => write!(f, "{}", n),
            HeaderArg::Float(n) => write!(f, "{}", n),
            HeaderArg::Bool(b) => write!(f, "{}", b),
            HeaderArg::Null => write!(f, "null"),
            HeaderArg::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            HeaderArg::Keyed(items) => {
                write!(f, "[")?;
                for (i, (k, v)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} => {}", k, v)?;
                }
                write!(f, "]")
            }
            HeaderArg::Object(name) => write!(f, "object({})", name),
        }
    }
}

impl From<&str> for HeaderArg {
    fn from(s: &str) -> Self {
        HeaderArg::Text(s.to_string())
    }
}

impl From<String> for HeaderArg {
    fn from(s: String) -> Self {
        HeaderArg::Text(s)
    }
}

impl From<&String> for HeaderArg {
    fn from(s: &String) -> Self {
        HeaderArg::Text(s.clone())
    }
}

impl From<bool> for HeaderArg {
    fn from(b: bool) -> Self {
        HeaderArg::Bool(b)
    }
}

impl From<i64> for HeaderArg {
    fn from(n: i64) -> Self {
        HeaderArg::Int(n)
    }
}

impl From<i32> for HeaderArg {
    fn from(n: i32) -> Self {
        HeaderArg::Int(n.into())
    }
}

impl From<u32> for HeaderArg {
    fn from(n: u32) -> Self {
        HeaderArg::Int(n.into())
    }
}

impl From<f64> for HeaderArg {
    fn from(n: f64) -> Self {
        HeaderArg::Float(n)
    }
}

impl<T: Into<HeaderArg>> From<Vec<T>> for HeaderArg {
    fn from(items: Vec<T>) -> Self {
        HeaderArg::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<HeaderArg>, const N: usize> From<[T; N]> for HeaderArg {
    fn from(items: [T; N]) -> Self {
        HeaderArg::List(items.into_iter().map(Into::into).collect())
    }
}
