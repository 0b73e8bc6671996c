//! Probe catalogue.
//!
//! Every probe starts from a fresh message obtained from the factory and
//! checks exactly one facet of the [`HttpMessage`] contract. A probe returns
//! `Err` with a description of the first mismatch it sees.

use once_cell::sync::Lazy;
use std::fmt;

use crate::conformance::MessageFactory;
use crate::conformance::report::Rejection;
use crate::http::arg::HeaderArg;
use crate::http::message::HttpMessage;
use crate::http::validator::MessageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    ProtocolVersion,
    GetHeaders,
    HasHeader,
    GetHeader,
    GetHeaderLine,
    WithHeader,
    WithHeaderInvalidArguments,
    WithAddedHeader,
    WithAddedHeaderInvalidArguments,
    WithAddedHeaderArrayValue,
    WithAddedHeaderArrayValueAndKeys,
    WithoutHeader,
    Body,
}

/// Name/value pairs every header mutator must reject.
pub static INVALID_HEADER_ARGUMENTS: Lazy<Vec<(HeaderArg, HeaderArg)>> = Lazy::new(|| {
    vec![
        (HeaderArg::empty_list(), "foo".into()),
        ("foo".into(), HeaderArg::empty_list()),
        ("".into(), "".into()),
        ("foo".into(), false.into()),
        (false.into(), "foo".into()),
        ("foo".into(), HeaderArg::object("stdClass")),
        (HeaderArg::object("stdClass"), "foo".into()),
    ]
});

type ProbeResult = Result<(), String>;

impl Probe {
    /// Run order.
    pub const ALL: [Probe; 13] = [
        Probe::ProtocolVersion,
        Probe::GetHeaders,
        Probe::HasHeader,
        Probe::GetHeader,
        Probe::GetHeaderLine,
        Probe::WithHeader,
        Probe::WithHeaderInvalidArguments,
        Probe::WithAddedHeader,
        Probe::WithAddedHeaderInvalidArguments,
        Probe::WithAddedHeaderArrayValue,
        Probe::WithAddedHeaderArrayValueAndKeys,
        Probe::WithoutHeader,
        Probe::Body,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Probe::ProtocolVersion => "protocol_version",
            Probe::GetHeaders => "get_headers",
            Probe::HasHeader => "has_header",
            Probe::GetHeader => "get_header",
            Probe::GetHeaderLine => "get_header_line",
            Probe::WithHeader => "with_header",
            Probe::WithHeaderInvalidArguments => "with_header_invalid_arguments",
            Probe::WithAddedHeader => "with_added_header",
            Probe::WithAddedHeaderInvalidArguments => "with_added_header_invalid_arguments",
            Probe::WithAddedHeaderArrayValue => "with_added_header_array_value",
            Probe::WithAddedHeaderArrayValueAndKeys => "with_added_header_array_value_and_keys",
            Probe::WithoutHeader => "without_header",
            Probe::Body => "body",
        }
    }

    pub fn from_name(name: &str) -> Option<Probe> {
        Probe::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn run<F: MessageFactory>(self, factory: &F) -> ProbeResult {
        match self {
            Probe::ProtocolVersion => protocol_version(factory),
            Probe::GetHeaders => get_headers(factory),
            Probe::HasHeader => has_header(factory),
            Probe::GetHeader => get_header(factory),
            Probe::GetHeaderLine => get_header_line(factory),
            Probe::WithHeader => with_header(factory),
            Probe::WithHeaderInvalidArguments => {
                invalid_arguments(factory, "with_header", |m, n, v| m.with_header(n, v))
            }
            Probe::WithAddedHeader => with_added_header(factory),
            Probe::WithAddedHeaderInvalidArguments => {
                invalid_arguments(factory, "with_added_header", |m, n, v| m.with_added_header(n, v))
            }
            Probe::WithAddedHeaderArrayValue => with_added_header_array_value(factory),
            Probe::WithAddedHeaderArrayValueAndKeys => {
                with_added_header_array_value_and_keys(factory)
            }
            Probe::WithoutHeader => without_header(factory),
            Probe::Body => body(factory),
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(format!($($arg)+));
        }
    };
}

/// By-value copy of a message taken before any mutator runs.
/// The debug rendering catches state shared between clones.
struct Snapshot<M> {
    value: M,
    rendered: String,
}

impl<M: HttpMessage> Snapshot<M> {
    fn take(message: &M) -> Self {
        Self {
            value: message.clone(),
            rendered: format!("{:?}", message),
        }
    }

    fn ensure_unchanged(&self, message: &M) -> ProbeResult {
        ensure!(
            *message == self.value && format!("{:?}", message) == self.rendered,
            "Message object MUST not be mutated: before {}, after {:?}",
            self.rendered,
            message
        );
        Ok(())
    }
}

fn accepted<M>(result: Result<M, MessageError>, call: &str) -> Result<M, String> {
    result.map_err(|err| format!("{} unexpectedly failed: {}", call, err))
}

fn ensure_eq<T: PartialEq + fmt::Debug>(actual: T, expected: T, what: &str) -> ProbeResult {
    ensure!(
        actual == expected,
        "{}: expected {:?}, got {:?}",
        what,
        expected,
        actual
    );
    Ok(())
}

/// Whether `line` contains `parts` joined by a comma and an optional space.
fn is_joined(line: &str, parts: &[&str]) -> bool {
    let Some(first) = parts.first() else {
        return true;
    };

    line.match_indices(first).any(|(start, _)| {
        let mut rest = &line[start + first.len()..];
        for part in &parts[1..] {
            let Some(after) = rest.strip_prefix(',') else {
                return false;
            };
            let after = after.strip_prefix(' ').unwrap_or(after);
            match after.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        }
        true
    })
}

fn ensure_joined(line: &str, parts: &[&str], what: &str) -> ProbeResult {
    ensure!(
        is_joined(line, parts),
        "{}: {:?} does not match {:?} joined by ', '",
        what,
        line,
        parts
    );
    Ok(())
}

fn protocol_version<F: MessageFactory>(factory: &F) -> ProbeResult {
    let initial = factory.new_message();
    let original = Snapshot::take(&initial);

    let message = initial.with_protocol_version("1.0");

    original.ensure_unchanged(&initial)?;
    ensure_eq(message.protocol_version().as_str(), "1.0", "protocol_version()")
}

fn get_headers<F: MessageFactory>(factory: &F) -> ProbeResult {
    let initial = factory.new_message();
    let original = Snapshot::take(&initial);

    let message = accepted(
        initial.with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;
    let message = accepted(
        message.with_added_header("content-type", "text/plain"),
        "with_added_header('content-type', 'text/plain')",
    )?;

    original.ensure_unchanged(&initial)?;

    let headers = message.headers();
    let Some(values) = headers.get("content-type") else {
        return Err(format!("headers() has no 'content-type' key: {:?}", headers));
    };
    ensure_eq(values.len(), 2, "number of content-type values")?;
    for expected in ["text/html", "text/plain"] {
        ensure!(
            values.iter().any(|v| v == expected),
            "content-type values {:?} do not contain {:?}",
            values,
            expected
        );
    }
    Ok(())
}

fn has_header<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;

    for name in ["content-type", "Content-Type", "ConTent-Type"] {
        ensure!(message.has_header(name), "has_header({:?}) returned false", name);
    }
    Ok(())
}

fn get_header<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;
    let message = accepted(
        message.with_added_header("content-type", "text/plain"),
        "with_added_header('content-type', 'text/plain')",
    )?;

    for name in ["content-type", "Content-Type", "CONTENT-TYPE"] {
        ensure_eq(message.header(name).len(), 2, &format!("header({:?}).len()", name))?;
    }
    ensure_eq(message.header("Bar"), Vec::new(), "header(\"Bar\")")
}

fn get_header_line<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;
    let message = accepted(
        message.with_added_header("content-type", "text/plain"),
        "with_added_header('content-type', 'text/plain')",
    )?;

    for name in ["content-type", "Content-Type", "CONTENT-TYPE"] {
        ensure_joined(
            &message.header_line(name),
            &["text/html", "text/plain"],
            &format!("header_line({:?})", name),
        )?;
    }
    ensure_eq(message.header_line("Bar"), String::new(), "header_line(\"Bar\")")
}

fn with_header<F: MessageFactory>(factory: &F) -> ProbeResult {
    let initial = factory.new_message();
    let original = Snapshot::take(&initial);

    let message = accepted(
        initial.with_header("content-type", "text/html"),
        "with_header('content-type', 'text/html')",
    )?;
    original.ensure_unchanged(&initial)?;
    ensure_eq(
        message.header_line("content-type").as_str(),
        "text/html",
        "header_line(\"content-type\")",
    )?;

    let message = accepted(
        initial.with_header("content-type", "text/plain"),
        "with_header('content-type', 'text/plain')",
    )?;
    ensure_eq(
        message.header_line("content-type").as_str(),
        "text/plain",
        "header_line(\"content-type\")",
    )?;

    let message = accepted(
        initial.with_header("Content-TYPE", "text/script"),
        "with_header('Content-TYPE', 'text/script')",
    )?;
    ensure_eq(
        message.header_line("content-type").as_str(),
        "text/script",
        "header_line(\"content-type\")",
    )?;

    let first = accepted(
        initial.with_header("content-type", "text/html"),
        "with_header('content-type', 'text/html')",
    )?;
    let replaced_from = Snapshot::take(&first);
    let message = accepted(
        first.with_header("Content-TYPE", "text/script"),
        "with_header('Content-TYPE', 'text/script') over 'content-type'",
    )?;
    replaced_from.ensure_unchanged(&first)?;
    ensure_eq(
        message.header("content-type"),
        vec!["text/script".to_string()],
        "header(\"content-type\") after replacing it",
    )?;
    ensure_eq(message.headers().len(), 1, "number of headers after replacing content-type")?;

    let message = accepted(
        initial.with_header("x-foo", ["bar", "baz"]),
        "with_header('x-foo', ['bar', 'baz'])",
    )?;
    ensure_joined(&message.header_line("x-foo"), &["bar", "baz"], "header_line(\"x-foo\")")?;

    let message = accepted(initial.with_header("Bar", ""), "with_header('Bar', '')")?;
    ensure!(message.has_header("Bar"), "has_header(\"Bar\") returned false");
    ensure_eq(message.header("Bar"), vec![String::new()], "header(\"Bar\")")
}

fn invalid_arguments<F, C>(factory: &F, call: &str, mutate: C) -> ProbeResult
where
    F: MessageFactory,
    C: Fn(&F::Message, HeaderArg, HeaderArg) -> Result<F::Message, MessageError>,
{
    for (case, (name, value)) in INVALID_HEADER_ARGUMENTS.iter().enumerate() {
        let initial = factory.new_message();
        Rejection::classify(mutate(&initial, name.clone(), value.clone()))
            .verdict(call)
            .map_err(|reason| format!("case #{} ({}, {}): {}", case, name, value, reason))?;
    }
    Ok(())
}

fn with_added_header<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;
    let message = accepted(
        message.with_added_header("CONTENT-type", "text/plain"),
        "with_added_header('CONTENT-type', 'text/plain')",
    )?;

    for name in ["content-type", "Content-Type"] {
        ensure_joined(
            &message.header_line(name),
            &["text/html", "text/plain"],
            &format!("header_line({:?})", name),
        )?;
    }
    Ok(())
}

fn ensure_line_contains<M: HttpMessage>(
    message: &M,
    name: &str,
    expected: &[&str],
) -> ProbeResult {
    let line = message.header_line(name);
    for value in expected {
        ensure!(
            line.contains(value),
            "header_line({:?}) = {:?} does not contain {:?}",
            name,
            line,
            value
        );
    }
    Ok(())
}

fn with_added_header_array_value<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", "text/html"),
        "with_added_header('content-type', 'text/html')",
    )?;
    let message = accepted(
        message.with_added_header("content-type", ["text/plain", "application/json"]),
        "with_added_header('content-type', ['text/plain', 'application/json'])",
    )?;

    ensure_line_contains(
        &message,
        "content-type",
        &["text/html", "text/plain", "application/json"],
    )
}

fn with_added_header_array_value_and_keys<F: MessageFactory>(factory: &F) -> ProbeResult {
    let message = accepted(
        factory
            .new_message()
            .with_added_header("content-type", HeaderArg::keyed([("foo", "text/html")])),
        "with_added_header('content-type', ['foo' => 'text/html'])",
    )?;
    let message = accepted(
        message.with_added_header(
            "content-type",
            HeaderArg::keyed([("foo", "text/plain"), ("bar", "application/json")]),
        ),
        "with_added_header('content-type', ['foo' => 'text/plain', 'bar' => 'application/json'])",
    )?;

    ensure_line_contains(
        &message,
        "content-type",
        &["text/html", "text/plain", "application/json"],
    )
}

fn without_header<F: MessageFactory>(factory: &F) -> ProbeResult {
    let mut message = factory.new_message();
    for (name, value) in [("content-type", "text/html"), ("Age", "0"), ("X-Foo", "bar")] {
        message = accepted(
            message.with_added_header(name, value),
            &format!("with_added_header('{}', '{}')", name, value),
        )?;
    }

    let headers = message.headers();
    let count = headers.len();
    ensure!(headers.contains_key("Age"), "headers() has no 'Age' key: {:?}", headers);

    let original = Snapshot::take(&message);
    let removed = message.without_header("age");
    original.ensure_unchanged(&message)?;

    let headers = removed.headers();
    ensure_eq(headers.len(), count - 1, "number of headers after without_header(\"age\")")?;
    ensure!(
        !headers.contains_key("Age"),
        "headers() still has 'Age' after without_header(\"age\")"
    );
    Ok(())
}

fn body<F: MessageFactory>(factory: &F) -> ProbeResult {
    let initial = factory.new_message();
    let original = Snapshot::take(&initial);
    let stream = factory.build_stream("foo");

    let message = initial.with_body(stream.clone());

    original.ensure_unchanged(&initial)?;
    ensure_eq(message.body(), stream, "body()")
}
