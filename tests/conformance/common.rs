use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use psr_message_conformance::{
    FnFactory, HeaderArg, HttpMessage, Message, MessageError, MessageFactory, Probe, ProbeOutcome,
    ProbeReport,
};

pub fn reference_factory() -> impl MessageFactory<Message = Message<Vec<u8>>> {
    FnFactory::new(Message::<Vec<u8>>::new, |content: &str| {
        content.as_bytes().to_vec()
    })
}

/// One contract violation to inject into [`Quirky`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    None,
    /// Writes through state shared with clones of the receiver.
    SharedState,
    CaseSensitiveLookup,
    SemicolonJoin,
    AcceptsAnything,
    WrongErrorKind,
    PanicsOnBody,
    IgnoresRemoval,
    /// Records removals in state shared with clones of the receiver.
    RemovesInPlace,
    /// Appends where it should replace.
    SetAppends,
}

/// Wraps the reference message and misbehaves according to its defect.
#[derive(Debug, Clone, PartialEq)]
pub struct Quirky {
    inner: Message<String>,
    defect: Defect,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Quirky {
    pub fn new(defect: Defect) -> Self {
        Self {
            inner: Message::new(),
            defect,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn wrap(&self, inner: Message<String>) -> Self {
        if self.defect == Defect::SharedState {
            self.calls.borrow_mut().push("mutated".to_string());
        }
        Self {
            inner,
            defect: self.defect,
            calls: Rc::clone(&self.calls),
        }
    }

    fn lookup(&self, name: &str) -> Option<Vec<String>> {
        if self.defect == Defect::CaseSensitiveLookup {
            self.inner.headers().get(name).cloned()
        } else if self.inner.has_header(name) {
            Some(self.inner.header(name))
        } else {
            None
        }
    }

    fn mutated(&self, result: Result<Message<String>, MessageError>) -> Result<Self, MessageError> {
        match (self.defect, result) {
            (_, Ok(inner)) => Ok(self.wrap(inner)),
            (Defect::AcceptsAnything, Err(_)) => Ok(self.clone()),
            (Defect::WrongErrorKind, Err(err)) => Err(MessageError::Other {
                kind: "RuntimeError".to_string(),
                message: err.to_string(),
            }),
            (_, Err(err)) => Err(err),
        }
    }
}

impl HttpMessage for Quirky {
    type Body = String;

    fn protocol_version(&self) -> String {
        self.inner.protocol_version()
    }

    fn with_protocol_version(&self, version: &str) -> Self {
        self.wrap(self.inner.with_protocol_version(version))
    }

    fn headers(&self) -> IndexMap<String, Vec<String>> {
        self.inner.headers()
    }

    fn has_header(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn header(&self, name: &str) -> Vec<String> {
        self.lookup(name).unwrap_or_default()
    }

    fn header_line(&self, name: &str) -> String {
        let values = self.lookup(name).unwrap_or_default();
        if self.defect == Defect::SemicolonJoin {
            values.join(";")
        } else {
            values.join(", ")
        }
    }

    fn with_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError> {
        if self.defect == Defect::SetAppends {
            return self.mutated(self.inner.with_added_header(name, value));
        }
        self.mutated(self.inner.with_header(name, value))
    }

    fn with_added_header(
        &self,
        name: impl Into<HeaderArg>,
        value: impl Into<HeaderArg>,
    ) -> Result<Self, MessageError> {
        self.mutated(self.inner.with_added_header(name, value))
    }

    fn without_header(&self, name: &str) -> Self {
        if self.defect == Defect::IgnoresRemoval {
            return self.clone();
        }
        if self.defect == Defect::RemovesInPlace {
            self.calls.borrow_mut().push(format!("removed {name}"));
        }
        self.wrap(self.inner.without_header(name))
    }

    fn body(&self) -> String {
        self.inner.body()
    }

    fn with_body(&self, body: String) -> Self {
        if self.defect == Defect::PanicsOnBody {
            panic!("stream is detached");
        }
        self.wrap(self.inner.with_body(body))
    }
}

pub fn quirky_factory(defect: Defect) -> impl MessageFactory<Message = Quirky> {
    FnFactory::new(move || Quirky::new(defect), |content: &str| content.to_string())
}

pub fn outcome_of(reports: &[ProbeReport], probe: Probe) -> &ProbeOutcome {
    &reports
        .iter()
        .find(|r| r.probe == probe)
        .unwrap_or_else(|| panic!("no report for {probe}"))
        .outcome
}

pub fn failed_probes(reports: &[ProbeReport]) -> Vec<Probe> {
    reports
        .iter()
        .filter(|r| r.is_failure())
        .map(|r| r.probe)
        .collect()
}
