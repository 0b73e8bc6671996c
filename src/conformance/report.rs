use std::fmt;

use crate::conformance::probes::Probe;
use crate::http::validator::{ErrorKind, MessageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub probe: Probe,
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Failed(_))
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Passed => write!(f, "{}: ok", self.probe),
            ProbeOutcome::Failed(reason) => write!(f, "{}: FAILED ({})", self.probe, reason),
            ProbeOutcome::Skipped(reason) => write!(f, "{}: skipped ({})", self.probe, reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[ProbeReport]) -> Self {
        reports
            .iter()
            .fold(RunSummary::default(), |mut summary, report| {
                match report.outcome {
                    ProbeOutcome::Passed => summary.passed += 1,
                    ProbeOutcome::Failed(_) => summary.failed += 1,
                    ProbeOutcome::Skipped(_) => summary.skipped += 1,
                }
                summary
            })
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        )
    }
}

/// How a mutator answered an argument it must reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Rejected with one of the accepted kinds.
    Rejected(ErrorKind),
    UnexpectedSuccess,
    /// Failed, but with a kind that is not an acceptable answer.
    WrongKind(String),
}

impl Rejection {
    pub fn classify<M>(result: Result<M, MessageError>) -> Self {
        match result {
            Ok(_) => Rejection::UnexpectedSuccess,
            Err(err) => match err.kind() {
                kind @ (ErrorKind::TypeMismatch | ErrorKind::InvalidArgument) => {
                    Rejection::Rejected(kind)
                }
                ErrorKind::Other => Rejection::WrongKind(err.to_string()),
            },
        }
    }

    /// Turn the classification into a probe verdict for `call`.
    pub fn verdict(self, call: &str) -> Result<(), String> {
        match self {
            Rejection::Rejected(_) => Ok(()),
            Rejection::UnexpectedSuccess => Err(format!(
                "{}() should have raised an error on invalid argument",
                call
            )),
            Rejection::WrongKind(kind) => Err(format!(
                "Unexpected error ({}) raised from {}(); expected {} or {}",
                kind,
                call,
                ErrorKind::TypeMismatch,
                ErrorKind::InvalidArgument
            )),
        }
    }
}
