//! Conformance harness for [`HttpMessage`] implementations.
//!
//! The harness knows nothing about the implementation it checks. It is
//! handed a [`MessageFactory`] that produces fresh messages and body
//! streams, and runs every [`Probe`] against it in turn.
//!
//! ## Probe lifecycle
//!
//! 1. If the probe name is in the skip list, report it as skipped
//! 2. Obtain a fresh message from the factory
//! 3. Snapshot it, apply the mutators under test
//! 4. Check the receiver is unchanged and the result shows the facet under test
//!
//! Probes share no state. A failing or panicking probe is reported and the
//! run moves on to the next one.

pub mod probes;
pub mod report;

use indexmap::IndexMap;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::http::message::HttpMessage;

pub use probes::Probe;
pub use report::{ProbeOutcome, ProbeReport, Rejection, RunSummary};

/// What an implementation under test supplies to the harness.
pub trait MessageFactory {
    type Message: HttpMessage;

    /// A message in its default state: default protocol version, no headers.
    fn new_message(&self) -> Self::Message;

    fn build_stream(&self, content: &str) -> <Self::Message as HttpMessage>::Body;

    /// Probe name to skip reason.
    fn skipped_probes(&self) -> IndexMap<String, String> {
        IndexMap::new()
    }
}

/// [`MessageFactory`] built from a pair of functions.
pub struct FnFactory<N, S> {
    new_message: N,
    build_stream: S,
    skipped: IndexMap<String, String>,
}

impl<N, S> FnFactory<N, S> {
    pub fn new(new_message: N, build_stream: S) -> Self {
        Self {
            new_message,
            build_stream,
            skipped: IndexMap::new(),
        }
    }

    pub fn skip(mut self, probe: &str, reason: &str) -> Self {
        self.skipped.insert(probe.to_string(), reason.to_string());
        self
    }
}

impl<M, N, S> MessageFactory for FnFactory<N, S>
where
    M: HttpMessage,
    N: Fn() -> M,
    S: Fn(&str) -> M::Body,
{
    type Message = M;

    fn new_message(&self) -> M {
        (self.new_message)()
    }

    fn build_stream(&self, content: &str) -> M::Body {
        (self.build_stream)(content)
    }

    fn skipped_probes(&self) -> IndexMap<String, String> {
        self.skipped.clone()
    }
}

pub struct Harness<F> {
    factory: F,
    skipped: IndexMap<String, String>,
}

impl<F: MessageFactory> Harness<F> {
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, HarnessConfig::default())
    }

    /// Skip reasons from `config` take precedence over the factory's.
    pub fn with_config(factory: F, config: HarnessConfig) -> Self {
        let mut skipped = factory.skipped_probes();
        skipped.extend(config.skipped);

        for name in skipped.keys() {
            if Probe::from_name(name).is_none() {
                warn!(probe = %name, "skip list names an unknown probe");
            }
        }

        Self { factory, skipped }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn run_probe(&self, probe: Probe) -> ProbeReport {
        if let Some(reason) = self.skipped.get(probe.as_str()) {
            info!(probe = %probe, reason = %reason, "probe skipped");
            return ProbeReport {
                probe,
                outcome: ProbeOutcome::Skipped(reason.clone()),
            };
        }

        debug!(probe = %probe, "running probe");
        let result = panic::catch_unwind(AssertUnwindSafe(|| probe.run(&self.factory)))
            .unwrap_or_else(|payload| Err(format!("panic: {}", panic_message(&*payload))));

        let outcome = match result {
            Ok(()) => {
                info!(probe = %probe, "probe passed");
                ProbeOutcome::Passed
            }
            Err(reason) => {
                warn!(probe = %probe, reason = %reason, "probe failed");
                ProbeOutcome::Failed(reason)
            }
        };

        ProbeReport { probe, outcome }
    }

    pub fn run(&self) -> Vec<ProbeReport> {
        Probe::ALL
            .into_iter()
            .map(|probe| self.run_probe(probe))
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
