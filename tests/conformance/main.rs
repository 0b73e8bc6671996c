//! Conformance harness integration tests.
//!
//! - The reference `Message` passes every probe
//! - Defective implementations are caught by the probe covering the defect
//! - Skip lists from the factory and the config produce skipped reports

mod common;

mod defects;
mod skipping;
