use psr_message_conformance::{Harness, Probe, ProbeOutcome, ProbeReport};

use crate::common::{Defect, failed_probes, outcome_of, quirky_factory};

fn run(defect: Defect) -> Vec<ProbeReport> {
    Harness::new(quirky_factory(defect)).run()
}

fn failure_reason(reports: &[ProbeReport], probe: Probe) -> String {
    match outcome_of(reports, probe) {
        ProbeOutcome::Failed(reason) => reason.clone(),
        other => panic!("{probe} should have failed, got {other:?}"),
    }
}

#[test]
fn shared_state_breaks_immutability() {
    let reports = run(Defect::SharedState);

    for probe in [
        Probe::ProtocolVersion,
        Probe::GetHeaders,
        Probe::WithHeader,
        Probe::WithoutHeader,
        Probe::Body,
    ] {
        let reason = failure_reason(&reports, probe);
        assert!(reason.contains("MUST not be mutated"), "{probe}: {reason}");
    }
    assert_eq!(outcome_of(&reports, Probe::HasHeader), &ProbeOutcome::Passed);
}

#[test]
fn case_sensitive_lookup_is_caught() {
    let reports = run(Defect::CaseSensitiveLookup);

    let reason = failure_reason(&reports, Probe::HasHeader);
    assert!(reason.contains("Content-Type"), "{reason}");
    assert!(failed_probes(&reports).contains(&Probe::GetHeader));
    assert!(failed_probes(&reports).contains(&Probe::GetHeaderLine));
}

#[test]
fn wrong_separator_is_caught() {
    let reports = run(Defect::SemicolonJoin);

    let reason = failure_reason(&reports, Probe::GetHeaderLine);
    assert!(reason.contains("text/html;text/plain"), "{reason}");
    assert!(failed_probes(&reports).contains(&Probe::WithAddedHeader));
    assert_eq!(outcome_of(&reports, Probe::GetHeader), &ProbeOutcome::Passed);
}

#[test]
fn accepting_invalid_input_is_caught() {
    let reports = run(Defect::AcceptsAnything);

    assert_eq!(
        failed_probes(&reports),
        [
            Probe::WithHeaderInvalidArguments,
            Probe::WithAddedHeaderInvalidArguments
        ]
    );
    let reason = failure_reason(&reports, Probe::WithHeaderInvalidArguments);
    assert!(reason.starts_with("case #0"), "{reason}");
    assert!(
        reason.contains("with_header() should have raised an error on invalid argument"),
        "{reason}"
    );
}

#[test]
fn wrong_error_kind_is_named() {
    let reports = run(Defect::WrongErrorKind);

    let reason = failure_reason(&reports, Probe::WithAddedHeaderInvalidArguments);
    assert!(reason.contains("Unexpected error (RuntimeError"), "{reason}");
    assert!(reason.contains("expected TypeMismatch or InvalidArgument"), "{reason}");
    assert_eq!(failed_probes(&reports).len(), 2);
}

#[test]
fn panic_fails_only_its_probe() {
    let reports = run(Defect::PanicsOnBody);

    assert_eq!(failed_probes(&reports), [Probe::Body]);
    let reason = failure_reason(&reports, Probe::Body);
    assert_eq!(reason, "panic: stream is detached");
}

#[test]
fn ignored_removal_is_caught() {
    let reports = run(Defect::IgnoresRemoval);

    assert_eq!(failed_probes(&reports), [Probe::WithoutHeader]);
    let reason = failure_reason(&reports, Probe::WithoutHeader);
    assert!(reason.contains("without_header"), "{reason}");
}

#[test]
fn removal_through_shared_state_is_caught() {
    let reports = run(Defect::RemovesInPlace);

    assert_eq!(failed_probes(&reports), [Probe::WithoutHeader]);
    let reason = failure_reason(&reports, Probe::WithoutHeader);
    assert!(reason.contains("MUST not be mutated"), "{reason}");
    assert!(reason.contains("removed age"), "{reason}");
}

#[test]
fn set_that_appends_is_caught() {
    let reports = run(Defect::SetAppends);

    assert_eq!(failed_probes(&reports), [Probe::WithHeader]);
    let reason = failure_reason(&reports, Probe::WithHeader);
    assert!(reason.contains("after replacing it"), "{reason}");
    assert!(reason.contains("text/html"), "{reason}");
}
