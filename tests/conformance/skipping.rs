use psr_message_conformance::conformance::RunSummary;
use psr_message_conformance::{FnFactory, Harness, HarnessConfig, Message, Probe, ProbeOutcome};

use crate::common::{Defect, outcome_of, quirky_factory, reference_factory};

#[test]
fn factory_skip_list_is_honoured() {
    let factory = FnFactory::new(Message::<Vec<u8>>::new, |content: &str| {
        content.as_bytes().to_vec()
    })
    .skip("body", "streams are compared elsewhere");

    let reports = Harness::new(factory).run();
    assert_eq!(
        outcome_of(&reports, Probe::Body),
        &ProbeOutcome::Skipped("streams are compared elsewhere".to_string())
    );

    let summary = RunSummary::from_reports(&reports);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.passed, Probe::ALL.len() - 1);
}

#[test]
fn skipped_probe_never_runs() {
    let config = HarnessConfig::default().skip("body", "known panic");
    let reports = Harness::with_config(quirky_factory(Defect::PanicsOnBody), config).run();

    assert!(RunSummary::from_reports(&reports).is_success());
    assert_eq!(
        outcome_of(&reports, Probe::Body),
        &ProbeOutcome::Skipped("known panic".to_string())
    );
}

#[test]
fn config_reason_wins_over_factory() {
    let factory = FnFactory::new(Message::<Vec<u8>>::new, |content: &str| {
        content.as_bytes().to_vec()
    })
    .skip("has_header", "from factory");
    let config: HarnessConfig = r#"
        [skipped]
        has_header = "from config"
        get_header = "also skipped"
    "#
    .parse()
    .unwrap();

    let reports = Harness::with_config(factory, config).run();
    assert_eq!(
        outcome_of(&reports, Probe::HasHeader),
        &ProbeOutcome::Skipped("from config".to_string())
    );
    assert_eq!(
        outcome_of(&reports, Probe::GetHeader),
        &ProbeOutcome::Skipped("also skipped".to_string())
    );
}

#[test]
fn unknown_skip_names_are_ignored() {
    let config = HarnessConfig::default().skip("testBody", "legacy name");
    let reports = Harness::with_config(reference_factory(), config).run();

    let summary = RunSummary::from_reports(&reports);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.passed, Probe::ALL.len());
}

#[test]
fn single_probe_can_be_run() {
    let harness = Harness::new(reference_factory());
    let report = harness.run_probe(Probe::WithAddedHeaderArrayValueAndKeys);
    assert_eq!(report.outcome, ProbeOutcome::Passed);
    assert_eq!(
        report.to_string(),
        "with_added_header_array_value_and_keys: ok"
    );
}
