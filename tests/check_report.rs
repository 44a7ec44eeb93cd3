use nexis_doctor::{CheckReport, CheckStatus};

#[test]
fn report_passes_until_a_step_fails() {
    let mut report = CheckReport::new("workflow");
    assert!(report.passed());

    report.pass("backend health", "healthy");
    report.warn("frontend proxy", "status 502");
    report.skip("authenticated upload", "no token available");
    assert!(report.passed());

    report.fail("analyze endpoint", "connection refused");
    assert!(!report.passed());
}

#[test]
fn renderer_emits_one_labelled_line_per_step() {
    let mut report = CheckReport::new("connection");
    report.pass("api root", "status 200 OK");
    report.fail("login", "login rejected with status 401");
    report.note("check credentials in .env");

    let rendered = report.render();
    assert!(rendered.starts_with("== connection ==\n"));
    assert!(rendered.contains("PASS api root: status 200 OK"));
    assert!(rendered.contains("FAIL login: login rejected with status 401"));
    assert!(rendered.contains("check credentials in .env"));
    assert!(rendered.ends_with("== connection: failed ==\n"));
}

#[test]
fn status_labels_are_stable() {
    assert_eq!(CheckStatus::Pass.label(), "PASS");
    assert_eq!(CheckStatus::Warn.label(), "WARN");
    assert_eq!(CheckStatus::Fail.label(), "FAIL");
    assert_eq!(CheckStatus::Skip.label(), "SKIP");
}
