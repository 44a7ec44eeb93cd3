use nexis_doctor::{classify_analyze_status, CheckStatus};
use reqwest::StatusCode;

#[test]
fn auth_required_counts_as_reachable() {
    let (status, detail) = classify_analyze_status(StatusCode::UNAUTHORIZED);
    assert_eq!(status, CheckStatus::Pass);
    assert!(detail.contains("authentication required"));
}

#[test]
fn validation_error_counts_as_reachable() {
    let (status, detail) = classify_analyze_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(status, CheckStatus::Pass);
    assert!(detail.contains("validation"));
}

#[test]
fn open_endpoint_is_flagged() {
    let (status, detail) = classify_analyze_status(StatusCode::OK);
    assert_eq!(status, CheckStatus::Warn);
    assert!(detail.contains("unauthenticated"));
}

#[test]
fn server_errors_are_flagged_without_failing() {
    let (status, detail) = classify_analyze_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(status, CheckStatus::Warn);
    assert!(detail.contains("500"));
}
