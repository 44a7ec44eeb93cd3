use nexis_doctor::worker::{APP_ROOT_CONTEXT, BACKEND_CONTEXT, SEARCH_CONTEXTS, SIMPLE_WORKER};
use nexis_doctor::{mock_analysis_task, WorkerRegistry};

#[test]
fn verdict_carries_the_contract_fields() {
    let verdict = mock_analysis_task("test_file.jpg", 123);
    let json = serde_json::to_value(&verdict).expect("verdict serializes");

    let object = json.as_object().expect("verdict is an object");
    assert!(object.contains_key("isDeepfake"));
    assert!(object.contains_key("confidence"));
    assert!(object["isDeepfake"].is_boolean());
    assert!(object["confidence"].is_f64());
}

#[test]
fn confidence_stays_in_range() {
    for (filename, file_id) in [
        ("test_file.jpg", 123_i64),
        ("test_video.mp4", 456),
        ("weird name with spaces.webm", 0),
        ("", -1),
    ] {
        let verdict = mock_analysis_task(filename, file_id);
        assert!(
            (0.0..=1.0).contains(&verdict.confidence),
            "confidence {} out of range for {filename:?}",
            verdict.confidence
        );
    }
}

#[test]
fn verdicts_are_deterministic() {
    let first = mock_analysis_task("test_file.jpg", 123);
    let second = mock_analysis_task("test_file.jpg", 123);
    assert_eq!(first, second);
}

#[test]
fn rendering_a_verdict_does_not_panic() {
    let verdict = mock_analysis_task("test_file.jpg", 123);
    let rendered = format!(
        "deepfake={} confidence={:.3} model={}",
        verdict.is_deepfake, verdict.confidence, verdict.model_version
    );
    assert!(rendered.contains("confidence="));
}

#[test]
fn worker_resolves_identically_from_every_context() {
    let registry = WorkerRegistry::with_mock_worker();

    let from_app = registry
        .resolve(APP_ROOT_CONTEXT, SIMPLE_WORKER)
        .expect("worker reachable from app root");
    let from_backend = registry
        .resolve(BACKEND_CONTEXT, SIMPLE_WORKER)
        .expect("worker reachable from backend tree");

    assert_eq!(
        from_app("test_file.jpg", 123),
        from_backend("test_file.jpg", 123)
    );
    assert_eq!(SEARCH_CONTEXTS.len(), 2);
}

#[test]
fn unknown_worker_does_not_resolve() {
    let registry = WorkerRegistry::with_mock_worker();
    assert!(registry
        .resolve(APP_ROOT_CONTEXT, "workers/real_worker")
        .is_none());
    assert!(registry.resolve("somewhere-else", SIMPLE_WORKER).is_none());
}
