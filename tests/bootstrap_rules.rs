use nexis_doctor::db::{validate_database_name, BootstrapOutcome};

#[test]
fn plain_identifiers_are_accepted() {
    for name in ["darknexis", "dark_nexis", "_scratch", "db2"] {
        assert!(validate_database_name(name).is_ok(), "rejected {name:?}");
    }
}

#[test]
fn ddl_injection_shapes_are_rejected() {
    for name in [
        "",
        "2fast",
        "dark-nexis",
        "dark nexis",
        "darknexis\"; DROP DATABASE postgres; --",
    ] {
        assert!(validate_database_name(name).is_err(), "accepted {name:?}");
    }
}

#[test]
fn outcomes_render_for_console_reporting() {
    assert_eq!(BootstrapOutcome::Created.to_string(), "created");
    assert_eq!(BootstrapOutcome::AlreadyExists.to_string(), "already exists");
    assert_ne!(BootstrapOutcome::Created, BootstrapOutcome::AlreadyExists);
}
