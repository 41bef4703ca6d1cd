//! Unit tests for domain error types

use wirekit_domain::Error;

#[test]
fn test_unresolved_parameter_names_parameter_and_service() {
    let error = Error::unresolved_parameter("missing.key", "svc/a");
    let display = error.to_string();
    assert!(display.contains("missing.key"));
    assert!(display.contains("svc/a"));
}

#[test]
fn test_unresolved_external_module_keeps_cause() {
    let error = Error::unresolved_external_module("lodash", "not installed".to_string());
    let source = std::error::Error::source(&error).expect("cause attached");
    assert_eq!(source.to_string(), "not installed");
}

#[test]
fn test_schema_validation_lists_diagnostics() {
    let error = Error::schema_validation(
        "framework",
        vec!["first problem".to_string(), "second problem".to_string()],
    );
    let display = error.to_string();
    assert!(display.contains("framework"));
    assert!(display.contains("first problem; second problem"));
}

#[test]
fn test_circular_dependency_display() {
    let error = Error::CircularDependency {
        path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    assert!(error.to_string().ends_with("a -> b -> a"));
}

#[test]
fn test_bootstrap_root_unwraps_nested_errors() {
    let inner = Error::unresolved_parameter("missing.key", "svc/a");
    let error = Error::bootstrap("services.json", Error::bootstrap("svc/a", inner));

    assert!(error.to_string().contains("services.json"));
    match error.root() {
        Error::UnresolvedParameter { name, .. } => assert_eq!(name, "missing.key"),
        other => panic!("Expected UnresolvedParameter, got {other:?}"),
    }
}

#[test]
fn test_root_of_plain_error_is_itself() {
    let error = Error::missing_controller("no controller");
    assert!(matches!(error.root(), Error::MissingController { .. }));
}
