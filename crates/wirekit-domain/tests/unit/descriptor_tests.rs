//! Unit tests for service descriptors and container configuration documents

use serde_json::json;
use wirekit_domain::Error;
use wirekit_domain::value_objects::{ContainerConfiguration, ServiceDescriptor};

#[test]
fn test_descriptor_defaults_implementation_to_id() {
    let descriptor = ServiceDescriptor::new("app/services/mailer");
    assert_eq!(descriptor.implementation, "app/services/mailer");
    assert!(descriptor.arguments.is_empty());
    assert!(descriptor.alias.is_empty());
}

#[test]
fn test_descriptor_from_entry_with_class() {
    let entry = json!({
        "class": "app/services/smtp-mailer",
        "arguments": ["%mailer.host%", 25],
        "alias": ["mailer"]
    });
    let descriptor = ServiceDescriptor::from_entry("mailer.smtp", &entry).unwrap();

    assert_eq!(descriptor.id, "mailer.smtp");
    assert_eq!(descriptor.implementation, "app/services/smtp-mailer");
    assert_eq!(descriptor.arguments, vec![json!("%mailer.host%"), json!(25)]);
    assert_eq!(descriptor.alias, vec!["mailer".to_string()]);
}

#[test]
fn test_descriptor_from_null_entry() {
    let descriptor = ServiceDescriptor::from_entry("svc/a", &json!(null)).unwrap();
    assert_eq!(descriptor, ServiceDescriptor::new("svc/a"));
}

#[test]
fn test_descriptor_rejects_non_list_arguments() {
    let result = ServiceDescriptor::from_entry("svc/a", &json!({"arguments": "@b"}));
    match result {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("svc/a")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_container_configuration_keeps_service_order() {
    let document = json!({
        "parameters": {"db": {"host": "localhost"}},
        "services": {
            "svc/z": {},
            "svc/a": {"arguments": ["@svc/z"]},
            "svc/m": {"alias": ["group"]}
        }
    });
    let configuration = ContainerConfiguration::from_value(&document).unwrap();

    let ids: Vec<&str> = configuration.services.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["svc/z", "svc/a", "svc/m"]);
    assert_eq!(configuration.parameters.get("db"), Some(&json!({"host": "localhost"})));
}

#[test]
fn test_container_configuration_empty_document() {
    let configuration = ContainerConfiguration::from_value(&json!({})).unwrap();
    assert!(configuration.is_empty());
}

#[test]
fn test_container_configuration_rejects_non_object() {
    assert!(ContainerConfiguration::from_value(&json!([1])).is_err());
    assert!(ContainerConfiguration::from_value(&json!({"services": []})).is_err());
    assert!(ContainerConfiguration::from_value(&json!({"parameters": 3})).is_err());
}
