//! Service Registration Tests

use serde_json::{Value, json};
use std::error::Error as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wirekit_application::{ExternalModuleRegistry, ImplementationRegistry};
use wirekit_domain::error::Error;
use wirekit_domain::ports::{ServiceContainer, ServiceContainerExt};
use wirekit_domain::value_objects::{Instance, ServiceDescriptor};
use wirekit_infrastructure::di::{ContainerBuilder, ReferenceResolver, ServiceRegistrar};

use crate::test_utils::{GREETER_PATH, Greeter, echo_registry};

fn register(
    builder: &mut ContainerBuilder,
    implementations: &ImplementationRegistry,
    externals: &ExternalModuleRegistry,
    descriptors: &[ServiceDescriptor],
) -> wirekit_domain::error::Result<()> {
    ServiceRegistrar::new(implementations, ReferenceResolver::new(externals))
        .register_all(builder, descriptors)
}

fn echoed(value: &Instance) -> Vec<Value> {
    value
        .downcast_ref::<Vec<Instance>>()
        .unwrap()
        .iter()
        .map(|i| i.as_value().cloned().unwrap_or(Value::Null))
        .collect()
}

#[test]
fn test_missing_parameter_names_parameter_and_service() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!("%missing.key%"));

    match register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]) {
        Err(Error::UnresolvedParameter { name, service }) => {
            assert_eq!(name, "missing.key");
            assert_eq!(service, "svc/a");
        }
        other => panic!("Expected UnresolvedParameter error, got {other:?}"),
    }
}

#[test]
fn test_null_parameter_counts_as_declared() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let mut parameters = serde_json::Map::new();
    parameters.insert("optional".to_owned(), Value::Null);
    builder.merge_parameters(parameters);

    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!("%optional%"));
    register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]).unwrap();

    let container = builder.build().unwrap();
    assert_eq!(echoed(&container.get("svc/a").unwrap()), vec![Value::Null]);
}

#[test]
fn test_unknown_implementation_fails() {
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("svc/unknown");

    match register(
        &mut builder,
        &ImplementationRegistry::new(),
        &ExternalModuleRegistry::new(),
        &[descriptor],
    ) {
        Err(Error::ImplementationNotFound { path }) => assert_eq!(path, "svc/unknown"),
        other => panic!("Expected ImplementationNotFound error, got {other:?}"),
    }
}

#[test]
fn test_more_arguments_than_parameters_fails() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("svc/a")
        .with_argument(json!("one"))
        .with_argument(json!("two"));

    match register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]) {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("svc/a")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_class_path_is_normalized_against_project_dir() {
    let implementations = echo_registry(&["app/services/mailer"], 0);
    let mut builder = ContainerBuilder::new();
    let descriptor =
        ServiceDescriptor::new("mailer").with_implementation("/srv/project/app/services/mailer");

    ServiceRegistrar::new(&implementations, ReferenceResolver::new(&ExternalModuleRegistry::new()))
        .with_project_dir("/srv/project/")
        .register_all(&mut builder, &[descriptor])
        .unwrap();
    assert!(builder.contains("mailer"));
}

#[test]
fn test_reregistration_overwrites_previous_service() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let first = ServiceDescriptor::new("svc/a").with_argument(json!("first"));
    let second = ServiceDescriptor::new("svc/a").with_argument(json!("second"));

    register(
        &mut builder,
        &implementations,
        &ExternalModuleRegistry::new(),
        &[first, second],
    )
    .unwrap();

    let container = builder.build().unwrap();
    assert_eq!(echoed(&container.get("svc/a").unwrap()), vec![json!("second")]);
}

#[test]
fn test_aliases_accumulate_in_registration_order() {
    let implementations = echo_registry(&["svc/aws", "svc/express"], 0);
    let mut builder = ContainerBuilder::new();
    let descriptors = [
        ServiceDescriptor::new("svc/aws").with_alias("router"),
        ServiceDescriptor::new("svc/express")
            .with_alias("router")
            .with_alias("express"),
    ];

    register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &descriptors).unwrap();
    let container = builder.build().unwrap();

    assert_eq!(container.tagged_ids("router"), vec!["svc/aws", "svc/express"]);
    assert!(
        container
            .get("express")
            .unwrap()
            .ptr_eq(&container.get("svc/express").unwrap())
    );
}

#[test]
fn test_external_module_is_loaded_once_and_bound() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let externals = ExternalModuleRegistry::new().with("fs", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Instance::constant(json!("fs-module")))
    });
    let implementations = echo_registry(&["svc/a", "svc/b"], 1);
    let mut builder = ContainerBuilder::new();
    let descriptors = [
        ServiceDescriptor::new("svc/a").with_argument(json!("!fs")),
        ServiceDescriptor::new("svc/b").with_argument(json!("!fs")),
    ];

    register(&mut builder, &implementations, &externals, &descriptors).unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    let container = builder.build().unwrap();
    assert_eq!(container.get_value("fs").unwrap(), json!("fs-module"));
    assert_eq!(echoed(&container.get("svc/b").unwrap()), vec![json!("fs-module")]);
}

#[test]
fn test_unknown_external_module_fails_with_source() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!("!left-pad"));

    match register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]) {
        Err(err @ Error::UnresolvedExternalModule { .. }) => {
            let source = err.source().expect("load error attached");
            assert!(source.to_string().contains("left-pad"));
        }
        other => panic!("Expected UnresolvedExternalModule error, got {other:?}"),
    }
}

#[test]
fn test_external_reference_fails_when_name_is_only_a_parameter() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let mut parameters = serde_json::Map::new();
    parameters.insert("lodash".to_owned(), json!("just a parameter"));
    builder.merge_parameters(parameters);

    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!("!lodash"));

    match register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]) {
        Err(Error::UnresolvedExternalModule { name, .. }) => assert_eq!(name, "lodash"),
        other => panic!("Expected UnresolvedExternalModule error, got {other:?}"),
    }
}

#[test]
fn test_external_module_keeps_existing_binding_of_its_name() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let externals = ExternalModuleRegistry::new().with("lodash", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Instance::constant(json!("lodash-module")))
    });
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    builder.bind_constant("lodash", json!("bound first"));

    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!("!lodash"));
    register(&mut builder, &implementations, &externals, &[descriptor]).unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    let container = builder.build().unwrap();
    assert_eq!(echoed(&container.get("svc/a").unwrap()), vec![json!("bound first")]);
}

#[test]
fn test_json_object_literal_is_bound_under_its_text() {
    let implementations = echo_registry(&["svc/a"], 1);
    let mut builder = ContainerBuilder::new();
    let literal = r#"{"retries": 3}"#;
    let descriptor = ServiceDescriptor::new("svc/a").with_argument(json!(literal));

    register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]).unwrap();
    let container = builder.build().unwrap();

    assert_eq!(container.get_value(literal).unwrap(), json!({"retries": 3}));
    assert_eq!(echoed(&container.get("svc/a").unwrap()), vec![json!({"retries": 3})]);
}

#[test]
fn test_plain_literals_are_injected_as_values() {
    let implementations = echo_registry(&["svc/a"], 3);
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("svc/a").with_arguments(vec![
        json!(42),
        json!("%incomplete"),
        json!([1, 2]),
    ]);

    register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]).unwrap();
    let container = builder.build().unwrap();

    assert_eq!(
        echoed(&container.get("svc/a").unwrap()),
        vec![json!(42), json!("%incomplete"), json!([1, 2])]
    );
}

#[test]
fn test_linked_implementation_is_constructed() {
    let implementations = ImplementationRegistry::from_linked();
    let mut builder = ContainerBuilder::new();
    let descriptor = ServiceDescriptor::new("greeter")
        .with_implementation(GREETER_PATH)
        .with_argument(json!("Hello"));

    register(&mut builder, &implementations, &ExternalModuleRegistry::new(), &[descriptor]).unwrap();
    let container = builder.build().unwrap();

    let greeter = container.get_as::<Arc<dyn Greeter>>("greeter").unwrap();
    assert_eq!(greeter.greet("Ada"), "Hello Ada");
}
