//! Unit tests for the HTTP kernel

use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wirekit_application::HttpKernel;
use wirekit_domain::error::Error;
use wirekit_domain::ports::ServiceContainer;
use wirekit_domain::value_objects::{HttpMethod, Instance, RouteDefinition};

use crate::test_utils::{
    MapContainer, RecordingRouter, RecordingServer, router_instance, server_instance,
};

fn write_routes(dir: &Path, routes: &serde_json::Value) {
    let config_dir = dir.join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("router.json"), routes.to_string()).unwrap();
}

fn kernel(container: MapContainer, dir: &Path) -> HttpKernel {
    let container: Arc<dyn ServiceContainer> = Arc::new(container);
    HttpKernel::new(container, "express", "local", dir)
}

fn route(path: &str, controller: Option<&str>) -> RouteDefinition {
    RouteDefinition {
        path: path.to_owned(),
        controller: controller.map(str::to_owned),
        ..RouteDefinition::default()
    }
}

#[test]
fn test_route_defaults_to_get_action() {
    let dir = TempDir::new().unwrap();
    let kernel = kernel(MapContainer::default(), dir.path());

    let resolved = kernel.resolve_route(&route("/", Some("app/home"))).unwrap();
    assert_eq!(resolved.method, HttpMethod::Get);
    assert_eq!(resolved.action, "get_action");
}

#[test]
fn test_explicit_action_gets_suffix() {
    let dir = TempDir::new().unwrap();
    let kernel = kernel(MapContainer::default(), dir.path());

    let definition = RouteDefinition {
        method: Some("POST".to_owned()),
        action: Some("create".to_owned()),
        ..route("/users", Some("app/users"))
    };
    let resolved = kernel.resolve_route(&definition).unwrap();
    assert_eq!(resolved.method, HttpMethod::Post);
    assert_eq!(resolved.action, "create_action");
}

#[test]
fn test_unsupported_method_is_rejected() {
    let dir = TempDir::new().unwrap();
    let kernel = kernel(MapContainer::default(), dir.path());

    let definition = RouteDefinition {
        method: Some("patch".to_owned()),
        ..route("/users", Some("app/users"))
    };
    match kernel.resolve_route(&definition) {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("patch")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_route_without_controller_fails() {
    let dir = TempDir::new().unwrap();
    let kernel = kernel(MapContainer::default(), dir.path());

    match kernel.resolve_route(&route("/", None)) {
        Err(Error::MissingController { .. }) => {}
        other => panic!("Expected MissingController error, got {other:?}"),
    }
}

#[test]
fn test_missing_router_file_fails() {
    let dir = TempDir::new().unwrap();
    let kernel = kernel(MapContainer::default(), dir.path());

    assert!(kernel.route_config_path().ends_with("config/router.json"));
    match kernel.load_route_config() {
        Err(Error::MissingRouteConfig { .. }) => {}
        other => panic!("Expected MissingRouteConfig error, got {other:?}"),
    }
}

#[test]
fn test_router_file_without_routes_fails() {
    let dir = TempDir::new().unwrap();
    write_routes(dir.path(), &json!({"routes": []}));
    let kernel = kernel(MapContainer::default(), dir.path());

    match kernel.load_route_config() {
        Err(Error::MissingRouteConfig { message, .. }) => assert!(message.contains("routes")),
        other => panic!("Expected MissingRouteConfig error, got {other:?}"),
    }
}

#[test]
fn test_no_matching_router_fails() {
    let dir = TempDir::new().unwrap();
    let router = RecordingRouter::new("aws-express");
    let container = MapContainer::default().tag("router", router_instance(&router));

    match kernel(container, dir.path()).matched_router() {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("express")),
        other => panic!("Expected Configuration error, got {:?}", other.map(|r| r.name().to_owned())),
    }
}

#[test]
fn test_first_matching_adapter_wins() {
    let dir = TempDir::new().unwrap();
    let aws = RecordingRouter::new("aws-express");
    let express = RecordingRouter::new("express");
    let container = MapContainer::default()
        .tag("router", router_instance(&aws))
        .tag("router", router_instance(&express));

    let matched = kernel(container, dir.path()).matched_router().unwrap();
    assert_eq!(matched.name(), "express");
}

#[test]
fn test_run_registers_routes_and_boots_server() {
    let dir = TempDir::new().unwrap();
    write_routes(
        dir.path(),
        &json!({"routes": [
            {"path": "/", "controller": "app/home"},
            {"path": "/users", "controller": "app/users", "method": "post", "action": "create"}
        ]}),
    );

    let router = RecordingRouter::new("express");
    let server = RecordingServer::new("local");
    let container = MapContainer::default()
        .bind("app/home", Instance::new("home"))
        .bind("app/users", Instance::new("users"))
        .tag("router", router_instance(&router))
        .tag("server", server_instance(&server));

    kernel(container, dir.path()).run(&json!({})).unwrap();

    let routes = router.routes.lock().unwrap();
    let actions: Vec<&str> = routes.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, vec!["get_action", "create_action"]);
    assert_eq!(server.booted_with.lock().unwrap().as_deref(), Some("express"));
}

#[test]
fn test_unbound_controller_fails_initialization() {
    let dir = TempDir::new().unwrap();
    write_routes(
        dir.path(),
        &json!({"routes": [{"path": "/", "controller": "app/missing"}]}),
    );
    let router = RecordingRouter::new("express");
    let container = MapContainer::default().tag("router", router_instance(&router));

    match kernel(container, dir.path()).initialize() {
        Err(Error::MissingController { message }) => assert!(message.contains("app/missing")),
        Err(other) => panic!("Expected MissingController error, got {other:?}"),
        Ok(_) => panic!("Expected MissingController error"),
    }
}
