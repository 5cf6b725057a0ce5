//! Validation for the endpoint manifest (manifest/endpoints.toml).
//!
//! These tests keep the manifest syntactically valid and consistent with
//! the crate's layout: every endpoint has the required fields, belongs to a
//! known resource family and uses the path conventions of the API.

use std::collections::HashSet;

use serde::Deserialize;

/// Top-level manifest structure matching the TOML schema.
#[derive(Debug, Deserialize)]
struct Manifest {
    meta: Meta,
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Meta {
    schema_version: u32,
    last_validated: String,
}

/// A single endpoint entry in the manifest.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Endpoint {
    family: String,
    name: String,
    method: String,
    path: String,
    request_content_type: String,
    response_status: u16,
    permissions: Vec<String>,
    implemented: bool,
    #[serde(default)]
    notes: String,
}

fn load_manifest() -> Manifest {
    let content = std::fs::read_to_string("manifest/endpoints.toml")
        .expect("manifest/endpoints.toml should exist and be readable");
    toml::from_str(&content).expect("manifest/endpoints.toml should be valid TOML")
}

#[test]
fn manifest_endpoints_toml_is_valid() {
    let manifest = load_manifest();

    assert!(
        manifest.meta.schema_version >= 1,
        "schema_version must be at least 1"
    );
    assert!(
        !manifest.endpoints.is_empty(),
        "manifest should contain at least one endpoint"
    );

    for ep in &manifest.endpoints {
        assert!(!ep.family.is_empty(), "endpoint family must not be empty");
        assert!(!ep.name.is_empty(), "endpoint name must not be empty");
        assert!(!ep.method.is_empty(), "endpoint method must not be empty");
        assert!(!ep.path.is_empty(), "endpoint path must not be empty");
    }
}

#[test]
fn manifest_endpoint_names_are_unique() {
    let manifest = load_manifest();
    let mut seen = HashSet::new();
    for ep in &manifest.endpoints {
        assert!(seen.insert(ep.name.as_str()), "duplicate endpoint '{}'", ep.name);
    }
}

#[test]
fn manifest_families_match_crate_modules() {
    let manifest = load_manifest();
    let known = [
        "auth",
        "organizations",
        "devices",
        "locations",
        "alerts",
        "activities",
        "ticketing",
        "users",
        "documents",
        "queries",
    ];
    for ep in &manifest.endpoints {
        assert!(
            known.contains(&ep.family.as_str()),
            "endpoint '{}' has unknown family '{}'",
            ep.name,
            ep.family
        );
    }
}

#[test]
fn manifest_has_implemented_core_endpoints() {
    let manifest = load_manifest();
    let implemented: Vec<&str> = manifest
        .endpoints
        .iter()
        .filter(|ep| ep.implemented)
        .map(|ep| ep.name.as_str())
        .collect();

    for expected in [
        "login",
        "list_organizations",
        "get_device",
        "list_devices",
        "set_device_custom_fields",
        "list_alerts",
        "get_activity_log",
        "create_ticket",
        "list_users",
        "query_software",
    ] {
        assert!(
            implemented.contains(&expected),
            "endpoint '{expected}' should be marked as implemented"
        );
    }
}

#[test]
fn resource_paths_live_under_v2() {
    let manifest = load_manifest();
    for ep in manifest.endpoints.iter().filter(|ep| ep.family != "auth") {
        assert!(
            ep.path.starts_with("/v2/"),
            "endpoint '{}' path '{}' should start with /v2/",
            ep.name,
            ep.path
        );
    }
}

#[test]
fn bodies_are_declared_only_for_write_methods() {
    let manifest = load_manifest();
    for ep in &manifest.endpoints {
        if ep.method == "GET" {
            assert!(
                ep.request_content_type.is_empty(),
                "GET endpoint '{}' should not declare a request body",
                ep.name
            );
        } else {
            assert!(
                !ep.request_content_type.is_empty(),
                "{} endpoint '{}' should declare its request content type",
                ep.method,
                ep.name
            );
        }
    }
}

#[test]
fn manifest_endpoint_methods_are_valid_http_verbs() {
    let manifest = load_manifest();
    let valid_methods = ["GET", "POST", "PUT", "PATCH", "DELETE"];
    for ep in &manifest.endpoints {
        assert!(
            valid_methods.contains(&ep.method.as_str()),
            "endpoint '{}' has invalid method '{}', expected one of {:?}",
            ep.name,
            ep.method,
            valid_methods
        );
    }
}
