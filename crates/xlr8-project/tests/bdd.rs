//! BDD-style scenarios for project configuration.
//!
//! Each test follows Given/When/Then structure to document behaviour
//! in a human-readable way.

use std::collections::HashMap;

use xlr8_project::{
    BASE_VERSION_ENV, COMMIT_COUNT_ENV, Environment, PROJECT_FILE, ProjectConfig, ProjectError,
    VersionOverrides, read_requirements,
};
use xlr8_version::Version;

#[test]
fn scenario_lambda_project_then_names_are_derived() {
    // Given a project root with a project.json
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(PROJECT_FILE),
        r#"{
            "description": "Exports",
            "projectName": "acme.sheets",
            "packageName": "acme.sheets.core",
            "deploymentTypes": ["lambda"]
        }"#,
    )
    .unwrap();

    // When the configuration is loaded
    let config = ProjectConfig::load_from_dir(dir.path()).unwrap();

    // Then deployment names and paths come from the dotted names
    assert_eq!(config.lambda_function_name().unwrap(), "acme_sheets");
    assert_eq!(config.lambda_layer_name().unwrap(), "acme-sheets");
    assert_eq!(config.package_path().unwrap(), "acme/sheets/core");
    assert!(config.is_a("lambda").unwrap());
    assert!(!config.is_a("container").unwrap());
}

#[test]
fn scenario_missing_property_then_error_names_it() {
    // Given a configuration without a package name
    let config = ProjectConfig::from_json(r#"{"projectName": "acme"}"#).unwrap();

    // When the package path is requested
    let err = config.package_path().unwrap_err();

    // Then the error points at the camelCase key
    assert!(matches!(err, ProjectError::MissingProperty("packageName")));
    assert_eq!(err.to_string(), "`packageName` must be defined");
}

#[test]
fn scenario_packaged_source_then_overrides_freeze_version() {
    // Given an environment captured when the archive was built
    let vars: HashMap<&str, &str> = [(BASE_VERSION_ENV, "2.1.0"), (COMMIT_COUNT_ENV, "14")]
        .into_iter()
        .collect();

    // When overrides are resolved
    let overrides =
        VersionOverrides::from_lookup(|name: &str| vars.get(name).map(|v| v.to_string()))
            .unwrap();

    // Then both git inputs are replaced
    assert_eq!(overrides.base_version, Some(Version::new(2, 1, 0)));
    assert_eq!(overrides.commit_count, Some(14));
}

#[test]
fn scenario_deploy_target_alias_then_canonical_environment() {
    // Given the long spelling of a deployment target
    let raw = "production";

    // When it is parsed
    let env: Environment = raw.parse().unwrap();

    // Then the canonical short name is used
    assert_eq!(env.to_string(), "prod");
    assert!("qa".parse::<Environment>().is_err());
}

#[test]
fn scenario_requirements_file_then_entries_are_split() {
    // Given a requirements file with blank lines
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requirements.txt");
    std::fs::write(&path, "openpyxl==3.1.2\n\nboto3\n").unwrap();

    // When it is read
    let reqs = read_requirements(&path).unwrap();

    // Then each entry stands alone
    assert_eq!(reqs, ["openpyxl==3.1.2", "boto3"]);
}
