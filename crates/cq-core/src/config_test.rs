use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
keyspace: orders
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.keyspace, "orders");
    assert_eq!(config.contact_points, vec!["127.0.0.1"]);
    assert_eq!(config.port, 9042);
    assert_eq!(config.script_path, "migrations/scripts");
    assert_eq!(config.data_path, "migrations/data");
    assert_eq!(config.profile, Profile::Direct);
    assert!(config.loader_command.is_none());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
keyspace: orders
contact_points:
  - cass-1.internal
  - cass-2.internal
port: 9043
script_path: cql/scripts
data_path: cql/data
profile: container
container: casscon
loader_command: ["kubectl", "exec", "cass-0", "--", "cqlsh", "-f"]
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        config.contact_points,
        vec!["cass-1.internal", "cass-2.internal"]
    );
    assert_eq!(config.port, 9043);
    assert_eq!(config.profile, Profile::Container);
    assert_eq!(config.container, "casscon");
    assert_eq!(
        config.loader_command(),
        vec!["kubectl", "exec", "cass-0", "--", "cqlsh", "-f"]
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let yaml = r#"
keyspace: orders
keyspace_name: typo
"#;
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn test_loader_command_profile_defaults() {
    let direct: Config = serde_yaml::from_str("keyspace: k").unwrap();
    assert_eq!(direct.loader_command(), vec!["cqlsh", "-f"]);

    let container: Config =
        serde_yaml::from_str("keyspace: k\nprofile: container\ncontainer: casscon").unwrap();
    assert_eq!(
        container.loader_command(),
        vec!["docker", "exec", "casscon", "cqlsh", "-f"]
    );
}

#[test]
fn test_path_helpers_resolve_against_root() {
    let config: Config = serde_yaml::from_str("keyspace: k").unwrap();
    let root = std::path::PathBuf::from("/srv/project");
    assert_eq!(
        config.script_path_absolute(&root),
        root.join("migrations/scripts")
    );
    assert_eq!(
        config.data_path_absolute(&root),
        root.join("migrations/data")
    );

    let absolute: Config =
        serde_yaml::from_str("keyspace: k\nscript_path: /etc/cql/scripts").unwrap();
    assert_eq!(
        absolute.script_path_absolute(&root),
        std::path::PathBuf::from("/etc/cql/scripts")
    );
}

#[test]
fn test_load_from_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cqlflow.yml"), "keyspace: orders\n").unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.keyspace, "orders");
}

#[test]
fn test_load_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Config::load(dir.path()),
        Err(CoreError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_load_yaml_extension_fallback() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cqlflow.yaml"), "keyspace: orders\n").unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.keyspace, "orders");
}
