//! YAML configuration loading.

use std::io::Write;

use marga::{ConfigLoadError, FollowerConfig, FollowerError};
use tempfile::NamedTempFile;

fn write_yaml(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_yaml(
        r#"
goal_radius: 0.3
forward_amount: 0.5
turn_amount: 0.2617994
thrashing_threshold: 8
reward:
  obstacle_penalty: 0.5
"#,
    );

    let config = FollowerConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.goal_radius, 0.3);
    assert_eq!(config.forward_amount, 0.5);
    assert_eq!(config.thrashing_threshold, 8);
    assert_eq!(config.reward.obstacle_penalty, 0.5);

    // Omitted keys keep their defaults
    let defaults = FollowerConfig::default();
    assert!(config.fix_thrashing);
    assert_eq!(
        config.close_to_obstacle_threshold,
        defaults.close_to_obstacle_threshold
    );
    assert_eq!(
        config.reward.primitive_length_penalty,
        defaults.reward.primitive_length_penalty
    );
}

#[test]
fn test_empty_document_is_default() {
    let file = write_yaml("{}\n");
    let config = FollowerConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, FollowerConfig::default());
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_yaml("thrashing_threshold: 0\n");
    let err = FollowerConfig::from_yaml_file(file.path()).unwrap_err();
    match err {
        ConfigLoadError::Invalid(FollowerError::MisconfiguredParameters { name, .. }) => {
            assert_eq!(name, "thrashing_threshold")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FollowerConfig::from_yaml_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigLoadError::Io(_))));
}

#[test]
fn test_roundtrip_through_file() {
    let config = FollowerConfig::new()
        .with_goal_radius(0.4)
        .with_turn_lookahead(false);
    let file = write_yaml(&config.to_yaml_string().unwrap());
    assert_eq!(FollowerConfig::from_yaml_file(file.path()).unwrap(), config);
}
