use std::fs;
use std::path::PathBuf;

use modgen::config::{load_host_config, parse_host_config, resolve_module_root, HostConfig};
use modgen::error::Error;
use tempfile::TempDir;

#[test]
fn test_parse_host_config() {
    let content = r#"
; FreePBX developer settings
[main]
# local checkout
repo_directory = "/usr/src/freepbx"
username='dev'
empty =
"#;
    let values = parse_host_config(content).unwrap();

    assert_eq!(values.get("repo_directory").map(String::as_str), Some("/usr/src/freepbx"));
    assert_eq!(values.get("username").map(String::as_str), Some("dev"));
    assert_eq!(values.get("empty").map(String::as_str), Some(""));
    assert_eq!(values.len(), 3);
}

#[test]
fn test_parse_host_config_later_keys_win() {
    let values = parse_host_config("a = 1\na = 2\n").unwrap();
    assert_eq!(values.get("a").map(String::as_str), Some("2"));
}

#[test]
fn test_parse_host_config_rejects_bare_line() {
    let result = parse_host_config("repo_directory = /src\nnonsense\n");
    match result {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("line 2")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_load_missing_host_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_host_config(temp_dir.path().join(".freepbxconfig")).unwrap();
    assert!(config.is_none());
}

#[test]
fn test_load_host_config_enables_devmode() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".freepbxconfig");
    fs::write(&path, "repo_directory = /usr/src/freepbx\n").unwrap();

    let config = load_host_config(&path).unwrap().unwrap();

    assert_eq!(
        config,
        HostConfig { module_directory: Some(PathBuf::from("/usr/src/freepbx")), devmode: true }
    );
}

#[test]
fn test_load_host_config_without_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".freepbxconfig");
    fs::write(&path, "repo_directory =\n").unwrap();

    let config = load_host_config(&path).unwrap().unwrap();

    assert!(config.module_directory.is_none());
    assert!(config.devmode);
}

#[test]
fn test_resolve_module_root_in_configured_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config =
        HostConfig { module_directory: Some(temp_dir.path().to_path_buf()), devmode: false };

    let root = resolve_module_root(&config, "helloworld", &PathBuf::from("/nowhere")).unwrap();

    assert_eq!(root, temp_dir.path().join("helloworld"));
}

#[test]
fn test_resolve_module_root_falls_back_to_cwd() {
    let temp_dir = TempDir::new().unwrap();
    let config = HostConfig { module_directory: None, devmode: false };

    let root = resolve_module_root(&config, "helloworld", temp_dir.path()).unwrap();

    assert_eq!(root, temp_dir.path().join("helloworld"));
}

#[test]
fn test_resolve_module_root_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config = HostConfig {
        module_directory: Some(temp_dir.path().join("does-not-exist")),
        devmode: true,
    };

    let result = resolve_module_root(&config, "helloworld", temp_dir.path());

    match result {
        Err(Error::PreconditionFailed(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("Expected PreconditionFailed, got {other:?}"),
    }
}

#[test]
fn test_resolve_module_root_name_in_use() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("helloworld")).unwrap();
    let config =
        HostConfig { module_directory: Some(temp_dir.path().to_path_buf()), devmode: false };

    let result = resolve_module_root(&config, "helloworld", temp_dir.path());

    match result {
        Err(Error::PreconditionFailed(msg)) => {
            assert!(msg.starts_with("This name (helloworld) is already in use"))
        }
        other => panic!("Expected PreconditionFailed, got {other:?}"),
    }
}
