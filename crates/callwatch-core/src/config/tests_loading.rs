//! Loading-focused tests for configuration
//!
//! Tests for configuration file loading, parsing, and environment overrides.

#[cfg(test)]
mod loading_tests {
    use std::{collections::HashMap, io::Write, path::PathBuf};

    use serial_test::serial;

    use crate::config::{global_config_path, load_config, load_toml_file, Config};
    use crate::{Error, Result};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    // Test 1: Missing keys in the file keep their defaults
    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[topics]\nprefix = \"office/teams\"\n")
            .map_err(|e| Error::io(&path, &e))?;

        let config = load_toml_file(&path)?;
        assert_eq!(config.topics.prefix, "office/teams");
        assert_eq!(config.watch.debounce_ms, 1000);
        assert_eq!(config.watch.poll_ms, 1000);
        assert_eq!(config.broker.host, None);
        Ok(())
    }

    // Test 2: Malformed TOML - clear parse error
    #[test]
    fn test_malformed_toml_returns_parse_error() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("bad_config.toml");
        let mut file = std::fs::File::create(&path).map_err(|e| Error::io(&path, &e))?;
        file.write_all(b"[watch\n debounce_ms = [[[")
            .map_err(|e| Error::io(&path, &e))?;

        let result = load_toml_file(&path);
        assert!(matches!(result, Err(Error::ParseError(_))));
        Ok(())
    }

    // Test 3: Directory instead of file
    #[test]
    fn test_directory_config_path_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let result = load_toml_file(dir.path());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        Ok(())
    }

    // Test 4: Environment overrides the file
    #[test]
    fn test_env_overrides() -> Result<()> {
        let config = Config::default().apply_env(lookup(&[
            ("MQTT_BROKER", "broker.local:1884"),
            ("MQTT_CLIENT_ID", "laptop"),
            ("MQTT_USERNAME", "user"),
            ("MQTT_PASSWORD", "secret"),
            ("CALLWATCH_LOG_FILE", "/tmp/teams/logs.txt"),
            ("CALLWATCH_TOPIC_PREFIX", "desk"),
            ("CALLWATCH_POLL_MS", "250"),
            ("CALLWATCH_DEBOUNCE_MS", "500"),
        ]))?;

        assert_eq!(config.broker.host.as_deref(), Some("broker.local:1884"));
        assert_eq!(config.broker.client_id.as_deref(), Some("laptop"));
        assert_eq!(config.broker.username.as_deref(), Some("user"));
        assert_eq!(config.broker.password.as_deref(), Some("secret"));
        assert_eq!(config.watch.log_file, Some(PathBuf::from("/tmp/teams/logs.txt")));
        assert_eq!(config.topics.prefix, "desk");
        assert_eq!(config.watch.poll_ms, 250);
        assert_eq!(config.watch.debounce_ms, 500);
        Ok(())
    }

    // Test 5: Non-numeric interval is rejected
    #[test]
    fn test_invalid_numeric_env() {
        let result = Config::default().apply_env(lookup(&[("CALLWATCH_DEBOUNCE_MS", "soon")]));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    // Test 6: Empty CALLWATCH_LOG_FILE keeps the platform default
    #[test]
    fn test_empty_log_file_env_is_ignored() -> Result<()> {
        let before = Config::default();
        let after = before.clone().apply_env(lookup(&[("CALLWATCH_LOG_FILE", "")]))?;
        assert_eq!(after.watch.log_file, before.watch.log_file);
        Ok(())
    }

    // Test 7: Full load from process environment
    #[test]
    #[serial]
    fn test_load_config_from_process_env() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[broker]\nclient_id = \"from-file\"\n")
            .map_err(|e| Error::io(&config_path, &e))?;

        let vars = [
            ("CALLWATCH_CONFIG", config_path.display().to_string()),
            ("MQTT_BROKER", "localhost".to_string()),
            ("MQTT_USERNAME", "user".to_string()),
            ("MQTT_PASSWORD", "secret".to_string()),
            ("CALLWATCH_LOG_FILE", "/tmp/logs.txt".to_string()),
        ];
        for (name, value) in &vars {
            std::env::set_var(name, value);
        }
        std::env::remove_var("MQTT_CLIENT_ID");

        let result = load_config();

        for (name, _) in &vars {
            std::env::remove_var(name);
        }

        let settings = result?;
        assert_eq!(settings.broker.client_id, "from-file");
        assert_eq!(settings.broker.endpoint.host, "localhost");
        assert_eq!(settings.broker.endpoint.port, 1883);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/logs.txt"));
        Ok(())
    }

    // Test 8: Missing broker variable names the variable
    #[test]
    #[serial]
    fn test_load_config_missing_broker() {
        for name in ["MQTT_BROKER", "MQTT_CLIENT_ID", "MQTT_USERNAME", "MQTT_PASSWORD"] {
            std::env::remove_var(name);
        }
        std::env::set_var("CALLWATCH_CONFIG", "/nonexistent/callwatch/config.toml");

        let result = load_config();
        std::env::remove_var("CALLWATCH_CONFIG");

        assert!(matches!(result, Err(Error::MissingConfig("MQTT_BROKER"))));
    }

    #[test]
    fn test_global_config_path_is_toml() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
