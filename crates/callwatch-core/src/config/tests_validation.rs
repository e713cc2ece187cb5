//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use std::{path::PathBuf, time::Duration};

    use crate::config::{Config, DEFAULT_TOPIC_PREFIX};
    use crate::{Error, Result};

    fn complete() -> Config {
        let mut config = Config::default();
        config.broker.host = Some("broker.local".to_string());
        config.broker.client_id = Some("callwatch".to_string());
        config.broker.username = Some("user".to_string());
        config.broker.password = Some("secret".to_string());
        config.watch.log_file = Some(PathBuf::from("/tmp/logs.txt"));
        config
    }

    #[test]
    fn test_complete_config_resolves() -> Result<()> {
        let settings = complete().resolve()?;
        assert_eq!(settings.topic_prefix, DEFAULT_TOPIC_PREFIX);
        assert_eq!(settings.poll_interval, Duration::from_millis(1000));
        assert_eq!(settings.debounce_window, Duration::from_millis(1000));
        assert_eq!(settings.broker.endpoint.port, 1883);
        assert_eq!(settings.broker.keep_alive, Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn test_each_broker_value_is_required() {
        let cases: [(fn(&mut Config), &str); 4] = [
            (|c| c.broker.host = None, "MQTT_BROKER"),
            (|c| c.broker.client_id = None, "MQTT_CLIENT_ID"),
            (|c| c.broker.username = None, "MQTT_USERNAME"),
            (|c| c.broker.password = None, "MQTT_PASSWORD"),
        ];
        for (clear, name) in cases {
            let mut config = complete();
            clear(&mut config);
            match config.validate() {
                Err(Error::MissingConfig(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut config = complete();
        config.broker.password = Some(String::new());
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfig("MQTT_PASSWORD"))
        ));
    }

    #[test]
    fn test_interval_bounds() {
        let mut config = complete();
        config.watch.debounce_ms = 5;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = complete();
        config.watch.poll_ms = 60_001;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = complete();
        config.watch.poll_ms = 10;
        config.watch.debounce_ms = 60_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefix_rules() {
        for prefix in ["", "  ", "home/#", "a/+/b", "/leading", "trailing/"] {
            let mut config = complete();
            config.topics.prefix = prefix.to_string();
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "prefix {prefix:?} should be rejected"
            );
        }

        let mut config = complete();
        config.topics.prefix = "home/office/teams".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_endpoint_is_invalid() {
        let mut config = complete();
        config.broker.host = Some("broker:99999".to_string());
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_log_location() {
        let mut config = complete();
        config.watch.log_file = None;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_password_is_redacted_in_debug() -> Result<()> {
        let settings = complete().resolve()?;
        let debug = format!("{:?}", settings.broker);
        assert!(!debug.contains("secret"));
        assert!(format!("{:?}", complete().broker).contains("<redacted>"));
        Ok(())
    }
}
