use super::{ConfigError, ShimConfig};
use crate::constants::CONSTANT_NAMES;
use crate::platform::resolve::{self, ENV_PREFIX};

const WINDOWS_KEY: &str = "WINDOWS";
const CONFIGURED_KEY: &str = "CONFIGURED";

/// Reads overrides from `PLATFORM_SHIM_*` key/value pairs.
///
/// Keys without the prefix are skipped; unknown prefixed keys are logged and
/// ignored. A malformed value is an error rather than a silent default.
pub fn from_env_pairs<I, K, V>(pairs: I) -> Result<ShimConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = ShimConfig::default();

    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match name {
            WINDOWS_KEY => config.windows = parse_flag(key, value)?,
            CONFIGURED_KEY => config.configured = parse_flag(key, value)?,
            constant if CONSTANT_NAMES.contains(&constant) => {
                let parsed =
                    super::parse_i32(value).ok_or_else(|| ConfigError::InvalidInteger {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                config.constants.insert(constant.to_string(), parsed);
            }
            _ => tracing::warn!("Ignoring unknown platform override {}", key),
        }
    }

    tracing::debug!(?config, "Read platform overrides");
    Ok(config)
}

/// Reads overrides from the current process environment. Variables that
/// are not valid unicode cannot be overrides and are skipped.
pub fn from_process_env() -> Result<ShimConfig, ConfigError> {
    from_env_pairs(
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    )
}

/// Parses an override document such as
/// `{"configured": true, "constants": {"SEEK_END": 2}}`.
pub fn from_json(content: &str) -> Result<ShimConfig, ConfigError> {
    let config: ShimConfig = serde_json::from_str(content)?;
    for name in config.constants.keys() {
        if !CONSTANT_NAMES.contains(&name.as_str()) {
            tracing::warn!("Ignoring unknown constant {:?} in override document", name);
        }
    }
    Ok(config)
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    resolve::parse_flag(value).ok_or_else(|| ConfigError::InvalidFlag {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing_test::traced_test;

    #[test]
    fn test_reads_flags_and_constants() {
        let config = from_env_pairs([
            ("PATH", "/usr/bin"),
            ("PLATFORM_SHIM_WINDOWS", "1"),
            ("PLATFORM_SHIM_CONFIGURED", "no"),
            ("PLATFORM_SHIM_SEEK_END", " 2 "),
            ("PLATFORM_SHIM_F_WRLCK", "-1"),
        ])
        .unwrap();

        assert!(config.windows);
        assert!(!config.configured);
        assert_eq!(config.constants.get("SEEK_END"), Some(&2));
        assert_eq!(config.constants.get("F_WRLCK"), Some(&-1));
        assert_eq!(config.constants.len(), 2);
    }

    #[test]
    fn test_empty_flag_means_set() {
        let config = from_env_pairs([("PLATFORM_SHIM_CONFIGURED", "")]).unwrap();
        assert!(config.configured);
        assert!(config.external_signals().configured);
    }

    #[test]
    fn test_rejects_malformed_values() {
        let err = from_env_pairs([("PLATFORM_SHIM_WINDOWS", "perhaps")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { ref key, .. } if key == "PLATFORM_SHIM_WINDOWS"));

        let err = from_env_pairs([("PLATFORM_SHIM_SEEK_SET", "zero")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid integer value for PLATFORM_SHIM_SEEK_SET: \"zero\""
        );
    }

    #[test]
    #[traced_test]
    fn test_unknown_key_is_logged() {
        let config = from_env_pairs([("PLATFORM_SHIM_TURBO", "1")]).unwrap();
        assert_eq!(config, ShimConfig::default());
        assert!(logs_contain("Ignoring unknown platform override PLATFORM_SHIM_TURBO"));
    }

    #[test]
    fn test_from_json() {
        let config =
            from_json(r#"{"configured": true, "constants": {"F_RDLCK": 1}}"#).unwrap();
        assert!(config.configured);
        assert!(!config.windows);
        assert_eq!(config.constant("F_RDLCK", 0), 1);

        assert!(matches!(from_json("{not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    #[serial]
    fn test_from_process_env() {
        std::env::set_var("PLATFORM_SHIM_F_UNLCK", "7");
        let config = from_process_env();
        std::env::remove_var("PLATFORM_SHIM_F_UNLCK");

        assert_eq!(config.unwrap().constants.get("F_UNLCK"), Some(&7));
    }
}
