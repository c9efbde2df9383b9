use authdns_domain::{CliOverrides, Config};

/// Environment variable consulted for the log level when `--log-level` is
/// not given.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub fn load_config(path: Option<&str>, mut overrides: CliOverrides) -> anyhow::Result<Config> {
    if overrides.log_level.is_none() {
        overrides.log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty());
    }

    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_precedence() {
        std::env::set_var(LOG_LEVEL_ENV, "warn");

        let from_env = load_config(None, CliOverrides::default()).unwrap();
        let from_flag = load_config(
            None,
            CliOverrides {
                log_level: Some("trace".to_string()),
                ..CliOverrides::default()
            },
        )
        .unwrap();

        std::env::remove_var(LOG_LEVEL_ENV);

        assert_eq!(from_env.logging.level, "warn");
        assert_eq!(from_flag.logging.level, "trace");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let overrides = CliOverrides {
            dns_port: Some(0),
            ..CliOverrides::default()
        };

        assert!(load_config(None, overrides).is_err());
    }
}
