use std::env;
use std::io::ErrorKind;

use url::Url;

use super::settings::ProbeSettings;
use crate::error::{ProbeError, Result};

/// Config file looked up in the working directory when neither `--config`
/// nor `CONFIG_FILE` names one. Its absence is not an error.
const DEFAULT_CONFIG_FILE: &str = "tokenprobe.yml";

/// Load the probe settings.
/// Layers, lowest precedence first: built-in defaults, the YAML config file,
/// the `API_BASE_URL` / `HEALTH_TIMEOUT_SECONDS` / `AUTH_TIMEOUT_SECONDS`
/// environment variables, and finally the `--base-url` flag.
/// # Arguments
///     * `config_path` - Path given with `--config`, if any.
///     * `base_url_override` - Base URL given with `--base-url`, if any.
pub fn load_config(config_path: Option<&str>, base_url_override: Option<&str>) -> Result<ProbeSettings> {
    let settings = match config_path
        .map(str::to_string)
        .or_else(|| env::var("CONFIG_FILE").ok())
    {
        Some(path) => read_settings_file(&path)?,
        None => match read_settings_file(DEFAULT_CONFIG_FILE) {
            Err(ProbeError::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
                ProbeSettings::default()
            }
            other => other?,
        },
    };

    let settings = apply_env_overrides(settings, |key| env::var(key).ok());
    finalize(settings, base_url_override)
}

fn read_settings_file(path: &str) -> Result<ProbeSettings> {
    let config_str = std::fs::read_to_string(path).map_err(|source| ProbeError::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    log::info!("Using config file: {path}");

    serde_yaml::from_str(&config_str).map_err(|source| ProbeError::ConfigParse {
        path: path.to_string(),
        source,
    })
}

/// Apply environment overrides read through `lookup`.
/// Unparseable timeouts are logged and ignored.
pub fn apply_env_overrides<F>(mut settings: ProbeSettings, lookup: F) -> ProbeSettings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup("API_BASE_URL") {
        settings.base_url = base_url;
    }

    for (key, slot) in [
        ("HEALTH_TIMEOUT_SECONDS", &mut settings.health_timeout_seconds),
        ("AUTH_TIMEOUT_SECONDS", &mut settings.auth_timeout_seconds),
    ] {
        if let Some(raw) = lookup(key) {
            match raw.trim().parse::<u64>() {
                Ok(seconds) => *slot = seconds,
                Err(e) => log::warn!("Ignoring {key}={raw:?}: {e}"),
            }
        }
    }

    settings
}

/// Apply the CLI base URL, strip trailing slashes and make sure the result parses.
pub fn finalize(mut settings: ProbeSettings, base_url_override: Option<&str>) -> Result<ProbeSettings> {
    if let Some(base_url) = base_url_override {
        settings.base_url = base_url.to_string();
    }
    settings.base_url = settings.base_url.trim_end_matches('/').to_string();
    Url::parse(&settings.base_url)?;

    log::debug!("Using base url: {}", settings.base_url);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let settings = apply_env_overrides(
            ProbeSettings::default(),
            lookup_from(&[
                ("API_BASE_URL", "http://127.0.0.1:9000"),
                ("AUTH_TIMEOUT_SECONDS", "3"),
            ]),
        );
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.auth_timeout_seconds, 3);
        assert_eq!(settings.health_timeout_seconds, 10);
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let settings = apply_env_overrides(
            ProbeSettings::default(),
            lookup_from(&[("HEALTH_TIMEOUT_SECONDS", "soon")]),
        );
        assert_eq!(settings.health_timeout_seconds, 10);
    }

    #[test]
    fn cli_base_url_wins_and_trailing_slash_is_stripped() {
        let settings = finalize(ProbeSettings::default(), Some("http://localhost:8080///"))
            .expect("valid url");
        assert_eq!(settings.base_url, "http://localhost:8080");
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let result = finalize(ProbeSettings::default(), Some("not a url"));
        assert!(matches!(result, Err(ProbeError::Url(_))));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let path = std::env::temp_dir().join(format!("tokenprobe-test-{}.yml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create temp config");
        writeln!(file, "base_url: http://localhost:7000/\nhealth_timeout_seconds: 2").expect("write config");

        let settings = load_config(path.to_str(), None).expect("config loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.health_timeout_seconds, 2);
        assert!(settings.base_url.starts_with("http"));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = load_config(Some("/definitely/not/here/tokenprobe.yml"), None);
        assert!(matches!(result, Err(ProbeError::ConfigRead { .. })));
    }
}
