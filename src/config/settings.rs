use serde::Deserialize;

/// The API the prober talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://runaway-coach-api-203308554831.us-central1.run.app";

/// Settings for a single probe run.
/// Every field is optional in the YAML file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProbeSettings {
    /// Base URL of the API under test, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the unauthenticated health check.
    #[serde(default = "default_health_timeout_seconds")]
    pub health_timeout_seconds: u64,

    /// Timeout for each authenticated request.
    #[serde(default = "default_auth_timeout_seconds")]
    pub auth_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_seconds: default_health_timeout_seconds(),
            auth_timeout_seconds: default_auth_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_health_timeout_seconds() -> u64 {
    10
}

fn default_auth_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("tokenprobe/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let settings = ProbeSettings::default();
        assert_eq!(settings.health_timeout_seconds, 10);
        assert_eq!(settings.auth_timeout_seconds, 30);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_settings_deserialization() {
        let yaml = r#"
                    base_url: http://localhost:8000
                    auth_timeout_seconds: 5
                    "#;

        let settings: ProbeSettings = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.auth_timeout_seconds, 5);
        // untouched fields keep their defaults
        assert_eq!(settings.health_timeout_seconds, 10);
        assert!(settings.user_agent.starts_with("tokenprobe/"));
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let settings: ProbeSettings = serde_yaml::from_str("{}").expect("Invalid YAML");
        assert_eq!(settings, ProbeSettings::default());
    }
}
