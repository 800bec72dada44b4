use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Accounts known to the offline directory.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Login flow settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Artificial delay applied to each offline directory call.
    #[serde(default)]
    pub latency_ms: u64,
    /// Caller-side bound on a whole login attempt (0 = wait forever).
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,
    /// Make the offline directory refuse session refresh after accepting credentials.
    #[serde(default)]
    pub fail_refresh: bool,
}

fn default_submit_timeout_secs() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            submit_timeout_secs: default_submit_timeout_secs(),
            fail_refresh: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
    /// Defaults to the local part of `email`.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AccountConfig {
    pub fn user_id(&self) -> &str {
        match &self.user_id {
            Some(id) => id,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Config consulted when no explicit path is given, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the explicit file if given and readable, else
    /// [`DEFAULT_CONFIG_PATH`] if present, else built-in defaults.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Self {
        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        let candidates = explicit_path
            .into_iter()
            .chain(fallback.exists().then_some(fallback));

        for path in candidates {
            match Self::load(path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded Circle config from {}", path.display());
                    return cfg;
                }
                Err(e) => tracing::warn!("Ignoring Circle config at {}: {e}", path.display()),
            }
        }

        tracing::info!("No usable Circle config file, using built-in defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.logging.filter, "info");
        assert_eq!(cfg.auth.latency_ms, 0);
        assert_eq!(cfg.auth.submit_timeout_secs, 30);
        assert!(!cfg.auth.fail_refresh);
        assert!(cfg.accounts.is_empty());
    }

    #[test]
    fn partial_auth_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str("[auth]\nfail_refresh = true\n").unwrap();
        assert!(cfg.auth.fail_refresh);
        assert_eq!(cfg.auth.submit_timeout_secs, 30);
    }

    #[test]
    fn parses_accounts() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [[accounts]]
            email = "ada@circle.app"
            password = "secret"

            [[accounts]]
            email = "grace@circle.app"
            password = "hunter2"
            user_id = "user:42"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.accounts.len(), 2);
        assert_eq!(cfg.accounts[0].user_id(), "ada");
        assert_eq!(cfg.accounts[1].user_id(), "user:42");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circle.toml");
        std::fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.logging.filter, "debug");
    }

    #[test]
    fn load_or_default_prefers_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circle.toml");
        std::fs::write(&path, "[auth]\nlatency_ms = 5\n").unwrap();

        let cfg = AppConfig::load_or_default(Some(&path));
        assert_eq!(cfg.auth.latency_ms, 5);
    }

    #[test]
    fn load_or_default_falls_back_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is not = = toml").unwrap();

        let cfg = AppConfig::load_or_default(Some(&path));
        assert_eq!(cfg.auth.submit_timeout_secs, 30);
    }
}
