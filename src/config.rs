use crate::error::AppError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use contest_backend::{AnyBackend, MemoryBackend, RestBackend, RestConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use supabase_auth::{AuthClient, AuthConfig, OfflineAuthService, SupabaseAuthService};

const URL_ENV: &str = "PHOTO_CONTEST_URL";
const ANON_KEY_ENV: &str = "PHOTO_CONTEST_ANON_KEY";

/// Which backend the app talks to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Supabase,
    /// In-process demo data, nothing leaves the device
    Memory,
}

/// Application configuration, read from `contest.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContestConfig {
    pub backend: BackendKind,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// End of submissions, local time
    pub deadline: NaiveDateTime,
    /// How long a toast stays visible
    pub toast_duration_ms: u64,
    /// Admin account created in memory mode
    pub demo_admin_email: String,
    pub demo_admin_password: String,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Supabase,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            deadline: default_deadline(),
            toast_duration_ms: 3000,
            demo_admin_email: "admin@demo.local".to_string(),
            demo_admin_password: "admin123".to_string(),
        }
    }
}

/// 23:59 on 26 February 2026
fn default_deadline() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 26)
        .and_then(|d| d.and_hms_opt(23, 59, 0))
        .unwrap_or_default()
}

impl ContestConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Applies environment overrides and falls back to memory mode when no
    /// hosted project is configured
    fn finish(mut self, url: Option<String>, anon_key: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.supabase_url = url;
        }
        if let Some(key) = anon_key.filter(|k| !k.trim().is_empty()) {
            self.supabase_anon_key = key;
        }

        if self.backend == BackendKind::Supabase
            && (self.supabase_url.trim().is_empty() || self.supabase_anon_key.trim().is_empty())
        {
            log::warn!("No Supabase project configured, using demo data");
            self.backend = BackendKind::Memory;
        }
        self
    }

    /// Submission deadline as a local instant
    pub fn deadline_local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.deadline)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&self.deadline))
    }

    pub fn build_backend(&self) -> Result<AnyBackend, AppError> {
        match self.backend {
            BackendKind::Memory => Ok(AnyBackend::Memory(MemoryBackend::with_demo_data())),
            BackendKind::Supabase => Ok(AnyBackend::Rest(RestBackend::new(RestConfig {
                base_url: self.supabase_url.clone(),
                anon_key: self.supabase_anon_key.clone(),
            })?)),
        }
    }

    pub fn build_auth(&self) -> Result<AuthClient, AppError> {
        match self.backend {
            BackendKind::Memory => Ok(AuthClient::Offline(OfflineAuthService::new())),
            BackendKind::Supabase => Ok(AuthClient::Supabase(SupabaseAuthService::new(
                AuthConfig {
                    base_url: self.supabase_url.clone(),
                    anon_key: self.supabase_anon_key.clone(),
                },
            )?)),
        }
    }
}

/// Location of the configuration file, next to the session database
pub fn config_path() -> PathBuf {
    crate::database::get_data_directory().join("contest.toml")
}

/// Loads the configuration; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<ContestConfig, AppError> {
    let config = match std::fs::read_to_string(path) {
        Ok(content) => ContestConfig::from_toml(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", path.display());
            ContestConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(config.finish(std::env::var(URL_ENV).ok(), std::env::var(ANON_KEY_ENV).ok()))
}

pub fn load_config() -> Result<ContestConfig, AppError> {
    load_config_from(&config_path())
}

/// Configuration plus the clients built from it
#[derive(Debug, Clone)]
pub struct AppServices {
    pub config: ContestConfig,
    pub backend: AnyBackend,
    pub auth: AuthClient,
}

impl AppServices {
    /// Builds both clients; if the hosted clients cannot be created the app
    /// runs on demo data instead of failing
    pub fn from_config(config: ContestConfig) -> Self {
        match (config.build_backend(), config.build_auth()) {
            (Ok(backend), Ok(auth)) => Self {
                config,
                backend,
                auth,
            },
            (backend, auth) => {
                if let Err(e) = backend {
                    log::error!("Failed to create backend client: {}", e);
                }
                if let Err(e) = auth {
                    log::error!("Failed to create auth client: {}", e);
                }
                Self::demo(config)
            }
        }
    }

    pub fn demo(config: ContestConfig) -> Self {
        Self {
            config: ContestConfig {
                backend: BackendKind::Memory,
                ..config
            },
            backend: AnyBackend::Memory(MemoryBackend::with_demo_data()),
            auth: AuthClient::Offline(OfflineAuthService::new()),
        }
    }
}

/// Loads the configuration and creates the clients
pub fn init_services() -> AppServices {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Failed to load configuration: {}", e);
        ContestConfig {
            backend: BackendKind::Memory,
            ..ContestConfig::default()
        }
    });
    let services = AppServices::from_config(config);
    log::info!("Using {} backend", services.backend.kind());
    services
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ContestConfig::from_toml(
            r#"
            supabase_url = "https://x.supabase.co"
            deadline = "2026-03-01T12:00:00"
            "#,
        )
        .unwrap();

        assert_eq!(config.supabase_url, "https://x.supabase.co");
        assert_eq!(config.toast_duration_ms, 3000);
        assert_eq!(
            config.deadline,
            NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_project_falls_back_to_memory() {
        let config = ContestConfig::default().finish(None, None);
        assert_eq!(config.backend, BackendKind::Memory);

        let config = ContestConfig::default().finish(
            Some("https://x.supabase.co".to_string()),
            Some("anon".to_string()),
        );
        assert_eq!(config.backend, BackendKind::Supabase);
        assert_eq!(config.supabase_anon_key, "anon");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ContestConfig::default();
        let parsed = ContestConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_memory_config_builds_demo_clients() {
        let config = ContestConfig {
            backend: BackendKind::Memory,
            ..ContestConfig::default()
        };
        let services = AppServices::from_config(config);
        assert!(matches!(services.backend, AnyBackend::Memory(_)));
        assert_eq!(services.backend.kind(), "memory");
        assert!(matches!(services.auth, AuthClient::Offline(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            ContestConfig::from_toml("backend = 12"),
            Err(AppError::Config(_))
        ));
    }
}
