use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Where the JSON blobs live.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

/// `emailjs` forwards contact messages for real, `simulated` only pretends.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RelayMode {
    EmailJs,
    Simulated,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub default_data_path: Option<String>,

    #[serde(default = "default_session_duration")]
    pub session_duration_hours: i64,

    #[serde(default = "default_presence_window")]
    pub presence_window_secs: i64,

    #[serde(default = "default_presence_refresh")]
    pub presence_refresh_secs: u64,

    #[serde(default = "default_relay_mode")]
    pub relay_mode: RelayMode,

    #[serde(default = "default_simulated_delay")]
    pub simulated_delay_ms: u64,

    #[serde(default = "default_emailjs_api_url")]
    pub emailjs_api_url: String,

    #[serde(default)]
    pub emailjs_service_id: String,

    #[serde(default)]
    pub emailjs_hire_service_id: String,

    #[serde(default)]
    pub emailjs_template_id: String,

    #[serde(default)]
    pub emailjs_public_key: String,

    #[serde(default)]
    pub emailjs_private_key: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Content".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}
fn default_data_dir() -> String {
    "data/store".to_string()
}
const MAX_SESSION_DURATION_HOURS: i64 = 24 * 365;

fn default_session_duration() -> i64 {
    24
}
fn default_presence_window() -> i64 {
    5 * 60
}
fn default_presence_refresh() -> u64 {
    30
}
fn default_relay_mode() -> RelayMode {
    RelayMode::Simulated
}
fn default_simulated_delay() -> u64 {
    1000
}
fn default_emailjs_api_url() -> String {
    "https://api.emailjs.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            storage_backend: default_storage_backend(),
            data_dir: default_data_dir(),
            default_data_path: None,
            session_duration_hours: default_session_duration(),
            presence_window_secs: default_presence_window(),
            presence_refresh_secs: default_presence_refresh(),
            relay_mode: default_relay_mode(),
            simulated_delay_ms: default_simulated_delay(),
            emailjs_api_url: default_emailjs_api_url(),
            emailjs_service_id: String::new(),
            emailjs_hire_service_id: String::new(),
            emailjs_template_id: String::new(),
            emailjs_public_key: String::new(),
            emailjs_private_key: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if config.emailjs_private_key.is_none() {
            config.emailjs_private_key = env::var("APP_EMAILJS_PRIVATE_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.session_duration_hours <= 0 {
            errors.push("SESSION_DURATION_HOURS must be positive");
        }
        if self.session_duration_hours > MAX_SESSION_DURATION_HOURS {
            errors.push("SESSION_DURATION_HOURS cannot exceed one year");
        }
        if self.presence_window_secs <= 0 {
            errors.push("PRESENCE_WINDOW_SECS must be positive");
        }
        if self.presence_refresh_secs == 0 {
            errors.push("PRESENCE_REFRESH_SECS must be positive");
        }
        if self.storage_backend == StorageBackend::File && self.data_dir.trim().is_empty() {
            errors.push("DATA_DIR cannot be empty with the file storage backend");
        }
        if self.relay_mode == RelayMode::EmailJs {
            if self.emailjs_service_id.trim().is_empty() {
                errors.push("EMAILJS_SERVICE_ID must be set when relay_mode is emailjs");
            }
            if self.emailjs_template_id.trim().is_empty() {
                errors.push("EMAILJS_TEMPLATE_ID must be set when relay_mode is emailjs");
            }
            if self.emailjs_public_key.trim().is_empty() {
                errors.push("EMAILJS_PUBLIC_KEY must be set when relay_mode is emailjs");
            }
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn session_duration(&self) -> chrono::Duration {
        chrono::Duration::try_hours(self.session_duration_hours.clamp(1, MAX_SESSION_DURATION_HOURS))
            .unwrap_or_else(|| chrono::Duration::hours(default_session_duration()))
    }

    pub fn presence_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.presence_window_secs)
    }

    pub fn presence_refresh(&self) -> Duration {
        Duration::from_secs(self.presence_refresh_secs)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    /// Hire-me requests fall back to the contact service when no dedicated one is set.
    pub fn hire_service_id(&self) -> &str {
        if self.emailjs_hire_service_id.trim().is_empty() {
            &self.emailjs_service_id
        } else {
            &self.emailjs_hire_service_id
        }
    }

    pub fn private_key(&self) -> Option<Zeroizing<String>> {
        self.emailjs_private_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Zeroizing::new(key.clone()))
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for RelayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelayMode::EmailJs => "emailjs",
            RelayMode::Simulated => "simulated",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        self.as_deref().unwrap_or_default().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("storage_backend", &self.storage_backend)
            .field("data_dir", &self.data_dir)
            .field("default_data_path", &self.default_data_path)
            .field("session_duration_hours", &self.session_duration_hours)
            .field("presence_window_secs", &self.presence_window_secs)
            .field("presence_refresh_secs", &self.presence_refresh_secs)
            .field("relay_mode", &self.relay_mode)
            .field("simulated_delay_ms", &self.simulated_delay_ms)
            .field("emailjs_api_url", &self.emailjs_api_url)
            .field("emailjs_service_id", &self.emailjs_service_id)
            .field("emailjs_hire_service_id", &self.emailjs_hire_service_id)
            .field("emailjs_template_id", &self.emailjs_template_id)
            .field("emailjs_public_key", &self.emailjs_public_key.redact())
            .field("emailjs_private_key", &self.emailjs_private_key.redact())
            .finish()
    }
}
