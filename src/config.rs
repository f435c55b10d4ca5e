//! Configuration for persona-order
//!
//! Sources, highest precedence first:
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_ORDER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::persona::{CurrentUser, UserRole};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// The user personas are listed for
    pub user: UserSettings,

    /// Where persona records live
    pub store: StoreSettings,

    /// Listing output
    pub display: DisplaySettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Viewer identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub id: String,
    pub email: String,
    /// admin, curator or basic
    pub role: UserRole,
    /// User group (teamspace) ids
    pub groups: Vec<i64>,
}

/// Which persona store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    File,
    Http,
}

/// Persona store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub kind: StoreKind,

    /// JSON file holding the persona array (file store)
    pub path: String,

    /// Backend base URL (http store)
    pub base_url: String,

    /// Path listing personas, relative to base_url
    pub list_path: String,

    /// Path accepting the display priority map, relative to base_url
    pub priority_path: String,

    /// Bearer token (empty = none)
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Listing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Include personas with is_visible = false
    pub include_hidden: bool,

    /// Print JSON instead of a table
    pub json: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (unset = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            email: String::new(),
            role: UserRole::Basic,
            groups: vec![],
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::File,
            path: "~/.persona-order/personas.json".to_string(),
            base_url: "http://localhost:8080".to_string(),
            list_path: "/persona".to_string(),
            priority_path: "/admin/persona/display-priority".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl OrderConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e.message()),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from("persona-order.toml"),
            dirs::config_dir()
                .map(|p| p.join("persona-order").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".persona-order").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PERSONA_ORDER_USER_ID") {
            self.user.id = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_USER_EMAIL") {
            self.user.email = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_USER_ROLE") {
            if let Ok(role) = val.parse() {
                self.user.role = role;
            }
        }

        if let Ok(val) = std::env::var("PERSONA_ORDER_STORE_KIND") {
            match val.to_lowercase().as_str() {
                "file" => self.store.kind = StoreKind::File,
                "http" => self.store.kind = StoreKind::Http,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_STORE_PATH") {
            self.store.path = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_BASE_URL") {
            self.store.base_url = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_API_KEY") {
            self.store.api_key = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.store.timeout_secs = n;
            }
        }

        if let Ok(val) = std::env::var("PERSONA_ORDER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_ORDER_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    fn expand_paths(&mut self) {
        self.store.path = expand_path(&self.store.path);
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        match self.store.kind {
            StoreKind::File => {
                if self.store.path.is_empty() {
                    return Err(Error::config_field_invalid(
                        "store.path",
                        "File store needs a path",
                    ));
                }
            }
            StoreKind::Http => {
                let url = &self.store.base_url;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(Error::config_field_invalid(
                        "store.base_url",
                        "Store URL must start with http:// or https://",
                    ));
                }
                if self.store.timeout_secs == 0 {
                    return Err(Error::config_field_invalid(
                        "store.timeout_secs",
                        "timeout_secs must be greater than 0",
                    ));
                }
            }
        }

        Ok(())
    }

    /// The configured viewer
    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.user.id.clone(),
            email: self.user.email.clone(),
            role: self.user.role,
            groups: self.user.groups.clone(),
        }
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".persona-order")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

const DEFAULT_CONFIG: &str = r#"# persona-order configuration

[user]
# Viewer identity, used for visibility and ownership labels
id = ""
email = ""
# admin, curator or basic
role = "basic"
# User group (teamspace) ids
groups = []

[store]
# "file" reads a JSON array of personas, "http" talks to the backend
kind = "file"
path = "~/.persona-order/personas.json"

# HTTP store settings
base_url = "http://localhost:8080"
list_path = "/persona"
priority_path = "/admin/persona/display-priority"
api_key = ""
timeout_secs = 30

[display]
# Include personas hidden from the chat picker
include_hidden = false
# Print JSON instead of a table
json = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.persona-order/logs/persona-order.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#;
