use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: get_default_db_path(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "https://localhost:5173".to_string(),
                "http://127.0.0.1:7860".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// The recommendation service the AI gateway talks to
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub flow_id: String,
    pub api_key: Option<String>,
    /// Component ids forwarded as empty tweaks; defaults apply when unset
    pub tweaks: Option<Vec<String>>,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7860".to_string(),
            flow_id: "cd2f8e48-cfa8-4a7c-871b-1a2218d69bf0".to_string(),
            api_key: None,
            tweaks: None,
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a daily rolling log file here in addition to stdout
    pub directory: Option<PathBuf>,
}

impl ApiConfig {
    /// Load from `path` (or the default location), creating a default file if
    /// none exists. `LOCALAITYCS__SECTION__KEY` variables and `PORT` override
    /// file values.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            std::fs::write(&config_path, default_config_file()).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("LOCALAITYCS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| ConfigError::Message(format!("Invalid PORT '{port}': {e}")))?;
        }

        // Expand tilde in database path
        if config.database.path.starts_with("~") {
            if let Some(home) = home::home_dir() {
                let path_str = config.database.path.to_string_lossy();
                let expanded = path_str.replacen("~", &home.to_string_lossy(), 1);
                config.database.path = PathBuf::from(expanded);
            }
        }

        Ok((config, config_path))
    }
}

fn default_config_file() -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
path = "{}"

[cors]
allowed_origins = [
    "http://localhost:5173",
    "https://localhost:5173",
    "http://127.0.0.1:7860",
    "http://127.0.0.1:5173",
]

[upstream]
base_url = "http://127.0.0.1:7860"
flow_id = "cd2f8e48-cfa8-4a7c-871b-1a2218d69bf0"
timeout_secs = 300
# api_key = "your-langflow-api-key"
# tweaks = ["Agent-paooE", "ChatInput-Q5FcW", "ChatOutput-GwK2m"]

[logging]
# directory = "~/.local/share/localaitycs/logs"
"#,
        get_default_db_path().display()
    )
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("localaitycs/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("localaitycs/database.sqlite")
    } else {
        PathBuf::from("database.sqlite")
    }
}
