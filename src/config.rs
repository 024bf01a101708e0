use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Maximum number of records a list request returns.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            page_size: default_page_size(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_page_size() -> i64 {
    10
}

impl AppConfig {
    /// Load configuration from a YAML file, expanding `${VAR}` and
    /// `${VAR:-default}` references from the environment. The store URL is
    /// typically provided this way.
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> AppResult<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(AppError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded_content = Self::expand_env_vars(&content)?;

        let app_config: AppConfig = serde_yaml::from_str(&expanded_content).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(app_config)
    }

    /// Default configuration: in-memory SQLite, loopback on port 3000.
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                // In-memory SQLite keeps a separate database per connection,
                // so the pool must stay at one.
                max_connections: 1,
            },
            api: ApiConfig::default(),
        }
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> AppResult<String> {
        let chars: Vec<char> = content.chars().collect();
        let mut expanded = String::new();
        let mut i = 0;

        while i < chars.len() {
            if i + 1 < chars.len() && chars[i] == '$' && chars[i + 1] == '{' {
                // Find the closing brace
                let mut j = i + 2;
                while j < chars.len() && chars[j] != '}' {
                    j += 1;
                }

                if j < chars.len() {
                    let var_expr: String = chars[i + 2..j].iter().collect();

                    let (var_name, default_value) = if let Some(pos) = var_expr.find(":-") {
                        (
                            var_expr[..pos].to_string(),
                            Some(var_expr[pos + 2..].to_string()),
                        )
                    } else {
                        (var_expr, None)
                    };

                    let value = match std::env::var(&var_name) {
                        Ok(val) => val,
                        Err(_) => {
                            if let Some(default) = default_value {
                                default
                            } else {
                                return Err(AppError::Configuration(format!(
                                    "Environment variable {} not found and no default provided",
                                    var_name
                                )));
                            }
                        }
                    };

                    expanded.push_str(&value);
                    i = j + 1;
                } else {
                    expanded.push(chars[i]);
                    i += 1;
                }
            } else {
                expanded.push(chars[i]);
                i += 1;
            }
        }

        Ok(expanded)
    }
}
