use std::env;
use std::str::FromStr;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

// Формат вывода логов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

// Настройки базы данных
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub busy_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника ключей.
    /// Отсутствующие ключи получают значения по умолчанию.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse("PORT", var("PORT", "8080"), "a port number")?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "event_booking=debug,tower_http=debug"),
                log_format: parse("LOG_FORMAT", var("LOG_FORMAT", "pretty"), "pretty or json")?,
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL", "sqlite://app.db"),
                pool_size: parse("DB_POOL_SIZE", var("DB_POOL_SIZE", "8"), "a positive number")?,
                busy_timeout_secs: parse(
                    "DB_BUSY_TIMEOUT_SECS",
                    var("DB_BUSY_TIMEOUT_SECS", "5"),
                    "a number of seconds",
                )?,
            },
        })
    }
}

fn parse<T: FromStr>(
    key: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value, expected })
}
