use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀（`WORDGATE__SERVER__PORT=9999`）
pub const ENV_PREFIX: &str = "WORDGATE";

/// 兼容的扁平环境变量 → 配置 key
///
/// 后出现的条目优先级更高。
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.database_url"),
    ("WORD_API_KEY", "dictionary.api_key"),
    ("WORD_API_URL", "dictionary.api_url"),
    ("WORD_API_HOST", "dictionary.api_host"),
    ("LOCATION_API_KEY", "geo.api_key"),
    ("LOCATION_API_URL", "geo.api_url"),
];

/// 应用配置（启动时构建一次，按引用传给各组件）
///
/// 优先级：扁平环境变量 > `WORDGATE__*` 环境变量 > config.toml > 默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub http: HttpClientConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从 `config.toml`（可选）和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 从指定路径加载配置，文件不存在时只使用环境变量和默认值
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        apply_legacy_env(builder, |key| std::env::var(key).ok())?
            .build()?
            .try_deserialize()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 返回缺失的外部服务配置项（请求时才会失败，这里只用于启动提示）
    pub fn missing_external_keys(&self) -> Vec<&'static str> {
        let checks = [
            ("dictionary.api_url", &self.dictionary.api_url),
            ("dictionary.api_key", &self.dictionary.api_key),
            ("dictionary.api_host", &self.dictionary.api_host),
            ("geo.api_url", &self.geo.api_url),
            ("geo.api_key", &self.geo.api_key),
        ];

        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key)
            .collect()
    }
}

/// 把扁平环境变量覆盖到对应的配置 key 上
pub fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (env_key, config_key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(*config_key, lookup(env_key))?;
    }
    Ok(builder)
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// 可信反向代理（单个 IP 或 CIDR），来自这些地址的请求按 X-Forwarded-For 限流
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 词典 API（RapidAPI WordsAPI）配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_host: String,
}

/// 地理位置 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    /// 返回调用方公网 IP 的服务
    #[serde(default = "default_ip_echo_url")]
    pub ip_echo_url: String,
}

/// 出站 HTTP 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpClientConfig {
    /// 全局超时（秒），不设置则不超时
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// 全局限流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
    #[serde(default = "default_seconds_per_request")]
    pub seconds_per_request: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5050
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://favorites.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_ip_echo_url() -> String {
    "http://api.ipify.org/".to_string()
}

fn default_burst_size() -> u32 {
    2
}

fn default_seconds_per_request() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            ip_echo_url: default_ip_echo_url(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst_size: default_burst_size(),
            seconds_per_request: default_seconds_per_request(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 5050);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rate_limit.burst_size, 2);
        assert_eq!(config.rate_limit.seconds_per_request, 120);
        assert_eq!(config.geo.ip_echo_url, "http://api.ipify.org/");
        assert!(config.dictionary.api_url.is_empty());
        assert!(config.http.timeout_secs.is_none());
    }

    #[test]
    fn test_missing_external_keys_on_defaults() {
        let config = AppConfig::default();
        let missing = config.missing_external_keys();

        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&"dictionary.api_key"));
        assert!(missing.contains(&"geo.api_url"));
    }

    #[test]
    fn test_legacy_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("WORD_API_KEY", "secret-word-key"),
            ("WORD_API_URL", "https://wordsapiv1.p.rapidapi.com/words"),
            ("LOCATION_API_URL", "https://geo.example.com/lookup"),
        ]);

        let config: AppConfig = apply_legacy_env(Config::builder(), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

        assert_eq!(config.dictionary.api_key, "secret-word-key");
        assert_eq!(
            config.dictionary.api_url,
            "https://wordsapiv1.p.rapidapi.com/words"
        );
        assert_eq!(config.geo.api_url, "https://geo.example.com/lookup");
        assert!(config.geo.api_key.is_empty());
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wordgate.toml");
        std::fs::write(
            &path,
            "[server]\nport = 6060\n\n[rate_limit]\nburst_size = 5\n\n[http]\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.server.port, 6060);
        assert_eq!(config.rate_limit.burst_size, 5);
        assert_eq!(config.rate_limit.seconds_per_request, 120);
        assert_eq!(config.http.timeout_secs, Some(3));
    }

    #[test]
    fn test_sample_config_is_valid_toml() {
        let sample = AppConfig::generate_sample_config();
        let parsed: AppConfig = toml::from_str(&sample).unwrap();

        assert_eq!(parsed.server.port, 5050);
        assert!(sample.contains("[rate_limit]"));
    }
}
