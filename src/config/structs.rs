use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Result;
use crate::utils::MAX_CODE_LENGTH;

/// Default short code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - storage: redb 文件路径和过期清理周期
/// - api: 写操作使用的共享密钥
/// - features: 短码长度
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：TINYLINK，分隔符：__
    /// 示例：TINYLINK__SERVER__PORT=9999
    ///
    /// `path` defaults to `config.toml`, which may be absent. An explicitly
    /// given file must exist.
    pub fn try_load(path: Option<&str>) -> Result<Self> {
        Self::try_load_with_prefix(path, "TINYLINK")
    }

    /// 环境变量保持字符串形式，由目标字段自行解析；
    /// 例如 `api.key = 007123` 不能被转成整数 7123
    fn try_load_with_prefix(path: Option<&str>, env_prefix: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let file = path.unwrap_or("config.toml");

        let settings = Config::builder()
            .add_source(File::with_name(file).required(path.is_some()))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// Like [`StaticConfig::try_load`], falling back to defaults on error.
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                if let Some(p) = path {
                    eprintln!("[INFO] Configuration loaded from: {}", p);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
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
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Seconds between expiry sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Shared secret expected in `X-API-KEY`.
    ///
    /// Empty disables the write API: every request under `/api` answers 404,
    /// including requests that carry no `X-API-KEY` header at all.
    #[serde(default)]
    pub key: String,
}

/// 功能配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(
        default = "default_code_length",
        deserialize_with = "deserialize_code_length"
    )]
    pub short_code_length: usize,
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

/// Invalid lengths fall back to [`DEFAULT_CODE_LENGTH`] instead of failing
/// the whole configuration; lengths above [`MAX_CODE_LENGTH`] are capped.
fn deserialize_code_length<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLength {
        Int(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let parsed = match RawLength::deserialize(deserializer)? {
        RawLength::Int(n) => Some(n),
        RawLength::Text(s) => s.trim().parse::<i64>().ok(),
        RawLength::Other(_) => None,
    };

    match parsed {
        Some(n) if n > MAX_CODE_LENGTH as i64 => {
            eprintln!(
                "[WARN] Invalid features.short_code_length {}, capping to {}",
                n, MAX_CODE_LENGTH
            );
            Ok(MAX_CODE_LENGTH)
        }
        Some(n) if n >= 1 => Ok(n as usize),
        _ => {
            eprintln!(
                "[WARN] Invalid features.short_code_length, defaulting to {}",
                DEFAULT_CODE_LENGTH
            );
            Ok(DEFAULT_CODE_LENGTH)
        }
    }
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_storage_path() -> String {
    "tinylink.redb".to_string()
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
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
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            short_code_length: default_code_length(),
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
