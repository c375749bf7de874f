//! warden-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// 授权配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationConfig {
    /// 声明角色所用的元数据类型全名，为空时使用默认类型
    #[serde(default)]
    pub role_annotation: Option<String>,
    /// 额外登记的元数据类型，`role_annotation` 只能选择已登记的类型
    #[serde(default)]
    pub annotation_kinds: Vec<String>,
    /// 是否从传输层身份绑定会话
    #[serde(default = "default_session_binding")]
    pub session_binding: bool,
}

fn default_session_binding() -> bool {
    true
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            role_annotation: None,
            annotation_kinds: Vec::new(),
            session_binding: default_session_binding(),
        }
    }
}

/// 身份头配置
///
/// 这些请求头由前置的认证代理写入，服务只信任来自代理的请求
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_user_header")]
    pub user_header: String,
    #[serde(default = "default_roles_header")]
    pub roles_header: String,
    #[serde(default = "default_principal_header")]
    pub principal_header: String,
}

fn default_user_header() -> String {
    "x-remote-user".to_string()
}

fn default_roles_header() -> String {
    "x-remote-roles".to_string()
}

fn default_principal_header() -> String {
    "x-remote-principal".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            roles_header: default_roles_header(),
            principal_header: default_principal_header(),
        }
    }
}

/// 访问控制引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub authorization: AuthorizationConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    pub engine: EngineConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级：环境变量 > {APP_ENV}.toml > default.toml
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("WARDEN_").split("__"));

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
