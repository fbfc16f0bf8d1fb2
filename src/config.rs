use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub ticket: TicketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

/// 购票人身份字段模式：表单两个版本分别收集证件号或邮箱，按部署配置二选一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    IdNumber,
    Email,
}

/// 票号分配参数
/// - 号码区间 [min_number, max_number] 为全局共享号池
/// - random_tries 次随机探测后退化为顺序扫描
/// - max_attempts 为整个分配事务的重试预算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    #[serde(default = "default_min_number")]
    pub min_number: i64,
    #[serde(default = "default_max_number")]
    pub max_number: i64,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_random_tries")]
    pub random_tries: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_identity_field")]
    pub identity_field: IdentityField,
}

fn default_min_number() -> i64 {
    151
}

fn default_max_number() -> i64 {
    2000
}

fn default_prefix() -> String {
    "LUCKY-".to_string()
}

fn default_random_tries() -> u32 {
    300
}

fn default_max_attempts() -> u32 {
    5
}

fn default_identity_field() -> IdentityField {
    IdentityField::IdNumber
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            min_number: default_min_number(),
            max_number: default_max_number(),
            prefix: default_prefix(),
            random_tries: default_random_tries(),
            max_attempts: default_max_attempts(),
            identity_field: default_identity_field(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    ticket: TicketConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.refresh_token_expires_in = n;
        }

        // 票号分配参数
        if let Ok(v) = env::var("TICKET_MIN_NUMBER")
            && let Ok(n) = v.parse()
        {
            config.ticket.min_number = n;
        }
        if let Ok(v) = env::var("TICKET_MAX_NUMBER")
            && let Ok(n) = v.parse()
        {
            config.ticket.max_number = n;
        }
        if let Ok(v) = env::var("TICKET_PREFIX") {
            config.ticket.prefix = v;
        }
        if let Ok(v) = env::var("TICKET_RANDOM_TRIES")
            && let Ok(n) = v.parse()
        {
            config.ticket.random_tries = n;
        }
        if let Ok(v) = env::var("TICKET_MAX_ATTEMPTS")
            && let Ok(n) = v.parse()
        {
            config.ticket.max_attempts = n;
        }
        if let Ok(v) = env::var("TICKET_IDENTITY_FIELD") {
            config.ticket.identity_field = match v.as_str() {
                "email" => IdentityField::Email,
                _ => IdentityField::IdNumber,
            };
        }

        if config.ticket.min_number > config.ticket.max_number {
            return Err("票号区间无效: min_number 大于 max_number".into());
        }

        Ok(config)
    }
}
