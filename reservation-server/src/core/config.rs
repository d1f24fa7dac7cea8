use std::path::{Path, PathBuf};
use std::time::Duration;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// redb 文件 (work_dir/database/reservations.redb)
    Redb,
    /// 进程内存储，重启即清空
    Memory,
}

impl StoreBackend {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redb" => Some(StoreBackend::Redb),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }

    /// 解析 STORE_BACKEND；无法识别的值退回 redb，并原样返回以便日志初始化后告警
    fn resolve(raw: Option<String>) -> (Self, Option<String>) {
        match raw {
            Some(value) => match Self::from_env_value(&value) {
                Some(backend) => (backend, None),
                None => (StoreBackend::Redb, Some(value)),
            },
            None => (StoreBackend::Redb, None),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redb => "redb",
            StoreBackend::Memory => "memory",
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | MAX_CONNECTIONS | 1000 | 最大并发请求数 |
/// | STORE_BACKEND | redb | 存储后端 (redb / memory) |
/// | STORE_TIMEOUT_MS | 5000 | 时段锁及存储访问超时(毫秒) |
/// | CATALOG_FILE | - | 桌台/时段目录 JSON，未设置时使用内置目录 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/reservations STORE_BACKEND=memory cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// 最大并发请求数
    pub max_connections: usize,
    pub store_backend: StoreBackend,
    /// 无法识别的 STORE_BACKEND 原始值
    pub unknown_store_backend: Option<String>,
    /// 存储超时 (毫秒)
    pub store_timeout_ms: u64,
    pub catalog_file: Option<PathBuf>,
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let (store_backend, unknown_store_backend) =
            StoreBackend::resolve(std::env::var("STORE_BACKEND").ok());

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            max_connections: std::env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1000),
            store_backend,
            unknown_store_backend,
            store_timeout_ms: std::env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(5000),
            catalog_file: std::env::var("CATALOG_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("database")
    }

    /// work_dir/database/reservations.redb
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("reservations.redb")
    }

    /// work_dir/logs
    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    /// 创建工作目录结构 (database/, logs/)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
