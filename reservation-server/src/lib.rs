//! Reservation Server - 餐厅订桌服务
//!
//! # 架构概述
//!
//! - **目录** (`catalog`): 桌台容量和餐段时段，启动时加载，运行期不可变
//! - **分配引擎** (`allocation`): 纯函数，最佳适配或校验指定桌号
//! - **存储** (`store`): 内存 / redb 两种实现，按时段加锁的原子创建
//! - **预订服务** (`reservations`): 组合以上三者的异步用例
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── catalog/       # 桌台和时段目录
//! ├── allocation/    # 分配引擎
//! ├── store/         # 存储层
//! ├── reservations/  # 预订服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误转换、日志、校验
//! ```

pub mod allocation;
pub mod api;
pub mod catalog;
pub mod core;
pub mod reservations;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use allocation::{AllocationError, Occupancy, allocate};
pub use catalog::{Catalog, CatalogError};
pub use core::{Config, Server, ServerError, ServerState};
pub use reservations::{ReservationError, ReservationService};
pub use store::{MemoryStore, RedbStore, ReservationStore, StoreError};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env，创建工作目录，初始化日志
pub fn setup_environment() -> Result<Config, ServerError> {
    // .env 可选
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir();
    let file_output = config.is_production().then_some(log_dir.as_path());
    init_logger_with_file(Some(&config.log_level), config.log_json, file_output)
        .map_err(|e| anyhow::anyhow!("failed to initialize logger: {e}"))?;

    if let Some(value) = &config.unknown_store_backend {
        tracing::warn!(value = %value, "Unknown STORE_BACKEND, using redb");
    }

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____                                  __  _
   / __ \___  ________  ______   ______ _/ /_(_)___  ____
  / /_/ / _ \/ ___/ _ \/ ___/ | / / __ `/ __/ / __ \/ __ \
 / _, _/  __(__  )  __/ /   | |/ / /_/ / /_/ / /_/ / / / /
/_/ |_|\___/____/\___/_/    |___/\__,_/\__/_/\____/_/ /_/
    "#
    );
}
