use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// 启动和运行期间的服务器错误 (请求级错误使用 `AppError`)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("目录配置错误: {0}")]
    Catalog(#[from] CatalogError),

    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
