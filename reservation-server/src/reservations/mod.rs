//! 预订服务
//!
//! 组合目录、分配引擎和存储，对外提供异步接口。
//! 存储调用是同步阻塞的，统一放到 `spawn_blocking` 上执行。

mod error;
mod service;

pub use error::ReservationError;
pub use service::ReservationService;
