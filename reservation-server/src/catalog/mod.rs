//! 目录模块 - 桌台和餐段时段 (启动时加载，运行期不可变)
//!
//! # 结构
//!
//! - [`TableRegistry`] - 桌台及容量
//! - [`SlotCatalog`] - 午市时段 / 晚市轮次
//! - [`Catalog`] - 二者的组合，以 `Arc<Catalog>` 注入分配引擎和存储
//!
//! # 配置文件格式
//!
//! ```json
//! {
//!   "tables": [{ "id": 1, "max": 2 }, { "id": 2, "max": 4 }],
//!   "lunchSlots": ["11:30-12:30", "12:30-13:30"],
//!   "dinnerRounds": [{ "id": "D1", "label": "19:30-21:00" }]
//! }
//! ```

mod slots;
mod tables;

pub use slots::SlotCatalog;
pub use tables::TableRegistry;

use serde::Deserialize;
use shared::models::{DinnerRound, MealPeriod, Table, TableId};
use std::path::Path;
use thiserror::Error;

/// Built-in table capacities, ids assigned 1..=30 in order
pub const DEFAULT_TABLE_CAPACITIES: [u32; 30] = [
    2, 2, 2, 2, 4, 4, 4, 4, 4, 4, 10, 4, 4, 4, 4, 6, 6, 4, 4, 2, 2, 4, 4, 4, 4, 4, 6, 6, 4, 4,
];

pub const DEFAULT_LUNCH_SLOTS: [&str; 3] = ["11:30-12:30", "12:30-13:30", "13:30-14:30"];

pub const DEFAULT_DINNER_ROUNDS: [(&str, &str); 3] = [
    ("D1", "19:30-21:00"),
    ("D2", "21:00-22:30"),
    ("D3", "22:30-24:00"),
];

/// Catalog configuration errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("table registry is empty")]
    EmptyRegistry,

    #[error("duplicate table id {0}")]
    DuplicateTableId(TableId),

    #[error("table ids must be 1..={expected}, found id {found}")]
    NonContiguousIds { expected: usize, found: TableId },

    #[error("table {0} has zero capacity")]
    ZeroCapacity(TableId),

    #[error("empty time identifier in {0} slots")]
    EmptySlotId(MealPeriod),

    #[error("duplicate {meal_period} slot '{time_id}'")]
    DuplicateSlot {
        meal_period: MealPeriod,
        time_id: String,
    },

    #[error("slot catalog defines no slots")]
    NoSlots,

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk catalog description
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub tables: Vec<Table>,
    pub lunch_slots: Vec<String>,
    pub dinner_rounds: Vec<DinnerRound>,
}

/// Immutable catalog: tables + slots
#[derive(Debug, Clone)]
pub struct Catalog {
    pub tables: TableRegistry,
    pub slots: SlotCatalog,
}

impl Catalog {
    pub fn new(tables: TableRegistry, slots: SlotCatalog) -> Self {
        Self { tables, slots }
    }

    /// 内置默认目录 (30 张桌台，3 个午市时段，3 个晚市轮次)
    pub fn builtin() -> Self {
        Self {
            tables: TableRegistry::builtin(),
            slots: SlotCatalog::builtin(),
        }
    }

    /// Build from a parsed catalog description
    pub fn from_file_contents(file: CatalogFile) -> Result<Self, CatalogError> {
        let tables = TableRegistry::new(file.tables)?;
        let slots = SlotCatalog::new(file.lunch_slots, file.dinner_rounds)?;
        Ok(Self { tables, slots })
    }

    /// Load from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        Self::from_file_contents(file)
    }

    /// Load from `path` if given, otherwise the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => {
                let catalog = Self::from_path(p)?;
                tracing::info!(
                    path = %p.display(),
                    tables = catalog.tables.len(),
                    "Loaded catalog from file"
                );
                Ok(catalog)
            }
            None => Ok(Self::builtin()),
        }
    }
}
