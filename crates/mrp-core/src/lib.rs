//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod forecast;
pub mod inventory;
pub mod order;
pub mod report;

// Re-export 主要類型
pub use bom_core::ComponentId;
pub use config::PlanningConfig;
pub use demand::{DemandEntry, DemandSource};
pub use forecast::{Forecast, ForecastStatus};
pub use inventory::{InventoryPosition, InventorySnapshot};
pub use order::{OrderStatus, SalesOrder, SalesOrderLine};
pub use report::{
    CalculationPeriod, DemandTrace, MrpWarning, PlanningError, ProductionProposal,
    RequirementLine, RequirementReport, TraceOrigin, WarningSeverity,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// MRP 錯誤類型（致命，計算開始前即中止，不產生部分報告）
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("無效的計劃時界: {0} 天（必須大於 0）")]
    InvalidHorizon(u32),

    #[error("無效的迭代上限（必須大於 0）")]
    InvalidIterationLimit,

    #[error("BOM 資料錯誤: {0}")]
    Bom(#[from] bom_core::BomError),

    #[error("資料完整性錯誤: {0}")]
    DataIntegrity(String),

    #[error("計算已取消")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, MrpError>;

/// 取消權杖
///
/// 展開引擎僅在頂層需求之間檢查權杖；單一子樹的展開不會被中斷，
/// 避免留下不一致的累計狀態。
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// 創建新的權杖
    pub fn new() -> Self {
        Self::default()
    }

    /// 要求取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// 檢查是否已要求取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
