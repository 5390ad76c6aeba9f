//! # BOM Core
//!
//! BOM 資料模型與類型定義

pub mod component;
pub mod node;

// Re-export 主要類型
pub use component::ComponentId;
pub use node::{BomEdge, BomNode};

use rust_decimal::Decimal;
use uuid::Uuid;

/// BOM 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum BomError {
    #[error("BOM {bom_id} 的批量必須為正數: {batch_size}")]
    InvalidBatchSize { bom_id: Uuid, batch_size: Decimal },

    #[error("BOM {bom_id} 的擁有者必須為產品: {owner}")]
    MaterialOwner { bom_id: Uuid, owner: ComponentId },

    #[error("BOM {bom_id} 中 {component} 的用量不可為負數: {quantity}")]
    NegativeQuantity {
        bom_id: Uuid,
        component: ComponentId,
        quantity: Decimal,
    },

    #[error("BOM {bom_id} 中 {component} 的損耗率必須在 [0, 100) 區間: {scrap_percent}")]
    InvalidScrapPercent {
        bom_id: Uuid,
        component: ComponentId,
        scrap_percent: Decimal,
    },

    #[error("產品 {owner} 存在重複生效的 BOM: {first} 與 {second}")]
    DuplicateActiveBom {
        owner: ComponentId,
        first: Uuid,
        second: Uuid,
    },
}

pub type Result<T> = std::result::Result<T, BomError>;
