//! 元件識別模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 元件識別
///
/// BOM 明細可能引用原物料或產品，兩者的數字主鍵來自不同資料表，
/// 即使數值相同也必須視為不同元件。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ComponentId {
    /// 原物料
    Material(i64),
    /// 產品
    Product(i64),
}

impl ComponentId {
    /// 建立原物料識別
    pub fn material(id: i64) -> Self {
        ComponentId::Material(id)
    }

    /// 建立產品識別
    pub fn product(id: i64) -> Self {
        ComponentId::Product(id)
    }

    /// 檢查是否為原物料
    pub fn is_material(&self) -> bool {
        matches!(self, ComponentId::Material(_))
    }

    /// 檢查是否為產品
    pub fn is_product(&self) -> bool {
        matches!(self, ComponentId::Product(_))
    }

    /// 取得原始數字主鍵
    pub fn raw_id(&self) -> i64 {
        match self {
            ComponentId::Material(id) | ComponentId::Product(id) => *id,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Material(id) => write!(f, "M:{}", id),
            ComponentId::Product(id) => write!(f, "P:{}", id),
        }
    }
}
