//! 銷售訂單模型（需求彙總的輸入）

use bom_core::ComponentId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 草稿
    Draft,
    /// 已確認
    Confirmed,
    /// 處理中
    Processing,
    /// 已出貨
    Shipped,
    /// 已取消
    Cancelled,
}

impl OrderStatus {
    /// 是否納入需求彙總
    pub fn generates_demand(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Processing)
    }
}

/// 銷售訂單明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    /// 明細ID
    pub line_id: i64,

    /// 訂購產品
    pub product: ComponentId,

    /// 訂購數量
    pub quantity: Decimal,
}

impl SalesOrderLine {
    /// 創建新的訂單明細
    pub fn new(line_id: i64, product: ComponentId, quantity: Decimal) -> Self {
        Self {
            line_id,
            product,
            quantity,
        }
    }
}

/// 銷售訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    /// 訂單ID
    pub id: i64,

    /// 訂單狀態
    pub status: OrderStatus,

    /// 下單日期
    pub order_date: NaiveDate,

    /// 客戶要求交期
    pub required_date: NaiveDate,

    /// 訂單明細
    pub lines: Vec<SalesOrderLine>,
}

impl SalesOrder {
    /// 創建新的銷售訂單
    pub fn new(
        id: i64,
        status: OrderStatus,
        order_date: NaiveDate,
        required_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            status,
            order_date,
            required_date,
            lines: Vec::new(),
        }
    }

    /// 建構器模式：添加明細
    pub fn with_line(mut self, line: SalesOrderLine) -> Self {
        self.lines.push(line);
        self
    }
}
