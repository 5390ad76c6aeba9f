//! 銷售預測模型（需求彙總的輸入）

use bom_core::ComponentId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預測狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastStatus {
    /// 草稿
    Draft,
    /// 已提交
    Submitted,
    /// 已核准
    Approved,
    /// 已駁回
    Rejected,
}

impl ForecastStatus {
    /// 是否納入需求彙總
    pub fn generates_demand(&self) -> bool {
        matches!(self, ForecastStatus::Submitted | ForecastStatus::Approved)
    }
}

/// 銷售預測
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// 預測ID
    pub id: i64,

    /// 預測產品
    pub product: ComponentId,

    /// 最可能需求量（涵蓋整個預測期間）
    pub most_likely: Decimal,

    /// 期間起日
    pub period_start: NaiveDate,

    /// 期間迄日
    pub period_end: NaiveDate,

    /// 信心水準（0–1）
    pub confidence: Decimal,

    /// 預測狀態
    pub status: ForecastStatus,
}

impl Forecast {
    /// 創建新的銷售預測
    pub fn new(
        id: i64,
        product: ComponentId,
        most_likely: Decimal,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Self {
        Self {
            id,
            product,
            most_likely,
            period_start,
            period_end,
            confidence: Decimal::ONE,
            status: ForecastStatus::Approved,
        }
    }

    /// 建構器模式：設置信心水準
    pub fn with_confidence(mut self, confidence: Decimal) -> Self {
        self.confidence = confidence;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: ForecastStatus) -> Self {
        self.status = status;
        self
    }

    /// 預測期間總天數
    pub fn total_days(&self) -> i64 {
        (self.period_end - self.period_start).num_days()
    }
}
