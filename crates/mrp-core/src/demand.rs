//! 需求模型

use bom_core::ComponentId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 需求來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandSource {
    /// 已確認的銷售訂單明細
    ConfirmedOrder { order_id: i64, line_id: i64 },

    /// 銷售預測（按時界重疊比例折算）
    Forecast {
        forecast_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        confidence: Decimal,
    },
}

impl DemandSource {
    /// 排序用類別（訂單優先於預測）
    pub fn kind_rank(&self) -> u8 {
        match self {
            DemandSource::ConfirmedOrder { .. } => 0,
            DemandSource::Forecast { .. } => 1,
        }
    }

    /// 排序用識別鍵
    pub fn id_key(&self) -> (i64, i64) {
        match self {
            DemandSource::ConfirmedOrder { order_id, line_id } => (*order_id, *line_id),
            DemandSource::Forecast { forecast_id, .. } => (*forecast_id, 0),
        }
    }

    /// 檢查是否來自預測
    pub fn is_forecast(&self) -> bool {
        matches!(self, DemandSource::Forecast { .. })
    }
}

/// 需求項（建立後不可變）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandEntry {
    /// 需求元件
    pub component_ref: ComponentId,

    /// 需求數量
    pub quantity: Decimal,

    /// 需求日期
    pub required_by: NaiveDate,

    /// 需求來源
    pub source: DemandSource,
}

impl DemandEntry {
    /// 創建新的需求項
    pub fn new(
        component_ref: ComponentId,
        quantity: Decimal,
        required_by: NaiveDate,
        source: DemandSource,
    ) -> Self {
        Self {
            component_ref,
            quantity,
            required_by,
            source,
        }
    }

    /// 決定性排序鍵：(需求日期, 來源類別, 識別鍵)
    pub fn sort_key(&self) -> (NaiveDate, u8, (i64, i64)) {
        (self.required_by, self.source.kind_rank(), self.source.id_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_demand_entry() {
        let entry = DemandEntry::new(
            ComponentId::product(1),
            Decimal::from(100),
            date(2026, 9, 1),
            DemandSource::ConfirmedOrder {
                order_id: 12,
                line_id: 3,
            },
        );

        assert_eq!(entry.component_ref, ComponentId::product(1));
        assert_eq!(entry.quantity, Decimal::from(100));
        assert!(!entry.source.is_forecast());
    }

    #[test]
    fn test_sort_key_orders_before_forecasts_on_same_date() {
        let order_entry = DemandEntry::new(
            ComponentId::product(1),
            Decimal::from(10),
            date(2026, 9, 1),
            DemandSource::ConfirmedOrder {
                order_id: 99,
                line_id: 1,
            },
        );
        let forecast_entry = DemandEntry::new(
            ComponentId::product(1),
            Decimal::from(10),
            date(2026, 9, 1),
            DemandSource::Forecast {
                forecast_id: 1,
                period_start: date(2026, 9, 1),
                period_end: date(2026, 9, 30),
                confidence: Decimal::new(8, 1),
            },
        );

        assert!(order_entry.sort_key() < forecast_entry.sort_key());
    }

    #[test]
    fn test_sort_key_date_dominates() {
        let earlier = DemandEntry::new(
            ComponentId::product(1),
            Decimal::ONE,
            date(2026, 8, 20),
            DemandSource::Forecast {
                forecast_id: 5,
                period_start: date(2026, 8, 1),
                period_end: date(2026, 8, 31),
                confidence: Decimal::ONE,
            },
        );
        let later = DemandEntry::new(
            ComponentId::product(1),
            Decimal::ONE,
            date(2026, 8, 21),
            DemandSource::ConfirmedOrder {
                order_id: 1,
                line_id: 1,
            },
        );

        assert!(earlier.sort_key() < later.sort_key());
    }
}
