//! 需求彙總
//!
//! 將已確認訂單與按時界重疊比例折算的預測，合併為單一份
//! 排序後的需求清單。純函數，不觸及任何外部狀態。

use chrono::NaiveDate;
use mrp_core::{
    DemandEntry, DemandSource, Forecast, MrpWarning, PlanningConfig, SalesOrder,
};
use rust_decimal::Decimal;

/// 彙總結果
#[derive(Debug, Clone, Default)]
pub struct AggregationOutcome {
    /// 排序後的需求項
    pub entries: Vec<DemandEntry>,

    /// 資料品質警告
    pub warnings: Vec<MrpWarning>,
}

/// 需求彙總器
pub struct DemandAggregator;

impl DemandAggregator {
    /// 彙總需求
    ///
    /// 訂單：狀態為已確認/處理中且下單日期落在時界內者，每條明細
    /// 產生一筆需求，需求日期為訂單要求交期。
    ///
    /// 預測：狀態為已核准/已提交且期間與時界重疊者，需求量按重疊
    /// 天數比例折算；期間天數無效的預測以零需求剔除並記錄警告。
    pub fn aggregate(
        orders: &[SalesOrder],
        forecasts: &[Forecast],
        today: NaiveDate,
        config: &PlanningConfig,
    ) -> AggregationOutcome {
        let horizon_end = config.horizon_end(today);
        let mut outcome = AggregationOutcome::default();

        for order in orders {
            if !order.status.generates_demand() {
                continue;
            }
            if order.order_date < today || order.order_date > horizon_end {
                continue;
            }
            for line in &order.lines {
                outcome.entries.push(DemandEntry::new(
                    line.product,
                    line.quantity,
                    order.required_date,
                    DemandSource::ConfirmedOrder {
                        order_id: order.id,
                        line_id: line.line_id,
                    },
                ));
            }
        }

        if config.include_forecasts {
            for forecast in forecasts {
                if !forecast.status.generates_demand() {
                    continue;
                }

                let total_days = forecast.total_days();
                if total_days <= 0 {
                    outcome.warnings.push(MrpWarning::warning(
                        forecast.product,
                        format!("預測 {} 的期間天數無效，以零需求剔除", forecast.id),
                    ));
                    continue;
                }

                let overlap_start = forecast.period_start.max(today);
                let overlap_end = forecast.period_end.min(horizon_end);
                let overlap_days = (overlap_end - overlap_start).num_days();
                if overlap_days <= 0 {
                    continue;
                }

                let quantity = forecast.most_likely * Decimal::from(overlap_days)
                    / Decimal::from(total_days);
                if quantity <= Decimal::ZERO {
                    continue;
                }

                outcome.entries.push(DemandEntry::new(
                    forecast.product,
                    quantity,
                    overlap_start,
                    DemandSource::Forecast {
                        forecast_id: forecast.id,
                        period_start: forecast.period_start,
                        period_end: forecast.period_end,
                        confidence: forecast.confidence,
                    },
                ));
            }
        }

        // 決定性排序：(需求日期, 來源類別, 識別鍵)
        outcome.entries.sort_by_key(|entry| entry.sort_key());

        outcome
    }
}
