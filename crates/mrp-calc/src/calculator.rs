//! MRP 主計算器

use bom_graph::BomGraph;
use chrono::NaiveDate;
use mrp_core::{
    CalculationPeriod, CancellationToken, Forecast, InventoryPosition, InventorySnapshot,
    MrpError, PlanningConfig, ProductionProposal, RequirementReport, SalesOrder,
};
use rust_decimal::Decimal;

use crate::aggregator::DemandAggregator;
use crate::explosion::ExplosionEngine;
use crate::planner::ShortagePlanner;
use crate::report::ReportBuilder;

/// 單次計算的輸入快照
///
/// 訂單、預測、庫存皆由外部協作者於計算開始前備妥；引擎本身
/// 不進行任何阻塞 I/O。並行的計算各自持有自己的快照。
#[derive(Debug, Clone)]
pub struct PlanningInputs {
    /// 銷售訂單
    pub orders: Vec<SalesOrder>,

    /// 銷售預測
    pub forecasts: Vec<Forecast>,

    /// 庫存部位
    pub inventory: Vec<InventoryPosition>,

    /// 計算基準日
    pub today: NaiveDate,
}

impl PlanningInputs {
    /// 創建新的輸入快照
    pub fn new(today: NaiveDate) -> Self {
        Self {
            orders: Vec::new(),
            forecasts: Vec::new(),
            inventory: Vec::new(),
            today,
        }
    }

    /// 建構器模式：設置訂單
    pub fn with_orders(mut self, orders: Vec<SalesOrder>) -> Self {
        self.orders = orders;
        self
    }

    /// 建構器模式：設置預測
    pub fn with_forecasts(mut self, forecasts: Vec<Forecast>) -> Self {
        self.forecasts = forecasts;
        self
    }

    /// 建構器模式：設置庫存部位
    pub fn with_inventory(mut self, inventory: Vec<InventoryPosition>) -> Self {
        self.inventory = inventory;
        self
    }
}

/// MRP 計算器
///
/// 持有唯讀的 BOM 圖與計劃參數；單次計算的全部狀態皆為區域變數，
/// 同一計算器可供多個並行計算共用。
pub struct MrpCalculator {
    graph: BomGraph,
    config: PlanningConfig,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器
    pub fn new(graph: BomGraph, config: PlanningConfig) -> Self {
        Self { graph, config }
    }

    /// 主計算入口
    pub fn calculate(&self, inputs: &PlanningInputs) -> mrp_core::Result<RequirementReport> {
        self.calculate_cancellable(inputs, &CancellationToken::new())
    }

    /// 可取消的主計算入口
    pub fn calculate_cancellable(
        &self,
        inputs: &PlanningInputs,
        token: &CancellationToken,
    ) -> mrp_core::Result<RequirementReport> {
        self.config.validate()?;
        Self::validate_inputs(inputs)?;

        let start_time = std::time::Instant::now();
        let calculation_period = CalculationPeriod {
            start: inputs.today,
            end: self.config.horizon_end(inputs.today),
        };

        tracing::info!(
            "開始 MRP 計算：訂單 {} 筆，預測 {} 筆，庫存部位 {} 筆",
            inputs.orders.len(),
            inputs.forecasts.len(),
            inputs.inventory.len()
        );

        // Step 1: 需求彙總
        tracing::debug!("Step 1: 需求彙總");
        let aggregation = DemandAggregator::aggregate(
            &inputs.orders,
            &inputs.forecasts,
            inputs.today,
            &self.config,
        );
        tracing::debug!("需求項數量: {}", aggregation.entries.len());

        // Step 2: 庫存快照（一次讀取，整次計算凍結）
        tracing::debug!("Step 2: 建立庫存快照");
        let snapshot = InventorySnapshot::from_positions(&inputs.inventory);

        // Step 3: BOM 展開
        tracing::debug!("Step 3: BOM 展開");
        let engine = ExplosionEngine::new(&self.graph);
        let mut accumulator = engine.explode_all(&aggregation.entries, token)?;
        tracing::debug!("毛需求元件數: {}", accumulator.gross.len());

        // Step 4: 淨算與缺口生產提案
        tracing::debug!("Step 4: 淨算與缺口生產提案");
        let planner = ShortagePlanner::new(&self.graph, self.config.max_planning_iterations);
        let planning = planner.plan(&mut accumulator, &snapshot);
        tracing::debug!("生產提案數量: {}", planning.proposals.len());

        // Step 5: 組裝需求報告
        tracing::debug!("Step 5: 組裝需求報告");
        let mut warnings = aggregation.warnings;
        warnings.extend(planning.netting.warnings.clone());
        let mut report = ReportBuilder::build(
            &self.graph,
            accumulator,
            &planning.netting,
            planning.proposals,
            calculation_period,
            warnings,
            planning.errors,
        );
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "MRP 計算完成，耗時 {:?}：需求行 {} 行，提案 {} 筆，警告 {} 筆",
            start_time.elapsed(),
            report.lines.len(),
            report.proposals.len(),
            report.warnings.len()
        );

        Ok(report)
    }

    /// 由既有報告重新計算生產提案
    ///
    /// 純函數：對報告中淨需求為正且可生產的元件套用批量進位，
    /// 供先檢視需求再決定是否建立提案的呼叫端使用。
    pub fn propose_production(&self, report: &RequirementReport) -> Vec<ProductionProposal> {
        let mut proposals: Vec<ProductionProposal> = report
            .lines
            .iter()
            .filter(|line| line.net_quantity > Decimal::ZERO)
            .filter_map(|line| {
                let node = self.graph.lookup(&line.component)?;
                let batches = (line.net_quantity / node.batch_size).ceil();
                Some(ProductionProposal::new(
                    line.component,
                    node.bom_id,
                    batches,
                    node.batch_size,
                    line.net_quantity,
                ))
            })
            .collect();
        proposals.sort_by_key(|proposal| proposal.component);
        proposals
    }

    /// 計算前的資料完整性檢查（致命，不產生部分報告）
    fn validate_inputs(inputs: &PlanningInputs) -> mrp_core::Result<()> {
        for order in &inputs.orders {
            for line in &order.lines {
                if line.quantity < Decimal::ZERO {
                    return Err(MrpError::DataIntegrity(format!(
                        "訂單 {} 明細 {} 的數量為負數: {}",
                        order.id, line.line_id, line.quantity
                    )));
                }
            }
        }
        for forecast in &inputs.forecasts {
            if forecast.most_likely < Decimal::ZERO {
                return Err(MrpError::DataIntegrity(format!(
                    "預測 {} 的需求量為負數: {}",
                    forecast.id, forecast.most_likely
                )));
            }
        }
        for position in &inputs.inventory {
            if position.on_hand < Decimal::ZERO || position.reserved < Decimal::ZERO {
                return Err(MrpError::DataIntegrity(format!(
                    "元件 {} 的庫存部位出現負數",
                    position.component
                )));
            }
        }
        Ok(())
    }

    /// 獲取 BOM 圖引用
    pub fn graph(&self) -> &BomGraph {
        &self.graph
    }

    /// 獲取計劃參數引用
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{BomEdge, BomNode, ComponentId};
    use mrp_core::{OrderStatus, SalesOrderLine};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_level_graph() -> BomGraph {
        let node = BomNode::new(ComponentId::product(1), Decimal::ONE, date(2026, 1, 1))
            .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(2)));
        BomGraph::build(vec![node], date(2026, 8, 1)).unwrap()
    }

    fn confirmed_order(quantity: i64) -> SalesOrder {
        SalesOrder::new(1, OrderStatus::Confirmed, date(2026, 8, 5), date(2026, 8, 20))
            .with_line(SalesOrderLine::new(
                1,
                ComponentId::product(1),
                Decimal::from(quantity),
            ))
    }

    #[test]
    fn test_zero_horizon_is_fatal() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(0));
        let inputs = PlanningInputs::new(date(2026, 8, 1));

        assert!(matches!(
            calculator.calculate(&inputs),
            Err(MrpError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn test_negative_order_quantity_is_fatal() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(30));
        let inputs = PlanningInputs::new(date(2026, 8, 1)).with_orders(vec![confirmed_order(-5)]);

        assert!(matches!(
            calculator.calculate(&inputs),
            Err(MrpError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_negative_inventory_is_fatal() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(30));
        let inputs = PlanningInputs::new(date(2026, 8, 1)).with_inventory(vec![
            InventoryPosition::new(ComponentId::material(1), Decimal::from(-1), Decimal::ZERO),
        ]);

        assert!(matches!(
            calculator.calculate(&inputs),
            Err(MrpError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_calculation_period_spans_horizon() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(30));
        let inputs = PlanningInputs::new(date(2026, 8, 1));

        let report = calculator.calculate(&inputs).unwrap();

        assert_eq!(report.calculation_period.start, date(2026, 8, 1));
        assert_eq!(report.calculation_period.end, date(2026, 8, 31));
        assert!(report.lines.is_empty());
        assert!(report.calculation_time_ms.is_some());
    }

    #[test]
    fn test_propose_production_matches_report_proposals() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(30));
        let inputs = PlanningInputs::new(date(2026, 8, 1)).with_orders(vec![confirmed_order(10)]);

        let report = calculator.calculate(&inputs).unwrap();
        let recomputed = calculator.propose_production(&report);

        assert_eq!(recomputed.len(), report.proposals.len());
        for (fresh, original) in recomputed.iter().zip(&report.proposals) {
            assert_eq!(fresh.component, original.component);
            assert_eq!(fresh.batches, original.batches);
            assert_eq!(fresh.quantity, original.quantity);
            assert_eq!(fresh.bom_id, original.bom_id);
        }
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let calculator = MrpCalculator::new(two_level_graph(), PlanningConfig::new(30));
        let inputs = PlanningInputs::new(date(2026, 8, 1)).with_orders(vec![confirmed_order(10)]);
        let token = CancellationToken::new();
        token.cancel();

        assert!(matches!(
            calculator.calculate_cancellable(&inputs, &token),
            Err(MrpError::Cancelled)
        ));
    }
}
