//! 缺口生產提案
//!
//! 對淨需求為正且可生產（擁有生效 BOM）的元件提出批次提案。
//! 需求展開已是多層展開，缺口的子件耗用已在累計器中；
//! 回饋展開僅針對批量進位的超額部分，直到不再產生新的缺口
//! 或達到迭代上限。

use std::collections::HashMap;

use bom_core::ComponentId;
use bom_graph::BomGraph;
use mrp_core::{InventorySnapshot, PlanningError, ProductionProposal, TraceOrigin};
use rust_decimal::Decimal;

use crate::explosion::{ExplosionEngine, RequirementAccumulator};
use crate::netting::{NettingCalculator, NettingOutcome};

/// 計劃結果
#[derive(Debug, Clone, Default)]
pub struct PlanningOutcome {
    /// 生產提案（依元件排序）
    pub proposals: Vec<ProductionProposal>,

    /// 與最終毛需求一致的淨算結果
    pub netting: NettingOutcome,

    /// 迭代未收斂錯誤（如有）
    pub errors: Vec<PlanningError>,
}

/// 缺口生產計劃器
pub struct ShortagePlanner<'a> {
    graph: &'a BomGraph,
    max_iterations: u32,
}

impl<'a> ShortagePlanner<'a> {
    /// 創建新的計劃器
    pub fn new(graph: &'a BomGraph, max_iterations: u32) -> Self {
        Self {
            graph,
            max_iterations,
        }
    }

    /// 迭代至固定點或迭代上限
    ///
    /// 達上限仍有變動時記錄 `DidNotConverge` 並保留部分結果，
    /// 不做靜默截斷。
    pub fn plan(
        &self,
        accumulator: &mut RequirementAccumulator,
        snapshot: &InventorySnapshot,
    ) -> PlanningOutcome {
        let engine = ExplosionEngine::new(self.graph);
        let mut proposed_batches: HashMap<ComponentId, Decimal> = HashMap::new();
        let mut netting = NettingCalculator::calculate(&accumulator.gross, snapshot);
        let mut errors = Vec::new();

        let mut converged = false;
        let mut rounds = 0u32;

        while rounds < self.max_iterations {
            rounds += 1;
            let mut changed = false;

            // 決定性順序逐元件檢視缺口
            let mut shortages: Vec<(ComponentId, Decimal)> = netting
                .net
                .iter()
                .filter(|(_, net)| **net > Decimal::ZERO)
                .map(|(component, net)| (*component, *net))
                .collect();
            shortages.sort_by_key(|(component, _)| *component);

            for (component, net) in shortages {
                let Some(node) = self.graph.lookup(&component) else {
                    // 不可生產的缺口由採購端處理，非本引擎職責
                    continue;
                };

                let target_batches = (net / node.batch_size).ceil();
                let already = proposed_batches
                    .get(&component)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                if target_batches <= already {
                    continue;
                }
                proposed_batches.insert(component, target_batches);

                // 僅回饋批量進位的超額；淨需求本身的子件耗用
                // 已在需求展開時累計
                let excess = target_batches * node.batch_size - net;
                if excess > Decimal::ZERO {
                    tracing::debug!(
                        "缺口回饋: {} 淨需求 {} → {} 批 × {}，超額 {}",
                        component,
                        net,
                        target_batches,
                        node.batch_size,
                        excess
                    );
                    engine.explode_into(
                        accumulator,
                        component,
                        excess,
                        TraceOrigin::Production { component },
                    );
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }
            netting = NettingCalculator::calculate(&accumulator.gross, snapshot);
        }

        if !converged {
            tracing::warn!("缺口回饋迭代於 {} 輪後仍未收斂", rounds);
            errors.push(PlanningError::DidNotConverge { iterations: rounds });
        }

        let mut proposals: Vec<ProductionProposal> = proposed_batches
            .iter()
            .filter_map(|(component, batches)| {
                let node = self.graph.lookup(component)?;
                Some(ProductionProposal::new(
                    *component,
                    node.bom_id,
                    *batches,
                    node.batch_size,
                    netting.net_of(component),
                ))
            })
            .collect();
        proposals.sort_by_key(|proposal| proposal.component);

        PlanningOutcome {
            proposals,
            netting,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{BomEdge, BomNode};
    use chrono::NaiveDate;
    use mrp_core::{DemandSource, InventoryPosition};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order_origin() -> TraceOrigin {
        TraceOrigin::Demand(DemandSource::ConfirmedOrder { order_id: 1, line_id: 1 })
    }

    /// P:1 (批量1) ── 2 × P:2（批量1）── 3 × M:1
    fn cascade_graph() -> BomGraph {
        let top = BomNode::new(ComponentId::product(1), Decimal::ONE, date(2026, 1, 1))
            .with_item(BomEdge::new(ComponentId::product(2), Decimal::from(2)));
        let sub = BomNode::new(ComponentId::product(2), Decimal::ONE, date(2026, 1, 1))
            .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(3)));
        BomGraph::build(vec![top, sub], date(2026, 6, 1)).unwrap()
    }

    fn explode_demand(graph: &BomGraph, quantity: i64) -> RequirementAccumulator {
        ExplosionEngine::new(graph).explode_root(
            ComponentId::product(1),
            Decimal::from(quantity),
            order_origin(),
        )
    }

    #[test]
    fn test_cascade_proposals_with_zero_stock() {
        let graph = cascade_graph();
        let mut accumulator = explode_demand(&graph, 4);
        let snapshot = InventorySnapshot::new();

        let planner = ShortagePlanner::new(&graph, 32);
        let outcome = planner.plan(&mut accumulator, &snapshot);

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.proposals.len(), 2);

        let top = &outcome.proposals[1];
        assert_eq!(top.component, ComponentId::product(2));
        assert!(top.quantity >= Decimal::from(8));

        // 原物料缺口 4 × 2 × 3 = 24，不可生產故無提案
        assert_eq!(outcome.netting.net_of(&ComponentId::material(1)), Decimal::from(24));
    }

    #[test]
    fn test_batch_rounding_excess_feeds_children() {
        // 批量 10、淨需求 8 → 1 批；超額 2 回饋至子件
        let graph = {
            let node = BomNode::new(ComponentId::product(1), Decimal::from(10), date(2026, 1, 1))
                .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(10)));
            BomGraph::build(vec![node], date(2026, 6, 1)).unwrap()
        };
        let mut accumulator = ExplosionEngine::new(&graph).explode_root(
            ComponentId::product(1),
            Decimal::from(8),
            order_origin(),
        );
        let snapshot = InventorySnapshot::new();

        let planner = ShortagePlanner::new(&graph, 32);
        let outcome = planner.plan(&mut accumulator, &snapshot);

        assert!(outcome.errors.is_empty());
        let proposal = &outcome.proposals[0];
        assert_eq!(proposal.batches, Decimal::ONE);
        assert_eq!(proposal.quantity, Decimal::from(10));
        // 淨需求收斂至提案生產量
        assert_eq!(proposal.triggering_requirement, Decimal::from(10));

        // 子件需求反映整批生產：10 單位 × 每批用量 10 / 批量 10
        assert_eq!(accumulator.gross_of(&ComponentId::material(1)), Decimal::from(10));
    }

    #[test]
    fn test_available_stock_suppresses_proposal() {
        let graph = cascade_graph();
        let mut accumulator = explode_demand(&graph, 4);
        let snapshot = InventorySnapshot::from_positions(&[
            InventoryPosition::new(ComponentId::product(1), Decimal::from(10), Decimal::ZERO),
            InventoryPosition::new(ComponentId::product(2), Decimal::from(10), Decimal::ZERO),
            InventoryPosition::new(ComponentId::material(1), Decimal::from(100), Decimal::ZERO),
        ]);

        let planner = ShortagePlanner::new(&graph, 32);
        let outcome = planner.plan(&mut accumulator, &snapshot);

        // 庫存足以涵蓋全部毛需求，無提案
        assert!(outcome.proposals.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_iteration_limit_reports_did_not_converge() {
        // 首輪即需回饋，迭代上限 1 不足以確認固定點
        let graph = {
            let node = BomNode::new(ComponentId::product(1), Decimal::from(10), date(2026, 1, 1))
                .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(10)));
            BomGraph::build(vec![node], date(2026, 6, 1)).unwrap()
        };
        let mut accumulator = ExplosionEngine::new(&graph).explode_root(
            ComponentId::product(1),
            Decimal::from(8),
            order_origin(),
        );
        let snapshot = InventorySnapshot::new();

        let planner = ShortagePlanner::new(&graph, 1);
        let outcome = planner.plan(&mut accumulator, &snapshot);

        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            PlanningError::DidNotConverge { iterations: 1 }
        ));
        // 部分結果仍然保留
        assert_eq!(outcome.proposals.len(), 1);
    }

    #[test]
    fn test_exact_batch_fit_needs_no_feedback() {
        let graph = {
            let node = BomNode::new(ComponentId::product(1), Decimal::from(10), date(2026, 1, 1))
                .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(10)));
            BomGraph::build(vec![node], date(2026, 6, 1)).unwrap()
        };
        let mut accumulator = ExplosionEngine::new(&graph).explode_root(
            ComponentId::product(1),
            Decimal::from(30),
            order_origin(),
        );
        let snapshot = InventorySnapshot::new();

        let planner = ShortagePlanner::new(&graph, 1);
        let outcome = planner.plan(&mut accumulator, &snapshot);

        // 30 恰為 3 批，無超額回饋，單輪即收斂
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.proposals[0].batches, Decimal::from(3));
    }
}
