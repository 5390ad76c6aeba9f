//! BOM 展開引擎
//!
//! 以顯式堆疊（非語言遞迴）遍歷 BOM 圖，自頂層需求多層累計毛需求，
//! 並以祖先鏈偵測循環。同一子裝配被多個分支重複使用屬正常情形，
//! 各分支的用量必須分別累計。

use std::collections::HashMap;

use bom_core::ComponentId;
use bom_graph::BomGraph;
use mrp_core::{
    CancellationToken, DemandEntry, DemandTrace, MrpError, PlanningError, Result, TraceOrigin,
};
use rayon::prelude::*;
use rust_decimal::Decimal;

/// 毛需求累計器（單次計算的累計狀態）
#[derive(Debug, Clone, Default)]
pub struct RequirementAccumulator {
    /// 每元件毛需求
    pub gross: HashMap<ComponentId, Decimal>,

    /// 每元件需求追溯
    pub traces: HashMap<ComponentId, Vec<DemandTrace>>,

    /// 展開期間偵測到的循環
    pub cycles: Vec<PlanningError>,
}

impl RequirementAccumulator {
    /// 創建空累計器
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢元件的毛需求
    pub fn gross_of(&self, component: &ComponentId) -> Decimal {
        self.gross.get(component).copied().unwrap_or(Decimal::ZERO)
    }

    /// 合併部分結果
    ///
    /// 毛需求逐元件加總；追溯與循環按合併順序附加，呼叫端以頂層
    /// 需求順序合併以維持決定性輸出。
    pub fn merge(&mut self, other: RequirementAccumulator) {
        for (component, quantity) in other.gross {
            *self.gross.entry(component).or_insert(Decimal::ZERO) += quantity;
        }
        for (component, mut traces) in other.traces {
            self.traces.entry(component).or_default().append(&mut traces);
        }
        self.cycles.extend(other.cycles);
    }
}

/// 展開堆疊框架
struct Frame {
    component: ComponentId,
    quantity: Decimal,
    /// 自根需求至父元件的祖先鏈
    path: Vec<ComponentId>,
}

/// BOM 展開引擎
pub struct ExplosionEngine<'a> {
    graph: &'a BomGraph,
}

impl<'a> ExplosionEngine<'a> {
    /// 創建新的展開引擎
    pub fn new(graph: &'a BomGraph) -> Self {
        Self { graph }
    }

    /// 展開全部頂層需求
    ///
    /// 各根需求獨立展開（rayon 平行），部分結果按原始需求順序合併。
    /// 取消權杖僅在根需求之間檢查；已取消即回傳 `MrpError::Cancelled`。
    pub fn explode_all(
        &self,
        demands: &[DemandEntry],
        token: &CancellationToken,
    ) -> Result<RequirementAccumulator> {
        let partials: Vec<Option<RequirementAccumulator>> = demands
            .par_iter()
            .map(|demand| {
                if token.is_cancelled() {
                    return None;
                }
                Some(self.explode_root(
                    demand.component_ref,
                    demand.quantity,
                    TraceOrigin::Demand(demand.source),
                ))
            })
            .collect();

        if token.is_cancelled() {
            return Err(MrpError::Cancelled);
        }

        let mut accumulator = RequirementAccumulator::new();
        for partial in partials.into_iter().flatten() {
            accumulator.merge(partial);
        }
        Ok(accumulator)
    }

    /// 展開單一根需求為獨立的部分累計器
    pub fn explode_root(
        &self,
        component: ComponentId,
        quantity: Decimal,
        origin: TraceOrigin,
    ) -> RequirementAccumulator {
        let mut accumulator = RequirementAccumulator::new();
        self.explode_into(&mut accumulator, component, quantity, origin);
        accumulator
    }

    /// 展開單一根需求並累計至既有累計器（缺口回饋亦由此進入）
    pub fn explode_into(
        &self,
        accumulator: &mut RequirementAccumulator,
        root: ComponentId,
        quantity: Decimal,
        origin: TraceOrigin,
    ) {
        let mut stack = vec![Frame {
            component: root,
            quantity,
            path: Vec::new(),
        }];

        while let Some(Frame {
            component,
            quantity,
            path,
        }) = stack.pop()
        {
            // 循環偵測：元件出現在自身祖先鏈上，僅放棄該分支
            if path.contains(&component) {
                let mut cycle_path = path;
                cycle_path.push(component);
                accumulator.cycles.push(PlanningError::CycleDetected {
                    component,
                    path: cycle_path,
                });
                continue;
            }

            *accumulator
                .gross
                .entry(component)
                .or_insert(Decimal::ZERO) += quantity;

            let mut full_path = path;
            full_path.push(component);
            accumulator
                .traces
                .entry(component)
                .or_default()
                .push(DemandTrace {
                    origin: origin.clone(),
                    path: full_path.clone(),
                    quantity,
                });

            // 子裝配在同一趟遍歷中繼續向下展開；
            // 原物料與無 BOM 產品為葉節點
            if let Some(node) = self.graph.lookup(&component) {
                for edge in node.items.iter().rev() {
                    stack.push(Frame {
                        component: edge.component,
                        quantity: quantity * edge.effective_quantity() / node.batch_size,
                        path: full_path.clone(),
                    });
                }
            }
        }
    }
}
