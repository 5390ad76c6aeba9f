//! 需求報告組裝

use bom_graph::BomGraph;
use mrp_core::{
    CalculationPeriod, MrpWarning, PlanningError, ProductionProposal, RequirementLine,
    RequirementReport,
};

use crate::explosion::RequirementAccumulator;
use crate::netting::NettingOutcome;

/// 需求報告建構器
pub struct ReportBuilder;

impl ReportBuilder {
    /// 將累計器與淨算結果攤平為需求報告
    ///
    /// 每個元件一行，計量單位與關鍵件標記由 BOM 圖解析；
    /// 呈現排序：關鍵件優先，淨需求由大到小，再依元件。
    pub fn build(
        graph: &BomGraph,
        mut accumulator: RequirementAccumulator,
        netting: &NettingOutcome,
        proposals: Vec<ProductionProposal>,
        calculation_period: CalculationPeriod,
        warnings: Vec<MrpWarning>,
        mut planning_errors: Vec<PlanningError>,
    ) -> RequirementReport {
        let mut components: Vec<_> = accumulator.gross.keys().copied().collect();
        components.sort();

        let mut lines: Vec<RequirementLine> = Vec::with_capacity(components.len());
        for component in components {
            let provenance = accumulator.traces.remove(&component).unwrap_or_default();
            lines.push(RequirementLine {
                component,
                gross_quantity: accumulator.gross[&component],
                net_quantity: netting.net_of(&component),
                uom: graph.uom_of(&component),
                is_critical: graph.is_critical(&component),
                provenance,
            });
        }

        lines.sort_by(|first, second| {
            second
                .is_critical
                .cmp(&first.is_critical)
                .then(second.net_quantity.cmp(&first.net_quantity))
                .then(first.component.cmp(&second.component))
        });

        let mut errors = std::mem::take(&mut accumulator.cycles);
        errors.append(&mut planning_errors);

        RequirementReport {
            lines,
            proposals,
            calculation_period,
            warnings,
            errors,
            calculation_time_ms: None,
        }
    }
}
