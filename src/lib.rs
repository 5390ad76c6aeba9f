//! # MRP Engine
//!
//! 物料需求計劃引擎：彙總訂單與預測需求、多層展開 BOM、
//! 對庫存快照淨算，並對缺口提出生產批次提案。
//!
//! 引擎是對明確傳入快照的純計算；所有持久化與 I/O 由外部
//! 協作者在邊界完成。

// Re-export 主要類型
pub use bom_core::{BomEdge, BomError, BomNode, ComponentId};
pub use bom_graph::BomGraph;
pub use mrp_calc::{
    DemandAggregator, ExplosionEngine, MrpCalculator, NettingCalculator, PlanningInputs,
    ReportBuilder, ShortagePlanner,
};
pub use mrp_core::{
    CalculationPeriod, CancellationToken, DemandEntry, DemandSource, DemandTrace, Forecast,
    ForecastStatus, InventoryPosition, InventorySnapshot, MrpError, MrpWarning, OrderStatus,
    PlanningConfig, PlanningError, ProductionProposal, RequirementLine, RequirementReport,
    Result, SalesOrder, SalesOrderLine, TraceOrigin, WarningSeverity,
};
