//! 需求報告模型（MRP 計算結果）

use bom_core::ComponentId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::demand::DemandSource;

/// 需求追溯來源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceOrigin {
    /// 來自訂單或預測的獨立需求
    Demand(DemandSource),

    /// 來自生產提案的回饋需求
    Production { component: ComponentId },
}

/// 需求追溯記錄（來源 + 完整 BOM 路徑）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandTrace {
    /// 追溯來源
    pub origin: TraceOrigin,

    /// 自頂層需求至該元件的 BOM 路徑
    pub path: Vec<ComponentId>,

    /// 追溯數量
    pub quantity: Decimal,
}

impl DemandTrace {
    /// 追溯深度（層級）
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// 需求明細行（每個元件每次計算一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementLine {
    /// 元件
    pub component: ComponentId,

    /// 毛需求
    pub gross_quantity: Decimal,

    /// 淨需求 = max(0, 毛需求 - 可用庫存)
    pub net_quantity: Decimal,

    /// 計量單位
    pub uom: String,

    /// 關鍵件標記（任一引用 BOM 明細標記為關鍵件）
    pub is_critical: bool,

    /// 需求追溯
    pub provenance: Vec<DemandTrace>,
}

/// 生產提案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionProposal {
    /// 提案ID
    pub id: Uuid,

    /// 生產元件（必須擁有生效 BOM）
    pub component: ComponentId,

    /// 依據的 BOM
    pub bom_id: Uuid,

    /// 批次數 = ceil(淨需求 / 批量)
    pub batches: Decimal,

    /// 生產批量
    pub batch_size: Decimal,

    /// 提案生產量 = 批次數 × 批量
    pub quantity: Decimal,

    /// 觸發提案的淨需求
    pub triggering_requirement: Decimal,
}

impl ProductionProposal {
    /// 創建新的生產提案
    pub fn new(
        component: ComponentId,
        bom_id: Uuid,
        batches: Decimal,
        batch_size: Decimal,
        triggering_requirement: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            component,
            bom_id,
            batches,
            batch_size,
            quantity: batches * batch_size,
            triggering_requirement,
        }
    }
}

/// 計算期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationPeriod {
    /// 起日
    pub start: NaiveDate,

    /// 迄日
    pub end: NaiveDate,
}

/// 計劃層級的可恢復錯誤
///
/// 不中止整次計算；累積於報告中供呼叫端檢視。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanningError {
    /// BOM 路徑出現循環，該分支停止展開
    CycleDetected {
        component: ComponentId,
        path: Vec<ComponentId>,
    },

    /// 缺口回饋迭代未收斂，回傳部分結果
    DidNotConverge { iterations: u32 },
}

/// 警告嚴重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 資料品質警告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrpWarning {
    /// 相關元件
    pub component: Option<ComponentId>,

    /// 警告內容
    pub message: String,

    /// 嚴重度
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(component: Option<ComponentId>, message: String, severity: WarningSeverity) -> Self {
        Self {
            component,
            message,
            severity,
        }
    }

    pub fn info(component: ComponentId, message: String) -> Self {
        Self::new(Some(component), message, WarningSeverity::Info)
    }

    pub fn warning(component: ComponentId, message: String) -> Self {
        Self::new(Some(component), message, WarningSeverity::Warning)
    }
}

/// 需求報告（單次計算的完整結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementReport {
    /// 需求明細行
    pub lines: Vec<RequirementLine>,

    /// 生產提案
    pub proposals: Vec<ProductionProposal>,

    /// 計算期間
    pub calculation_period: CalculationPeriod,

    /// 資料品質警告
    pub warnings: Vec<MrpWarning>,

    /// 可恢復錯誤（循環、未收斂）
    pub errors: Vec<PlanningError>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl RequirementReport {
    /// 創建空報告
    pub fn empty(calculation_period: CalculationPeriod) -> Self {
        Self {
            lines: Vec::new(),
            proposals: Vec::new(),
            calculation_period,
            warnings: Vec::new(),
            errors: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 查詢指定元件的需求明細行
    pub fn line(&self, component: &ComponentId) -> Option<&RequirementLine> {
        self.lines.iter().find(|line| line.component == *component)
    }

    /// 查詢指定元件的生產提案
    pub fn proposal(&self, component: &ComponentId) -> Option<&ProductionProposal> {
        self.proposals
            .iter()
            .find(|proposal| proposal.component == *component)
    }

    /// 檢查是否有可恢復錯誤
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }
}
