//! 淨需求計算

use std::collections::HashMap;

use bom_core::ComponentId;
use mrp_core::{InventorySnapshot, MrpWarning};
use rust_decimal::Decimal;

/// 淨算結果
#[derive(Debug, Clone, Default)]
pub struct NettingOutcome {
    /// 每元件淨需求
    pub net: HashMap<ComponentId, Decimal>,

    /// 資料品質警告（缺少庫存部位）
    pub warnings: Vec<MrpWarning>,
}

impl NettingOutcome {
    /// 查詢元件的淨需求
    pub fn net_of(&self, component: &ComponentId) -> Decimal {
        self.net.get(component).copied().unwrap_or(Decimal::ZERO)
    }
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 以凍結快照逐元件淨算：net = max(0, gross - available)
    ///
    /// 快照中不存在的元件以可用庫存 0 計並記錄警告——在計劃情境下
    /// 低估庫存比高估安全。
    pub fn calculate(
        gross: &HashMap<ComponentId, Decimal>,
        snapshot: &InventorySnapshot,
    ) -> NettingOutcome {
        let mut outcome = NettingOutcome::default();

        // 決定性順序，警告輸出穩定
        let mut components: Vec<ComponentId> = gross.keys().copied().collect();
        components.sort();

        for component in components {
            let gross_quantity = gross[&component];
            let available = match snapshot.available(&component) {
                Some(quantity) => quantity,
                None => {
                    outcome.warnings.push(MrpWarning::warning(
                        component,
                        format!("元件 {} 缺少庫存快照部位，以可用庫存 0 計", component),
                    ));
                    Decimal::ZERO
                }
            };

            outcome
                .net
                .insert(component, (gross_quantity - available).max(Decimal::ZERO));
        }

        outcome
    }
}
