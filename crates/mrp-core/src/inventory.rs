//! 庫存快照模型

use std::collections::HashMap;

use bom_core::ComponentId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存部位（單一元件於單一倉庫）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPosition {
    /// 元件
    pub component: ComponentId,

    /// 現有庫存
    pub on_hand: Decimal,

    /// 已保留數量（鎖定）
    pub reserved: Decimal,

    /// 倉庫
    pub warehouse_id: Option<String>,
}

impl InventoryPosition {
    /// 創建新的庫存部位
    pub fn new(component: ComponentId, on_hand: Decimal, reserved: Decimal) -> Self {
        Self {
            component,
            on_hand,
            reserved,
            warehouse_id: None,
        }
    }

    /// 建構器模式：設置倉庫
    pub fn with_warehouse_id(mut self, warehouse_id: String) -> Self {
        self.warehouse_id = Some(warehouse_id);
        self
    }

    /// 可用庫存（現有 - 已保留，不為負）
    pub fn available(&self) -> Decimal {
        (self.on_hand - self.reserved).max(Decimal::ZERO)
    }
}

/// 庫存快照
///
/// 計算開始時一次讀取，整次計算凍結；引擎不會在遍歷途中
/// 讀取另一份快照。
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    positions: HashMap<ComponentId, AggregatedPosition>,
}

#[derive(Debug, Clone, Copy, Default)]
struct AggregatedPosition {
    on_hand: Decimal,
    reserved: Decimal,
}

impl InventorySnapshot {
    /// 創建空快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 由庫存部位建立快照（同一元件的多倉部位加總）
    pub fn from_positions(positions: &[InventoryPosition]) -> Self {
        let mut snapshot = Self::new();
        for position in positions {
            let entry = snapshot
                .positions
                .entry(position.component)
                .or_default();
            entry.on_hand += position.on_hand;
            entry.reserved += position.reserved;
        }
        snapshot
    }

    /// 查詢元件的可用庫存；快照中不存在即回傳 None
    pub fn available(&self, component: &ComponentId) -> Option<Decimal> {
        self.positions
            .get(component)
            .map(|position| (position.on_hand - position.reserved).max(Decimal::ZERO))
    }

    /// 快照中的元件數量
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// 檢查快照是否為空
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_clamps_at_zero() {
        let position =
            InventoryPosition::new(ComponentId::material(1), Decimal::from(10), Decimal::from(30));

        assert_eq!(position.available(), Decimal::ZERO);
    }

    #[test]
    fn test_available_subtracts_reservation() {
        let position =
            InventoryPosition::new(ComponentId::material(1), Decimal::from(100), Decimal::from(30));

        assert_eq!(position.available(), Decimal::from(70));
    }

    #[test]
    fn test_snapshot_merges_warehouses() {
        let snapshot = InventorySnapshot::from_positions(&[
            InventoryPosition::new(ComponentId::material(1), Decimal::from(40), Decimal::from(10))
                .with_warehouse_id("WH-A".to_string()),
            InventoryPosition::new(ComponentId::material(1), Decimal::from(20), Decimal::from(5))
                .with_warehouse_id("WH-B".to_string()),
        ]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.available(&ComponentId::material(1)),
            Some(Decimal::from(45))
        );
    }

    #[test]
    fn test_snapshot_missing_component_is_none() {
        let snapshot = InventorySnapshot::new();

        assert!(snapshot.available(&ComponentId::material(1)).is_none());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_distinguishes_component_kinds() {
        // 原物料 5 與產品 5 的庫存互不混淆
        let snapshot = InventorySnapshot::from_positions(&[
            InventoryPosition::new(ComponentId::material(5), Decimal::from(10), Decimal::ZERO),
        ]);

        assert_eq!(
            snapshot.available(&ComponentId::material(5)),
            Some(Decimal::from(10))
        );
        assert!(snapshot.available(&ComponentId::product(5)).is_none());
    }
}
