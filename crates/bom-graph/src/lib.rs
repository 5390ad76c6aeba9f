//! # BOM Graph
//!
//! 以有向圖（產品 → 子件）表示全部生效 BOM，供展開引擎查詢。
//! 每次計算建圖一次，建圖後唯讀。

use std::collections::HashMap;

use chrono::NaiveDate;

use bom_core::{BomError, BomNode, ComponentId};

/// BOM 圖（arena + 索引）
///
/// 節點存放於 arena，擁有者索引指向 arena 位置；原物料永遠不擁有
/// 節點，查詢不到即為葉節點。
#[derive(Debug, Clone, Default)]
pub struct BomGraph {
    nodes: Vec<BomNode>,
    index: HashMap<ComponentId, usize>,
}

impl BomGraph {
    /// 創建空圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 BOM 節點集合建圖
    ///
    /// 僅收錄在 `as_of` 生效的節點。建圖快速失敗：任一啟用節點驗證
    /// 不過，或同一產品有生效日期區間重疊的啟用 BOM，即整體失敗，
    /// 不產生部分圖。
    pub fn build(nodes: Vec<BomNode>, as_of: NaiveDate) -> bom_core::Result<Self> {
        let active: Vec<&BomNode> = nodes.iter().filter(|node| node.is_active).collect();

        for node in &active {
            node.validate()?;
        }

        // 同一產品的啟用 BOM 生效區間不可重疊
        let mut by_owner: HashMap<ComponentId, Vec<&BomNode>> = HashMap::new();
        for node in &active {
            by_owner.entry(node.owner).or_default().push(node);
        }
        for (owner, owned) in &by_owner {
            for (i, first) in owned.iter().enumerate() {
                for second in owned.iter().skip(i + 1) {
                    if ranges_overlap(first, second) {
                        return Err(BomError::DuplicateActiveBom {
                            owner: *owner,
                            first: first.bom_id,
                            second: second.bom_id,
                        });
                    }
                }
            }
        }

        let mut graph = Self::new();
        for node in nodes {
            if !node.is_active_on(as_of) {
                continue;
            }
            graph.index.insert(node.owner, graph.nodes.len());
            graph.nodes.push(node);
        }

        Ok(graph)
    }

    /// 查詢產品的生效 BOM；原物料與無 BOM 產品回傳 None
    pub fn lookup(&self, component: &ComponentId) -> Option<&BomNode> {
        self.index.get(component).map(|&idx| &self.nodes[idx])
    }

    /// 檢查元件是否可生產（擁有生效 BOM）
    pub fn is_producible(&self, component: &ComponentId) -> bool {
        self.index.contains_key(component)
    }

    /// 任一引用該元件的 BOM 明細標記為關鍵件即視為關鍵
    pub fn is_critical(&self, component: &ComponentId) -> bool {
        self.nodes.iter().any(|node| {
            node.items
                .iter()
                .any(|edge| edge.component == *component && edge.is_critical)
        })
    }

    /// 解析元件的計量單位
    ///
    /// 自有 BOM 的批量單位優先，其次為收錄順序中首個引用明細的
    /// 單位，皆無則為 "EA"。
    pub fn uom_of(&self, component: &ComponentId) -> String {
        if let Some(node) = self.lookup(component) {
            return node.batch_uom.clone();
        }
        for node in &self.nodes {
            for edge in &node.items {
                if edge.component == *component {
                    return edge.uom.clone();
                }
            }
        }
        "EA".to_string()
    }

    /// 節點數量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 遍歷全部收錄節點
    pub fn nodes(&self) -> impl Iterator<Item = &BomNode> {
        self.nodes.iter()
    }
}

/// 生效日期區間重疊檢查（半開區間 [effective, expiry)）
fn ranges_overlap(first: &BomNode, second: &BomNode) -> bool {
    let first_open_at_second_start = first
        .expiry_date
        .map_or(true, |expiry| second.effective_date < expiry);
    let second_open_at_first_start = second
        .expiry_date
        .map_or(true, |expiry| first.effective_date < expiry);
    first_open_at_second_start && second_open_at_first_start
}
