//! BOM 節點與明細模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BomError, ComponentId};

/// BOM 明細（單一子件的用量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEdge {
    /// 子件（原物料或產品）
    pub component: ComponentId,

    /// 每批用量
    pub quantity: Decimal,

    /// 損耗率（百分比，[0, 100)）
    pub scrap_percent: Decimal,

    /// 計量單位
    pub uom: String,

    /// 關鍵件標記
    pub is_critical: bool,
}

impl BomEdge {
    /// 創建新的 BOM 明細
    pub fn new(component: ComponentId, quantity: Decimal) -> Self {
        Self {
            component,
            quantity,
            scrap_percent: Decimal::ZERO,
            uom: "EA".to_string(),
            is_critical: false,
        }
    }

    /// 建構器模式：設置損耗率
    pub fn with_scrap_percent(mut self, scrap_percent: Decimal) -> Self {
        self.scrap_percent = scrap_percent;
        self
    }

    /// 建構器模式：設置計量單位
    pub fn with_uom(mut self, uom: String) -> Self {
        self.uom = uom;
        self
    }

    /// 建構器模式：標記為關鍵件
    pub fn as_critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// 含損耗的有效用量 = quantity * (1 + scrap_percent / 100)
    pub fn effective_quantity(&self) -> Decimal {
        self.quantity * (Decimal::ONE_HUNDRED + self.scrap_percent) / Decimal::ONE_HUNDRED
    }

    fn validate(&self, bom_id: Uuid) -> crate::Result<()> {
        if self.quantity < Decimal::ZERO {
            return Err(BomError::NegativeQuantity {
                bom_id,
                component: self.component,
                quantity: self.quantity,
            });
        }
        if self.scrap_percent < Decimal::ZERO || self.scrap_percent >= Decimal::ONE_HUNDRED {
            return Err(BomError::InvalidScrapPercent {
                bom_id,
                component: self.component,
                scrap_percent: self.scrap_percent,
            });
        }
        Ok(())
    }
}

/// BOM 節點（單一產品的配方）
///
/// 同一產品同一時點僅允許一份生效 BOM；引擎只消費
/// `is_active = true` 且生效日期涵蓋計算基準日的節點。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomNode {
    /// BOM ID
    pub bom_id: Uuid,

    /// 擁有者（必須為產品）
    pub owner: ComponentId,

    /// 生產批量
    pub batch_size: Decimal,

    /// 批量計量單位
    pub batch_uom: String,

    /// 是否啟用
    pub is_active: bool,

    /// 生效日期
    pub effective_date: NaiveDate,

    /// 失效日期（不含當日；None 表示無限期）
    pub expiry_date: Option<NaiveDate>,

    /// 明細清單
    pub items: Vec<BomEdge>,
}

impl BomNode {
    /// 創建新的 BOM 節點
    pub fn new(
        owner: ComponentId,
        batch_size: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            bom_id: Uuid::new_v4(),
            owner,
            batch_size,
            batch_uom: "EA".to_string(),
            is_active: true,
            effective_date,
            expiry_date: None,
            items: Vec::new(),
        }
    }

    /// 建構器模式：設置批量計量單位
    pub fn with_batch_uom(mut self, batch_uom: String) -> Self {
        self.batch_uom = batch_uom;
        self
    }

    /// 建構器模式：設置失效日期
    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// 建構器模式：設為停用
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 建構器模式：添加明細
    pub fn with_item(mut self, item: BomEdge) -> Self {
        self.items.push(item);
        self
    }

    /// 添加明細
    pub fn add_item(&mut self, item: BomEdge) {
        self.items.push(item);
    }

    /// 檢查在指定日期是否生效
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.effective_date <= date
            && self.expiry_date.map_or(true, |expiry| date < expiry)
    }

    /// 驗證節點資料完整性
    pub fn validate(&self) -> crate::Result<()> {
        if self.owner.is_material() {
            return Err(BomError::MaterialOwner {
                bom_id: self.bom_id,
                owner: self.owner,
            });
        }
        if self.batch_size <= Decimal::ZERO {
            return Err(BomError::InvalidBatchSize {
                bom_id: self.bom_id,
                batch_size: self.batch_size,
            });
        }
        for item in &self.items {
            item.validate(self.bom_id)?;
        }
        Ok(())
    }
}
