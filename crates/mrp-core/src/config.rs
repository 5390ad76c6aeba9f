//! 計劃參數配置

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MrpError;

/// MRP 計劃參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 計劃時界（天，必須大於 0）
    pub horizon_days: u32,

    /// 是否納入銷售預測
    pub include_forecasts: bool,

    /// 缺口回饋迭代上限（防止病態 BOM 資料造成無限迴圈）
    pub max_planning_iterations: u32,
}

impl PlanningConfig {
    /// 創建新的計劃參數
    pub fn new(horizon_days: u32) -> Self {
        Self {
            horizon_days,
            include_forecasts: true,
            max_planning_iterations: 32,
        }
    }

    /// 建構器模式：設置是否納入預測
    pub fn with_include_forecasts(mut self, include: bool) -> Self {
        self.include_forecasts = include;
        self
    }

    /// 建構器模式：設置迭代上限
    pub fn with_max_planning_iterations(mut self, limit: u32) -> Self {
        self.max_planning_iterations = limit;
        self
    }

    /// 驗證參數
    pub fn validate(&self) -> crate::Result<()> {
        if self.horizon_days == 0 {
            return Err(MrpError::InvalidHorizon(self.horizon_days));
        }
        if self.max_planning_iterations == 0 {
            return Err(MrpError::InvalidIterationLimit);
        }
        Ok(())
    }

    /// 時界結束日
    pub fn horizon_end(&self, today: NaiveDate) -> NaiveDate {
        today + chrono::Duration::days(i64::from(self.horizon_days))
    }
}
