//! 腳踏車多層 BOM 需求計算示例
//!
//! 結構：
//!   腳踏車 P:1
//!     ├── 1 × 車架 P:2
//!     │     └── 3 × 鋼管 M:1（損耗 5%）
//!     └── 2 × 輪組 M:2

use chrono::NaiveDate;
use mrp_engine::{
    BomEdge, BomGraph, BomNode, ComponentId, Forecast, MrpCalculator, OrderStatus,
    PlanningConfig, PlanningInputs, SalesOrder, SalesOrderLine,
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== 腳踏車需求計算示例 ===\n");

    let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

    let bike = BomNode::new(ComponentId::product(1), Decimal::ONE, today)
        .with_item(BomEdge::new(ComponentId::product(2), Decimal::ONE))
        .with_item(BomEdge::new(ComponentId::material(2), Decimal::from(2)).as_critical());
    let frame = BomNode::new(ComponentId::product(2), Decimal::ONE, today).with_item(
        BomEdge::new(ComponentId::material(1), Decimal::from(3))
            .with_scrap_percent(Decimal::from(5)),
    );
    let graph = BomGraph::build(vec![bike, frame], today)?;

    // 已確認訂單 50 台 + 當月預測 90 台
    let order = SalesOrder::new(
        1,
        OrderStatus::Confirmed,
        today,
        today + chrono::Duration::days(30),
    )
    .with_line(SalesOrderLine::new(1, ComponentId::product(1), Decimal::from(50)));

    let forecast = Forecast::new(
        1,
        ComponentId::product(1),
        Decimal::from(90),
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
    );

    let calculator = MrpCalculator::new(graph, PlanningConfig::new(30));
    let inputs = PlanningInputs::new(today)
        .with_orders(vec![order])
        .with_forecasts(vec![forecast]);

    let report = calculator.calculate(&inputs)?;

    println!(
        "計算期間: {} ~ {}\n",
        report.calculation_period.start, report.calculation_period.end
    );

    println!("需求明細（關鍵件優先）:");
    for line in &report.lines {
        println!(
            "  - 元件: {}{}, 毛需求: {}, 淨需求: {}",
            line.component,
            if line.is_critical { "（關鍵件）" } else { "" },
            line.gross_quantity,
            line.net_quantity
        );
    }

    println!("\n生產提案:");
    for proposal in &report.proposals {
        println!(
            "  - 元件: {}, {} 批 × {} = {}（觸發淨需求 {}）",
            proposal.component,
            proposal.batches,
            proposal.batch_size,
            proposal.quantity,
            proposal.triggering_requirement
        );
    }

    for warning in &report.warnings {
        println!("\n警告: {}", warning.message);
    }

    Ok(())
}
