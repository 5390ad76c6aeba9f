//! 簡單需求計算示例

use chrono::NaiveDate;
use mrp_engine::{
    BomEdge, BomGraph, BomNode, ComponentId, InventoryPosition, MrpCalculator, OrderStatus,
    PlanningConfig, PlanningInputs, SalesOrder, SalesOrderLine,
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== 簡單需求計算示例 ===\n");

    let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

    // 單層 BOM：產品 P:1 每批（批量 1）使用 2 個原物料 M:1
    let bom = BomNode::new(ComponentId::product(1), Decimal::ONE, today)
        .with_item(BomEdge::new(ComponentId::material(1), Decimal::from(2)));
    let graph = BomGraph::build(vec![bom], today)?;

    // 需求：已確認訂單 100 個 P:1
    let order = SalesOrder::new(
        1,
        OrderStatus::Confirmed,
        today,
        today + chrono::Duration::days(20),
    )
    .with_line(SalesOrderLine::new(1, ComponentId::product(1), Decimal::from(100)));

    // 庫存：30 個成品、50 個原物料
    let inventory = vec![
        InventoryPosition::new(ComponentId::product(1), Decimal::from(30), Decimal::ZERO),
        InventoryPosition::new(ComponentId::material(1), Decimal::from(50), Decimal::ZERO),
    ];

    let calculator = MrpCalculator::new(graph, PlanningConfig::new(30));
    let inputs = PlanningInputs::new(today)
        .with_orders(vec![order])
        .with_inventory(inventory);

    let report = calculator.calculate(&inputs)?;

    println!("需求明細:");
    for line in &report.lines {
        println!(
            "  - 元件: {}, 毛需求: {}, 淨需求: {} {}",
            line.component, line.gross_quantity, line.net_quantity, line.uom
        );
    }

    println!("\n生產提案:");
    for proposal in &report.proposals {
        println!(
            "  - 元件: {}, {} 批 × {} = {}",
            proposal.component, proposal.batches, proposal.batch_size, proposal.quantity
        );
    }

    Ok(())
}
