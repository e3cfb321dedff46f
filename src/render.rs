use analytics::ReportRow;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// Builds the terminal table for the report, one row per seller in rank order.
pub fn report_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "Seller", "Name", "Revenue", "Profit", "Sales", "Bonus", "Top products",
        ]);

    for (rank, row) in rows.iter().enumerate() {
        let top_products = row
            .top_products
            .iter()
            .map(|p| format!("{} ({})", p.sku, p.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.seller_id),
            Cell::new(&row.name),
            Cell::new(row.revenue).set_alignment(CellAlignment::Right),
            Cell::new(row.profit).set_alignment(CellAlignment::Right),
            Cell::new(row.sales_count).set_alignment(CellAlignment::Right),
            Cell::new(row.bonus).set_alignment(CellAlignment::Right),
            Cell::new(top_products),
        ]);
    }

    table
}

pub fn report_json(rows: &[ReportRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
