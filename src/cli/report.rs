use super::ui;
use crate::core::analytics::{self, SkuSales};
use crate::core::{
    ConversionEdge, ConversionGraph, SalesQuery, SharedConversionGraph, TransactionRecord,
};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub struct SalesReport {
    pub currency: String,
    pub rows: Vec<SkuSales>,
    /// Rates inferred while the report ran, in the order they were memoized.
    pub inferred: Vec<ConversionEdge>,
}

impl SalesReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("SKU"),
            ui::header_cell("Sales"),
            ui::header_cell(&format!("Total ({})", self.currency)),
            ui::header_cell("Error"),
        ]);

        for row in &self.rows {
            let has_error = row.error.is_some();
            table.add_row(vec![
                Cell::new(&row.sku),
                ui::number_cell(row.transactions),
                ui::optional_number_cell(row.formatted_total(), has_error),
                Cell::new(
                    row.error
                        .as_deref()
                        .map(|e| ui::style_text(e, ui::StyleType::Error))
                        .unwrap_or_default(),
                ),
            ]);
        }

        let mut output = format!(
            "Sales Report: {}\n\n",
            ui::style_text(&self.currency, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        if self.inferred.is_empty() {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text("No rates were inferred.", ui::StyleType::Subtle)
            ));
        } else {
            let mut rates = ui::new_styled_table();
            rates.set_header(vec![
                ui::header_cell("From"),
                ui::header_cell("To"),
                ui::header_cell("Inferred Rate"),
            ]);
            for edge in &self.inferred {
                rates.add_row(vec![
                    Cell::new(edge.from()),
                    Cell::new(edge.to()),
                    ui::number_cell(edge.rate().normalize()),
                ]);
            }
            output.push_str(&format!(
                "\n\n{}\n\n{}",
                ui::style_text("Inferred Rates", ui::StyleType::TotalLabel),
                rates
            ));
        }

        output
    }
}

/// Totals every SKU concurrently against one shared graph.
pub async fn build_report(
    transactions: &[TransactionRecord],
    graph: ConversionGraph,
    skus: &[String],
    currency: &str,
) -> SalesReport {
    let loaded = graph.len();
    let shared = SharedConversionGraph::new(graph);
    let queries: Vec<SalesQuery> = skus
        .iter()
        .map(|sku| SalesQuery::new(sku, currency))
        .collect();

    let pb = ui::new_progress_bar(queries.len() as u64);
    pb.set_message("Totalling sales...");
    let rows =
        analytics::calculate_sales_report(transactions, &shared, &queries, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    let inferred = shared.edges().await.into_iter().skip(loaded).collect();
    SalesReport {
        currency: currency.to_string(),
        rows,
        inferred,
    }
}

pub async fn run(
    transactions: &[TransactionRecord],
    graph: ConversionGraph,
    skus: &[String],
    currency: &str,
) -> Result<String> {
    if skus.is_empty() {
        return Ok("No SKUs configured for the report.".to_string());
    }
    info!("Building sales report for {} SKUs", skus.len());

    let report = build_report(transactions, graph, skus, currency).await;
    let total_style_type = if report.rows.iter().all(|r| r.error.is_none()) {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };
    let succeeded = report.rows.iter().filter(|r| r.error.is_none()).count();

    Ok(format!(
        "{}\n\n{}: {}",
        report.display_as_table(),
        ui::style_text("SKUs totalled", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{succeeded}/{}", report.rows.len()),
            total_style_type
        )
    ))
}
