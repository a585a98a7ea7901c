//! 抽出結果のターミナル表示

use invoice_extract_common::render::NO_ERRORS_MESSAGE;
use invoice_extract_common::{BatchView, ErrorListView, LineItemRow, SingleView, SummaryRow};

/// 列幅を揃えた表
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(pad_line(headers, &widths));
    out.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(pad_line(&cells, &widths));
    }
    out.join("\n")
}

fn pad_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// バッチ結果
pub fn batch_report(view: &BatchView) -> String {
    let mut out = String::new();

    out.push_str(&format!("Files Processed:    {}\n", view.stats.processed_files));
    out.push_str(&format!("Invoices Extracted: {}\n", view.stats.successful_invoices));
    out.push_str(&format!("Total Amount:       {}\n", view.stats.total_amount_display()));

    out.push_str("\n== Invoice Summary ==\n");
    let summary: Vec<Vec<String>> = view
        .summary_rows
        .iter()
        .map(|r| r.cells().iter().map(|c| c.to_string()).collect())
        .collect();
    out.push_str(&render_table(&SummaryRow::HEADERS, &summary));
    out.push('\n');

    out.push_str("\n== Line Items ==\n");
    let items: Vec<Vec<String>> = view
        .line_item_rows
        .iter()
        .map(|r| r.cells().iter().map(|c| c.to_string()).collect())
        .collect();
    out.push_str(&render_table(&LineItemRow::HEADERS, &items));
    out.push('\n');

    out.push_str("\n== Errors ==\n");
    match &view.errors {
        ErrorListView::AllSucceeded => {
            out.push_str(NO_ERRORS_MESSAGE);
            out.push('\n');
        }
        ErrorListView::Errors(messages) => {
            for message in messages {
                out.push_str(&format!("✖ Processing Error: {}\n", message));
            }
        }
    }
    out
}

/// 単一ファイルの結果
pub fn single_report(view: &SingleView) -> String {
    let mut out = String::new();
    if view.is_demo {
        out.push_str("(demo data: the extraction service could not be reached)\n\n");
    }
    out.push_str(&format!("File: {}\n", view.filename));
    out.push_str("\n== Structured Data ==\n");
    out.push_str(&view.structured_json);
    out.push_str("\n\n== Raw Text ==\n");
    out.push_str(&view.raw_text);
    out.push_str("\n\n== AI Summary ==\n");
    out.push_str(&view.ai_summary);
    out.push('\n');
    out
}
