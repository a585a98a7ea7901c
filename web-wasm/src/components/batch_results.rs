//! バッチ結果（集計・サマリ表・明細表・エラー一覧）

use crate::components::export_buttons::{ExcelExportButton, ResetButton};
use crate::components::tabs::{TabBar, TabPanel};
use crate::file::SelectedFile;
use invoice_extract_common::render::NO_ERRORS_MESSAGE;
use invoice_extract_common::{BatchTab, BatchView, ErrorListView, Flow, LineItemRow, SummaryRow};
use leptos::prelude::*;

#[component]
pub fn BatchResults<FE, FR>(
    flow: RwSignal<Flow<SelectedFile>, LocalStorage>,
    on_export: FE,
    on_reset: FR,
) -> impl IntoView
where
    FE: Fn(()) + 'static,
    FR: Fn(()) + 'static,
{
    let batch_view = Memo::new(move |_| flow.with(|f| f.batch_view()));
    let active = Signal::derive(move || flow.with(|f| f.batch_tabs().active()));
    let export_state = Signal::derive(move || flow.with(|f| f.export_state()));

    let stat_text = move |read: fn(&BatchView) -> String| {
        Signal::derive(move || batch_view.with(|v| v.as_ref().map(read).unwrap_or_default()))
    };

    let summary_rows = move || {
        batch_view.with(|v| {
            v.iter()
                .flat_map(|v| v.summary_rows.iter())
                .map(summary_row)
                .collect_view()
        })
    };

    let line_item_rows = move || {
        batch_view.with(|v| {
            v.iter()
                .flat_map(|v| v.line_item_rows.iter())
                .map(line_item_row)
                .collect_view()
        })
    };

    let errors = move || {
        batch_view.with(|v| match v.as_ref().map(|v| &v.errors) {
            Some(ErrorListView::Errors(messages)) => messages
                .iter()
                .map(|message| {
                    view! {
                        <div class="error-item">
                            <div class="error-header">
                                <i class="fas fa-exclamation-triangle"></i>
                                <span>"Processing Error"</span>
                            </div>
                            <div class="error-message">{message.clone()}</div>
                        </div>
                    }
                })
                .collect_view()
                .into_any(),
            _ => view! { <div class="no-errors">{NO_ERRORS_MESSAGE}</div> }.into_any(),
        })
    };

    view! {
        <section class="results-section">
            <div class="results-header">
                <h2>"Extraction Results"</h2>
                <div class="results-actions">
                    <ExcelExportButton state=export_state on_export=on_export />
                    <ResetButton label="Process More Files" on_reset=on_reset />
                </div>
            </div>

            <div class="stats-grid">
                <StatCard label="Files Processed" value=stat_text(|v| v.stats.processed_files.to_string()) />
                <StatCard label="Invoices Extracted" value=stat_text(|v| v.stats.successful_invoices.to_string()) />
                <StatCard label="Total Amount" value=stat_text(|v| v.stats.total_amount_display()) />
            </div>

            <TabBar
                active=active
                on_select=move |tab: BatchTab| flow.update(|f| f.batch_tabs_mut().activate(tab))
            />

            <TabPanel active=active tab=BatchTab::Summary>
                <table class="data-table">
                    <thead>
                        <tr>{header_cells(&SummaryRow::HEADERS)}</tr>
                    </thead>
                    <tbody>{summary_rows}</tbody>
                </table>
            </TabPanel>

            <TabPanel active=active tab=BatchTab::LineItems>
                <table class="data-table">
                    <thead>
                        <tr>{header_cells(&LineItemRow::HEADERS)}</tr>
                    </thead>
                    <tbody>{line_item_rows}</tbody>
                </table>
            </TabPanel>

            <TabPanel active=active tab=BatchTab::Errors>
                <div class="error-list">{errors}</div>
            </TabPanel>
        </section>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-value">{move || value.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}

fn header_cells(headers: &[&'static str]) -> impl IntoView {
    headers
        .iter()
        .map(|&h| view! { <th>{h}</th> })
        .collect_view()
}

fn summary_row(row: &SummaryRow) -> impl IntoView {
    let cells = row.cells();
    // 最後の列はステータスバッジ
    let data = &cells[..cells.len() - 1];
    view! {
        <tr>
            {data.iter().map(|c| view! { <td>{c.to_string()}</td> }).collect_view()}
            <td>
                <span class="status-badge success">{row.status}</span>
            </td>
        </tr>
    }
}

fn line_item_row(row: &LineItemRow) -> impl IntoView {
    view! {
        <tr>
            {row.cells().iter().map(|c| view! { <td>{c.to_string()}</td> }).collect_view()}
        </tr>
    }
}
