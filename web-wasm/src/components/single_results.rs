//! 単一ファイルの結果（構造化データ / 抽出テキスト / AI要約）

use crate::components::export_buttons::{JsonDownloadButton, ResetButton};
use crate::components::tabs::{TabBar, TabPanel};
use crate::file::SelectedFile;
use invoice_extract_common::{Flow, SingleTab, SingleView};
use leptos::prelude::*;

#[component]
pub fn SingleResults<FD, FR>(
    flow: RwSignal<Flow<SelectedFile>, LocalStorage>,
    on_download: FD,
    on_reset: FR,
) -> impl IntoView
where
    FD: Fn(()) + 'static,
    FR: Fn(()) + 'static,
{
    let single_view = Memo::new(move |_| flow.with(|f| f.single_view()));
    let active = Signal::derive(move || flow.with(|f| f.single_tabs().active()));

    let text = move |read: fn(&SingleView) -> String| {
        move || single_view.with(|v| v.as_ref().map(read).unwrap_or_default())
    };
    let is_demo = move || single_view.with(|v| v.as_ref().is_some_and(|v| v.is_demo));

    view! {
        <section class="results-section">
            <div class="results-header">
                <h2>
                    "Results for "
                    <span class="result-filename">{text(|v| v.filename.clone())}</span>
                </h2>
                <div class="results-actions">
                    <JsonDownloadButton on_download=on_download />
                    <ResetButton label="Extract Another" on_reset=on_reset />
                </div>
            </div>

            <Show when=is_demo>
                <div class="demo-banner">
                    <i class="fas fa-info-circle"></i>
                    " The extraction service could not be reached. Showing demo data."
                </div>
            </Show>

            <TabBar
                active=active
                on_select=move |tab: SingleTab| flow.update(|f| f.single_tabs_mut().activate(tab))
            />

            <TabPanel active=active tab=SingleTab::Structured>
                <pre class="json-output">{text(|v| v.structured_json.clone())}</pre>
            </TabPanel>

            <TabPanel active=active tab=SingleTab::RawText>
                <pre class="raw-text">{text(|v| v.raw_text.clone())}</pre>
            </TabPanel>

            <TabPanel active=active tab=SingleTab::Summary>
                <div class="ai-summary">{text(|v| v.ai_summary.clone())}</div>
            </TabPanel>
        </section>
    }
}
