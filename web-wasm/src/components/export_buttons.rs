//! エクスポートボタンコンポーネント

use invoice_extract_common::ExportButtonState;
use leptos::prelude::*;

/// Excel出力（処理中は無効化してラベルを切り替える）
#[component]
pub fn ExcelExportButton<F>(#[prop(into)] state: Signal<ExportButtonState>, on_export: F) -> impl IntoView
where
    F: Fn(()) + 'static,
{
    view! {
        <button
            class="btn btn-success"
            disabled=move || state.get().disabled()
            on:click=move |_| on_export(())
        >
            <i class=move || state.get().icon()></i>
            " "
            {move || state.get().label()}
        </button>
    }
}

#[component]
pub fn JsonDownloadButton<F>(on_download: F) -> impl IntoView
where
    F: Fn(()) + 'static,
{
    view! {
        <button class="btn btn-success" on:click=move |_| on_download(())>
            <i class="fas fa-download"></i>
            " Download JSON"
        </button>
    }
}

#[component]
pub fn ResetButton<F>(label: &'static str, on_reset: F) -> impl IntoView
where
    F: Fn(()) + 'static,
{
    view! {
        <button class="btn btn-secondary" on:click=move |_| on_reset(())>
            <i class="fas fa-redo"></i>
            " "
            {label}
        </button>
    }
}
