//! ヘッダーコンポーネント

use invoice_extract_common::FlowMode;
use leptos::prelude::*;

#[component]
pub fn Header(mode: RwSignal<FlowMode>) -> impl IntoView {
    let mode_button = move |target: FlowMode, label: &'static str, icon: &'static str| {
        view! {
            <button
                class=move || if mode.get() == target { "mode-btn active" } else { "mode-btn" }
                on:click=move |_| mode.set(target)
            >
                <i class=icon></i>
                " "
                {label}
            </button>
        }
    };

    view! {
        <header class="header">
            <h1>
                <i class="fas fa-file-invoice"></i>
                " PDF Invoice Extractor"
            </h1>
            <p class="subtitle">"AI-powered data extraction from invoices, contracts and documents"</p>
            <nav class="mode-switch">
                {mode_button(FlowMode::Single, "Single Document", "fas fa-file-pdf")}
                {mode_button(FlowMode::Batch, "Batch Invoices", "fas fa-layer-group")}
            </nav>
        </header>
    }
}
