//! タブ切り替え

use invoice_extract_common::TabKind;
use leptos::prelude::*;

#[component]
pub fn TabBar<T, F>(#[prop(into)] active: Signal<T>, on_select: F) -> impl IntoView
where
    T: TabKind + Send + Sync,
    F: Fn(T) + 'static + Clone,
{
    view! {
        <div class="tab-buttons">
            {T::ALL
                .iter()
                .map(|&tab| {
                    let on_select = on_select.clone();
                    view! {
                        <button
                            class="tab-btn"
                            class:active=move || active.get() == tab
                            data-tab=tab.id()
                            on:click=move |_| on_select(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// タブの中身（選択中のみ表示）
#[component]
pub fn TabPanel<T>(#[prop(into)] active: Signal<T>, tab: T, children: Children) -> impl IntoView
where
    T: TabKind + Send + Sync,
{
    view! {
        <div
            id=format!("{}-tab", tab.id())
            class="tab-content"
            class:active=move || active.get() == tab
        >
            {children()}
        </div>
    }
}
