//! アップロードエリアコンポーネント
//!
//! ドロップとクリック（隠しinput経由）の両方でファイルを受け付ける。
//! 受け付けたファイルの検証はフロー側で行う。
//! `click_opens` が false の間はエリアのクリックを無視し、"browse" リンクだけが選択ダイアログを開く。

use crate::file::{collect_files, SelectedFile};
use invoice_extract_common::intake::PDF_MIME_TYPE;
use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, Event, HtmlInputElement, MouseEvent};

#[component]
pub fn UploadArea<F>(
    #[prop(into)] heading: Signal<String>,
    #[prop(into)] hint: Signal<String>,
    #[prop(optional)] multiple: bool,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, default = Signal::stored(true))] click_opens: Signal<bool>,
    on_files: F,
) -> impl IntoView
where
    F: Fn(Vec<SelectedFile>) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_drop = {
        let on_files = on_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get_untracked() {
                return;
            }

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                on_files(collect_files(&files));
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let open_picker = move || {
        if disabled.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_click = move |_: MouseEvent| {
        if click_opens.get_untracked() {
            open_picker();
        }
    };

    let on_browse = move |ev: MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        open_picker();
    };

    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            on_files(collect_files(&files));
        }
        // 同じファイルを続けて選べるように
        input.set_value("");
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragover.get()
            class:disabled=move || disabled.get()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">
                <i class="fas fa-cloud-upload-alt"></i>
            </div>
            <h3>{move || heading.get()}</h3>
            <p>
                {move || hint.get()}
                " "
                <span class="browse-text" on:click=on_browse>
                    "browse to choose files"
                </span>
            </p>
        </div>
        // クリックがドロップゾーンへ戻らないよう外に置く
        <input
            type="file"
            class="file-input"
            style="display: none"
            accept=PDF_MIME_TYPE
            multiple=multiple
            node_ref=input_ref
            on:change=on_change
        />
    }
}
