//! 単一ファイルのアップロード（抽出種別の選択とインラインエラー）

use crate::components::upload_area::UploadArea;
use crate::file::SelectedFile;
use invoice_extract_common::{ExtractionType, Flow};
use leptos::prelude::*;

#[component]
pub fn SingleUpload<F>(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, on_files: F) -> impl IntoView
where
    F: Fn(Vec<SelectedFile>) + 'static + Clone,
{
    let heading = Signal::derive(move || {
        flow.with(|f| match f.inline_error() {
            Some(rejection) => rejection.message(),
            None => f.upload_heading(),
        })
    });
    let hint = Signal::derive(move || {
        flow.with(|f| match f.current_file() {
            Some(_) => "Starting extraction...".to_string(),
            None => "PDF up to 50MB, or".to_string(),
        })
    });
    let has_error = move || flow.with(|f| f.inline_error().is_some());

    view! {
        <section class="upload-section">
            <div class="extraction-types">
                <span class="extraction-types-label">"Document type:"</span>
                {ExtractionType::ALL
                    .iter()
                    .map(|&kind| {
                        view! {
                            <label class="extraction-type">
                                <input
                                    type="radio"
                                    name="extraction-type"
                                    value=kind.as_str()
                                    prop:checked=move || flow.with(|f| f.extraction_type() == kind)
                                    on:change=move |_| flow.update(|f| f.set_extraction_type(kind))
                                />
                                {kind.label()}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="single-drop" class:error=has_error>
                <UploadArea heading=heading hint=hint on_files=on_files />
            </div>
        </section>
    }
}
