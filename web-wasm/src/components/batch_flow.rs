//! バッチ処理の画面と非同期処理
//!
//! 全ファイルを1回のリクエストで送る。進捗は 10% → 90% → 100% の固定値。
//! 通信失敗時はエラー通知を出して Upload に戻る。

use crate::api::extract::{export_excel, extract_batch};
use crate::app::Notifier;
use crate::components::batch_results::BatchResults;
use crate::components::file_list::FileList;
use crate::components::progress_bar::ProgressBar;
use crate::components::upload_area::UploadArea;
use crate::export::download::download_blob;
use crate::file::SelectedFile;
use gloo::timers::future::TimeoutFuture;
use invoice_extract_common::progress::{BATCH_DONE, BATCH_RECEIVED, BATCH_SENDING, RESULTS_DELAY_MS};
use invoice_extract_common::{
    filename_from_content_disposition, Error, ExtractionResult, FailureOutcome, Flow, FlowConfig,
    Result, ViewState,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn BatchFlow(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, notifier: Notifier) -> impl IntoView {
    let view_state = Memo::new(move |_| flow.with(|f| f.view()));

    let heading = Signal::derive(move || flow.with(|f| f.upload_heading()));
    let has_files = move || flow.with(|f| !f.selection().is_empty());
    let hint = Signal::derive(move || {
        if has_files() {
            "Drop more files to add them, or".to_string()
        } else {
            "or".to_string()
        }
    });
    // ファイル選択後はエリアのクリックで選択ダイアログを開かない
    let click_opens = Signal::derive(move || !has_files());

    let on_files = move |files: Vec<SelectedFile>| {
        let Some(report) = flow.try_update(|f| f.intake(files)) else {
            return;
        };
        for warning in report.warnings {
            notifier.warning(warning.message());
        }
    };
    let on_remove = move |index: usize| {
        flow.update(|f| {
            f.remove_file(index);
        });
    };
    let on_clear = move |_: ()| flow.update(|f| f.clear_files());
    let on_process = move |_: ()| start_batch(flow, notifier);
    let on_export = move |_: ()| export_batch(flow, notifier);
    let on_reset = move |_: ()| {
        if let Some(Err(e)) = flow.try_update(|f| f.reset()) {
            gloo::console::warn!(format!("reset ignored: {}", e));
        }
    };

    view! {
        <div class="batch-flow">
            {move || match view_state.get() {
                ViewState::Upload => view! {
                    <section class="upload-section">
                        <UploadArea
                            heading=heading
                            hint=hint
                            multiple=true
                            click_opens=click_opens
                            on_files=on_files
                        />
                        <Show when=has_files>
                            <FileList
                                flow=flow
                                on_remove=on_remove
                                on_clear=on_clear
                                on_process=on_process
                            />
                        </Show>
                    </section>
                }
                .into_any(),
                ViewState::Processing => view! {
                    <section class="processing-section">
                        <div class="spinner">
                            <i class="fas fa-spinner fa-spin"></i>
                        </div>
                        <h3>
                            "Processing "
                            {move || flow.with(|f| f.in_flight())}
                            " file(s)..."
                        </h3>
                        <ProgressBar progress=Signal::derive(move || flow.with(|f| *f.progress())) />
                    </section>
                }
                .into_any(),
                ViewState::Results => view! {
                    <BatchResults flow=flow on_export=on_export on_reset=on_reset />
                }
                .into_any(),
            }}
        </div>
    }
}

/// 一括抽出の開始
fn start_batch(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, notifier: Notifier) {
    let files = match flow.try_update(|f| f.start()) {
        Some(Ok(files)) => files,
        Some(Err(e)) => {
            notifier.error(e.to_string());
            return;
        }
        None => return,
    };
    let config = flow.with_untracked(|f| f.config().clone());

    spawn_local(async move {
        flow.try_update(|f| f.set_progress(BATCH_SENDING));

        let outcome = extract_batch(&config, &files, || {
            flow.try_update(|f| f.set_progress(BATCH_RECEIVED));
        })
        .await;

        match outcome {
            Ok(result) => {
                flow.try_update(|f| f.set_progress(BATCH_DONE));
                TimeoutFuture::new(RESULTS_DELAY_MS).await;
                if let Some(Err(e)) = flow.try_update(|f| f.complete(result)) {
                    gloo::console::warn!(format!("batch result dropped: {}", e));
                }
            }
            Err(e) => {
                gloo::console::error!(format!("Batch processing error: {}", e));
                if let Some(FailureOutcome::Surfaced(message)) = flow.try_update(|f| f.fail(&e)) {
                    notifier.error(message);
                }
            }
        }
    });
}

/// Excel出力（ボタンは成否にかかわらず元に戻す）
fn export_batch(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, notifier: Notifier) {
    let result = match flow.try_update(|f| f.begin_export()) {
        Some(Ok(result)) => result,
        Some(Err(Error::NoResult)) => {
            notifier.error(Error::NoResult.to_string());
            return;
        }
        Some(Err(e)) => {
            gloo::console::warn!(format!("export ignored: {}", e));
            return;
        }
        None => return,
    };
    let config = flow.with_untracked(|f| f.config().clone());

    spawn_local(async move {
        let outcome = download_excel(&config, &result).await;
        flow.try_update(|f| f.finish_export());

        match outcome {
            Ok(()) => notifier.success("Excel file downloaded successfully!"),
            Err(e) => {
                gloo::console::error!(format!("Export error: {}", e));
                notifier.error(format!("Failed to export Excel file: {}", e));
            }
        }
    });
}

async fn download_excel(config: &FlowConfig, result: &ExtractionResult) -> Result<()> {
    let (blob, disposition) = export_excel(config, result).await?;
    let filename = filename_from_content_disposition(disposition.as_deref());
    download_blob(&blob, &filename)
}
