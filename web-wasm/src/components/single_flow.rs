//! 単一ファイルの画面と非同期処理
//!
//! 受付から1秒後に自動で開始し、4つのステップを順に表示する。
//! 3番目のステップで実際にAPIを呼ぶ。

use crate::api::extract::extract_single;
use crate::app::Notifier;
use crate::components::progress_bar::{ProgressBar, StepIndicators};
use crate::components::single_results::SingleResults;
use crate::components::single_upload::SingleUpload;
use crate::export::download::download_json;
use crate::file::SelectedFile;
use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use invoice_extract_common::progress::{AUTO_START_DELAY_MS, INLINE_ERROR_MS};
use invoice_extract_common::{FailureOutcome, FileHandle, Flow, ProcessingStep, ViewState};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SingleFlow(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, notifier: Notifier) -> impl IntoView {
    let view_state = Memo::new(move |_| flow.with(|f| f.view()));
    let progress = Signal::derive(move || flow.with(|f| *f.progress()));

    let on_files = move |files: Vec<SelectedFile>| {
        let Some((report, token)) = flow.try_update(|f| (f.intake(files), f.rejection_token())) else {
            return;
        };

        if let Some(rejection) = report.rejection {
            gloo::console::warn!(rejection.message());
            Timeout::new(INLINE_ERROR_MS, move || {
                flow.try_update(|f| f.expire_inline_error(token));
            })
            .forget();
        }

        if report.auto_start {
            spawn_local(async move {
                TimeoutFuture::new(AUTO_START_DELAY_MS).await;
                run_extraction(flow, notifier).await;
            });
        }
    };

    let on_download = move |_: ()| {
        let Some((filename, body)) = flow.with_untracked(|f| f.json_export()) else {
            return;
        };
        if let Err(e) = download_json(&filename, &body) {
            notifier.error(format!("Failed to download results: {}", e));
        }
    };

    let on_reset = move |_: ()| {
        if let Some(Err(e)) = flow.try_update(|f| f.reset()) {
            gloo::console::warn!(format!("reset ignored: {}", e));
        }
    };

    view! {
        <div class="single-flow">
            {move || match view_state.get() {
                ViewState::Upload => view! { <SingleUpload flow=flow on_files=on_files /> }.into_any(),
                ViewState::Processing => view! {
                    <section class="processing-section">
                        <h3>
                            "Processing "
                            {move || flow.with(|f| f.current_file().map(|file| file.name()).unwrap_or_default())}
                        </h3>
                        <ProgressBar progress=progress />
                        <StepIndicators progress=progress />
                    </section>
                }
                .into_any(),
                ViewState::Results => view! {
                    <SingleResults flow=flow on_download=on_download on_reset=on_reset />
                }
                .into_any(),
            }}
        </div>
    }
}

/// 抽出の実行
///
/// 通信に失敗した場合、デモ表示が有効ならサンプル結果で続行する。
async fn run_extraction(flow: RwSignal<Flow<SelectedFile>, LocalStorage>, notifier: Notifier) {
    let files = match flow.try_update(|f| f.start()) {
        Some(Ok(files)) => files,
        Some(Err(e)) => {
            gloo::console::warn!(format!("extraction not started: {}", e));
            return;
        }
        None => return,
    };
    let Some(file) = files.into_iter().next() else {
        return;
    };
    let (config, kind) = flow.with_untracked(|f| (f.config().clone(), f.extraction_type()));

    for step in [ProcessingStep::Upload, ProcessingStep::ExtractText] {
        flow.try_update(|f| f.advance(step));
        if let Some(ms) = step.delay_ms() {
            TimeoutFuture::new(ms).await;
        }
    }

    flow.try_update(|f| f.advance(ProcessingStep::Analyze));
    let result = match extract_single(&config, &file, kind).await {
        Ok(result) => result,
        Err(e) => {
            gloo::console::error!(format!("Extraction error: {}", e));
            match flow.try_update(|f| f.fail(&e)) {
                Some(FailureOutcome::Demo(demo)) => {
                    notifier.info(format!("Showing demo results: {}", e));
                    demo
                }
                Some(FailureOutcome::Surfaced(message)) => {
                    notifier.error(message);
                    return;
                }
                None => return,
            }
        }
    };

    flow.try_update(|f| f.advance(ProcessingStep::Finalize));
    if let Some(ms) = ProcessingStep::Finalize.delay_ms() {
        TimeoutFuture::new(ms).await;
    }

    if let Some(Err(e)) = flow.try_update(|f| f.complete(result)) {
        gloo::console::warn!(format!("extraction result dropped: {}", e));
    }
}
