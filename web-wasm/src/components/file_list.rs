//! 選択ファイル一覧（バッチ）

use crate::file::SelectedFile;
use invoice_extract_common::format::format_file_size;
use invoice_extract_common::{FileHandle, Flow};
use leptos::prelude::*;

#[component]
pub fn FileList<FR, FC, FP>(
    flow: RwSignal<Flow<SelectedFile>, LocalStorage>,
    on_remove: FR,
    on_clear: FC,
    on_process: FP,
) -> impl IntoView
where
    FR: Fn(usize) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static,
    FP: Fn(()) + 'static,
{
    // (index, name, size)
    let entries = move || {
        flow.with(|f| {
            f.selection()
                .iter()
                .enumerate()
                .map(|(i, file)| (i, file.name(), file.size()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="file-list">
            <div class="file-list-header">
                <h4>
                    "Selected files ("
                    {move || flow.with(|f| f.selection().len())}
                    ")"
                </h4>
                <button class="btn btn-link" on:click=move |_| on_clear(())>
                    "Clear all"
                </button>
            </div>
            <div class="file-items">
                <For
                    each=entries
                    key=|(i, name, size)| (*i, name.clone(), *size)
                    children=move |(index, name, size)| {
                        let on_remove = on_remove.clone();
                        view! {
                            <div class="file-item">
                                <div class="file-info">
                                    <i class="fas fa-file-pdf"></i>
                                    <span class="file-name">{name}</span>
                                    <span class="file-size">{format_file_size(size)}</span>
                                </div>
                                <button
                                    class="remove-file-btn"
                                    title="Remove file"
                                    on:click=move |_| on_remove(index)
                                >
                                    <i class="fas fa-times"></i>
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            <button class="btn btn-primary process-btn" on:click=move |_| on_process(())>
                <i class="fas fa-cogs"></i>
                " Process "
                {move || flow.with(|f| f.selection().len())}
                " file(s)"
            </button>
        </div>
    }
}
