//! メインアプリケーションコンポーネント

use crate::components::{
    batch_flow::BatchFlow, header::Header, notifications::NotificationStack,
    single_flow::SingleFlow,
};
use crate::config::load_config;
use crate::file::SelectedFile;
use gloo::timers::callback::Timeout;
use invoice_extract_common::notify::AUTO_DISMISS_MS;
use invoice_extract_common::{Flow, FlowMode, Notification, NotificationCenter, NotificationKind};
use leptos::prelude::*;

/// トースト通知の発行口
///
/// 各通知は5秒後に自動で消える。閉じるボタンでいつでも消せる。
#[derive(Clone, Copy)]
pub struct Notifier {
    center: RwSignal<NotificationCenter>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            center: RwSignal::new(NotificationCenter::new()),
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let Some(id) = self.center.try_update(|c| c.push(kind, message)) else {
            return;
        };
        let center = self.center;
        Timeout::new(AUTO_DISMISS_MS, move || {
            center.try_update(|c| c.dismiss(id));
        })
        .forget();
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.center.update(|c| {
            c.dismiss(id);
        });
    }

    /// 表示中の通知（リアクティブ）
    pub fn items(&self) -> Vec<Notification> {
        self.center.with(|c| c.items().to_vec())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    gloo::console::log!(format!(
        "invoice-extract: api={:?} demo_fallback={}",
        config.endpoint(""),
        config.demo_fallback
    ));

    let notifier = Notifier::new();
    let mode = RwSignal::new(FlowMode::Single);

    // web_sys::File は Send ではないのでローカルシグナル
    let single = RwSignal::new_local(Flow::<SelectedFile>::single(config.clone()));
    let batch = RwSignal::new_local(Flow::<SelectedFile>::batch(config));

    view! {
        <div class="container">
            <Header mode=mode />

            <Show
                when=move || mode.get() == FlowMode::Batch
                fallback=move || view! { <SingleFlow flow=single notifier=notifier /> }
            >
                <BatchFlow flow=batch notifier=notifier />
            </Show>

            <NotificationStack notifier=notifier />
        </div>
    }
}
