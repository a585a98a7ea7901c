//! プログレスバーコンポーネント

use invoice_extract_common::{ProcessingStep, Progress};
use leptos::prelude::*;

#[component]
pub fn ProgressBar(#[prop(into)] progress: Signal<Progress>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get().percent())
                />
            </div>
            <p class="progress-text">
                {move || format!("{}%", progress.get().percent())}
            </p>
        </div>
    }
}

/// 単一フローのステップ表示
#[component]
pub fn StepIndicators(#[prop(into)] progress: Signal<Progress>) -> impl IntoView {
    view! {
        <ol class="processing-steps">
            {ProcessingStep::ALL
                .iter()
                .map(|&step| {
                    view! {
                        <li
                            class="step"
                            class:active=move || progress.get().is_step_active(step)
                        >
                            <span class="step-number">{step.number()}</span>
                            <span class="step-label">{step.label()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
