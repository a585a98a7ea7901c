//! トースト通知の表示

use crate::app::Notifier;
use leptos::prelude::*;

#[component]
pub fn NotificationStack(notifier: Notifier) -> impl IntoView {
    view! {
        <div class="notification-stack">
            <For
                each=move || notifier.items()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <div class="notification-content">
                                <i class=format!("fas fa-{}", n.kind.icon())></i>
                                <span>{n.message}</span>
                            </div>
                            <button
                                class="notification-close"
                                title="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
