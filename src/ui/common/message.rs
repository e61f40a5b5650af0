//! Inline banners for errors, confirmations and notices

use crate::ui::{Icon, icons};
use leptos::prelude::*;

/// Error banner, hidden while the signal is `None`
#[component]
pub fn ErrorMessage(
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="flex items-center gap-2 p-3 rounded-lg border border-red-200 bg-red-50 text-sm text-red-800" role="alert">
                <Icon name=icons::ALERT_CIRCLE class="h-4 w-4 shrink-0"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Success banner, hidden while the signal is `None`
#[component]
pub fn SuccessMessage(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="flex items-center gap-2 p-3 rounded-lg border border-green-200 bg-green-50 text-sm text-green-800">
                <Icon name=icons::CHECK class="h-4 w-4 shrink-0"/>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
