//! Not found (404) page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};
use crate::ui::layout::Brand;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col items-center justify-center p-4 text-center">
            <Brand class="w-12 h-12 text-xl mb-6" />
            <h1 class="text-6xl font-bold text-gray-900 mb-4">"404"</h1>
            <h2 class="text-2xl font-semibold text-gray-900 mb-2">"Page Not Found"</h2>
            <p class="text-gray-600 mb-8 max-w-md">
                "The page you're looking for doesn't exist or has been moved."
            </p>
            <div class="flex flex-col sm:flex-row items-center gap-4">
                <A href="/dashboard" attr:class="btn-primary">"Go to dashboard"</A>
                <A href="/docs/search" attr:class="btn-secondary flex items-center gap-2">
                    <Icon name=icons::SEARCH class="w-4 h-4" />
                    "Search docs"
                </A>
            </div>
        </div>
    }
}
