//! Page chrome shared by the authenticated pages

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::UserMenu;

/// Header with brand, navigation and user menu, followed by the page body
#[component]
pub fn AppShell(
    /// Page heading shown above the content
    title: &'static str,
    #[prop(optional)]
    subtitle: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center justify-between h-16">
                        <div class="flex items-center gap-8">
                            <A href="/dashboard" attr:class="flex items-center gap-3">
                                <Brand />
                                <span class="text-lg font-bold text-gray-900">"Treasury Monitor"</span>
                            </A>
                            <nav class="hidden md:flex items-center gap-1">
                                <A href="/dashboard" attr:class="nav-link">"Dashboard"</A>
                                <A href="/billing" attr:class="nav-link">"Billing"</A>
                                <A href="/docs/search" attr:class="nav-link">"Docs"</A>
                            </nav>
                        </div>
                        <UserMenu />
                    </div>
                </div>
            </header>

            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="mb-8">
                    <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
                    {subtitle.map(|s| view! { <p class="mt-1 text-gray-600">{s}</p> })}
                </div>
                {children()}
            </main>
        </div>
    }
}

/// Square logo mark
#[component]
pub fn Brand(#[prop(default = "w-8 h-8 text-base")] class: &'static str) -> impl IntoView {
    view! {
        <div class=format!("{} bg-purple-600 rounded-lg flex items-center justify-center", class)>
            <span class="text-white font-bold">"₳"</span>
        </div>
    }
}

/// Centered column used by the login and registration pages
#[component]
pub fn AuthLayout(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gradient-to-br from-purple-50 to-purple-100 flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <div class="text-center mb-8">
                    <div class="flex items-center justify-center mb-4">
                        <Brand class="w-12 h-12 text-xl" />
                    </div>
                    <h1 class="text-3xl font-bold text-gray-900 mb-2">{title}</h1>
                    <p class="text-gray-600">{subtitle}</p>
                </div>
                {children()}
                <p class="mt-6 text-center text-xs text-gray-500">
                    "Your data is encrypted in transit and at rest."
                </p>
            </div>
        </div>
    }
}
