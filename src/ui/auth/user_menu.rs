//! Header user menu
//!
//! Shows sign-in links for anonymous visitors, or the user's initials with a
//! dropdown of account pages and logout.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        auth.logout();
    };

    view! {
        <div class="relative">
            {move || {
                let state = auth.state.get();
                if state.loading {
                    return view! {
                        <div class="w-8 h-8 rounded-full bg-gray-200 animate-pulse"></div>
                    }.into_any();
                }

                let Some(user) = state.user else {
                    return view! {
                        <div class="flex items-center gap-2">
                            <A href="/login" attr:class="px-3 py-1.5 text-sm font-medium text-gray-600 hover:text-gray-900">
                                "Sign In"
                            </A>
                            <A href="/register" attr:class="btn-primary text-sm">
                                "Get Started"
                            </A>
                        </div>
                    }.into_any();
                };

                let initials = user.initials();
                let name = user.display_name();
                let email = user.email.clone();

                view! {
                    <button
                        class="flex items-center gap-2 rounded-full focus:outline-none focus:ring-2 focus:ring-purple-500"
                        on:click=move |_| menu_open.update(|open| *open = !*open)
                        aria-haspopup="true"
                        aria-expanded=move || menu_open.get().to_string()
                    >
                        <span class="w-8 h-8 rounded-full bg-purple-600 text-white text-sm font-semibold flex items-center justify-center">
                            {initials}
                        </span>
                        <span class="hidden sm:block text-sm font-medium text-gray-700">{name.clone()}</span>
                    </button>

                    <Show when=move || menu_open.get()>
                        <div class="absolute right-0 mt-2 w-56 rounded-lg bg-white shadow-lg border border-gray-200 py-1 z-50">
                            <div class="px-4 py-2 border-b border-gray-100">
                                <p class="text-sm font-medium text-gray-900">{name.clone()}</p>
                                <p class="text-xs text-gray-500 truncate">{email.clone()}</p>
                            </div>
                            <A href="/profile" attr:class="menu-item" on:click=move |_| menu_open.set(false)>
                                <Icon name=icons::USER class="h-4 w-4" />
                                "Profile"
                            </A>
                            <A href="/billing" attr:class="menu-item" on:click=move |_| menu_open.set(false)>
                                <Icon name=icons::CREDIT_CARD class="h-4 w-4" />
                                "Billing"
                            </A>
                            <button class="menu-item w-full text-red-600" on:click=handle_logout>
                                <Icon name=icons::LOG_OUT class="h-4 w-4" />
                                "Sign out"
                            </button>
                        </div>
                    </Show>
                }.into_any()
            }}
        </div>
    }
}
