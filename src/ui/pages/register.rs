//! Registration page component

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::login::REGISTRATION_SUCCESS;
use crate::ui::auth::RegisterForm;
use crate::ui::icon::{Icon, icons};
use crate::ui::layout::AuthLayout;

/// Delay before the success screen hands over to the login page
const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[component]
pub fn RegisterPage() -> impl IntoView {
    let registered = RwSignal::new(false);

    let on_success = Callback::new(move |_: ()| {
        registered.set(true);
        let navigate = use_navigate();
        set_timeout(
            move || {
                navigate(
                    &format!("/login?message={}", REGISTRATION_SUCCESS),
                    Default::default(),
                );
            },
            REDIRECT_DELAY,
        );
    });

    let on_login_click = Callback::new(move |_: ()| {
        let navigate = use_navigate();
        navigate("/login", Default::default());
    });

    view! {
        <AuthLayout title="Join Treasury Monitor" subtitle="Start monitoring your Cardano treasury today">
            <Show
                when=move || registered.get()
                fallback=move || view! {
                    <RegisterForm
                        on_success=on_success
                        on_login_click=on_login_click
                    />
                }
            >
                <div class="bg-green-50 border border-green-200 rounded-xl p-6 text-center">
                    <div class="w-16 h-16 bg-green-100 rounded-full flex items-center justify-center mx-auto mb-4">
                        <Icon name=icons::CHECK class="w-8 h-8" />
                    </div>
                    <h2 class="text-xl font-bold text-gray-900 mb-2">"Registration Successful!"</h2>
                    <p class="text-gray-600 mb-4">
                        "Please check your email to verify your account before signing in."
                    </p>
                    <p class="text-sm text-gray-500">"Redirecting to login page..."</p>
                </div>
            </Show>
        </AuthLayout>
    }
}
