//! Login page component
//!
//! Redirects to the dashboard on success, or straight away when a session
//! already exists.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::ui::auth::{LoginForm, use_auth_context};
use crate::ui::common::SuccessMessage;
use crate::ui::layout::AuthLayout;

/// Query value set by the registration page
pub const REGISTRATION_SUCCESS: &str = "registration_success";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let home = auth.config().home_path;
    let query = use_query_map();
    let navigate = use_navigate();

    let notice = Signal::derive(move || {
        query
            .read()
            .get("message")
            .filter(|m| m == REGISTRATION_SUCCESS)
            .map(|_| "Account created. Please sign in to continue.".to_string())
    });

    Effect::new({
        let home = home.clone();
        move |_| {
            if auth.is_authenticated() {
                navigate(&home, Default::default());
            }
        }
    });

    let on_success = Callback::new(move |_: ()| {
        let navigate = use_navigate();
        navigate(&home, Default::default());
    });

    let on_register_click = Callback::new(move |_: ()| {
        let navigate = use_navigate();
        navigate("/register", Default::default());
    });

    view! {
        <AuthLayout title="Treasury Monitor" subtitle="Professional Cardano treasury monitoring">
            <div class="mb-6">
                <SuccessMessage message=notice />
            </div>
            <LoginForm
                on_success=on_success
                on_register_click=on_register_click
            />
        </AuthLayout>
    }
}
