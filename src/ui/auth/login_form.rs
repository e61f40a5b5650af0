//! Login form component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use super::validation::{validate_email, validate_login_password};
use crate::ui::common::{ErrorMessage, InlineSpinner};
use crate::ui::icon::{Icon, icons};

/// Email/password sign-in form
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to the register page
    #[prop(optional, into)]
    on_register_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let form_error = RwSignal::new(None::<String>);

    let check_email = move || {
        let result = validate_email(&email.get());
        email_error.set(result.as_ref().err().cloned());
        result.is_ok()
    };

    let check_password = move || {
        let result = validate_login_password(&password.get());
        password_error.set(result.as_ref().err().cloned());
        result.is_ok()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form_error.set(None);

        let email_valid = check_email();
        let password_valid = check_password();
        if !email_valid || !password_valid || submitting.get_untracked() {
            return;
        }

        let email_val = email.get().trim().to_string();
        let password_val = password.get();
        submitting.set(true);

        spawn_local(async move {
            match auth.sign_in(&email_val, &password_val).await {
                Ok(_) => {
                    if let Some(callback) = on_success {
                        callback.run(());
                    }
                }
                Err(e) => {
                    leptos::logging::warn!("Login failed: {}", e);
                    form_error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6 bg-white rounded-xl shadow-lg p-6 border border-gray-200">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Sign in"</h2>
                <p class="mt-2 text-sm text-gray-600">"Access your treasury dashboard"</p>
            </div>

            <ErrorMessage error=form_error />

            <div>
                <label for="email" class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@company.com"
                    class="form-input"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { check_email(); }
                />
                {move || email_error.get().map(|error| view! {
                    <p class="mt-1 text-sm text-red-600">{error}</p>
                })}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-gray-700 mb-1">"Password"</label>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        class="form-input pr-10"
                        class:border-red-500=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                    />
                    <button
                        type="button"
                        class="absolute inset-y-0 right-0 pr-3 flex items-center"
                        title="Show password"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() {
                            view! { <Icon name=icons::EYE_CLOSED class="h-5 w-5" /> }.into_any()
                        } else {
                            view! { <Icon name=icons::EYE class="h-5 w-5" /> }.into_any()
                        }}
                    </button>
                </div>
                {move || password_error.get().map(|error| view! {
                    <p class="mt-1 text-sm text-red-600">{error}</p>
                })}
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || submitting.get()>
                {move || if submitting.get() {
                    view! {
                        <span class="flex items-center justify-center gap-2">
                            <InlineSpinner />
                            "Signing in..."
                        </span>
                    }.into_any()
                } else {
                    view! { <span>"Sign In"</span> }.into_any()
                }}
            </button>

            <div class="text-center text-sm text-gray-600">
                "Don't have an account? "
                <button
                    type="button"
                    class="text-purple-600 hover:text-purple-700 font-medium"
                    on:click=move |_| {
                        if let Some(callback) = on_register_click {
                            callback.run(());
                        }
                    }
                >
                    "Sign up"
                </button>
            </div>
        </form>
    }
}
