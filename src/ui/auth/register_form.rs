//! Registration form component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use super::validation::{
    MIN_PASSWORD_LENGTH, optional_field, validate_confirmation, validate_email,
    validate_new_password,
};
use crate::core::session::RegisterRequest;
use crate::ui::common::{ErrorMessage, InlineSpinner};

/// New account form; `on_success` fires once the backend accepted it
#[component]
pub fn RegisterForm(
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to the login page
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);
    let form_error = RwSignal::new(None::<String>);

    let check_email = move || {
        let result = validate_email(&email.get());
        email_error.set(result.as_ref().err().cloned());
        result.is_ok()
    };

    let check_password = move || {
        let result = validate_new_password(&password.get());
        password_error.set(result.as_ref().err().cloned());
        result.is_ok()
    };

    let check_confirm = move || {
        let result = validate_confirmation(&password.get(), &confirm_password.get());
        confirm_error.set(result.as_ref().err().cloned());
        result.is_ok()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form_error.set(None);

        let valid = [check_email(), check_password(), check_confirm()];
        if valid.contains(&false) || submitting.get_untracked() {
            return;
        }

        let request = RegisterRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
            first_name: optional_field(&first_name.get()),
            last_name: optional_field(&last_name.get()),
            company: optional_field(&company.get()),
        };
        submitting.set(true);

        spawn_local(async move {
            match auth.api().register(&request).await {
                Ok(user) => {
                    leptos::logging::log!("Registered account {}", user.email);
                    if let Some(callback) = on_success {
                        callback.run(());
                    }
                }
                Err(e) => form_error.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let text_input = move |id: &'static str, label: &'static str, value: RwSignal<String>| {
        view! {
            <div>
                <label for=id class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
                <input
                    type="text"
                    id=id
                    name=id
                    class="form-input"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-5 bg-white rounded-xl shadow-lg p-6 border border-gray-200">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Create your account"</h2>
                <p class="mt-2 text-sm text-gray-600">"Start monitoring your treasury today"</p>
            </div>

            <ErrorMessage error=form_error />

            <div class="grid grid-cols-2 gap-4">
                {text_input("first_name", "First name", first_name)}
                {text_input("last_name", "Last name", last_name)}
            </div>
            {text_input("company", "Company", company)}

            <div>
                <label for="email" class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                <input
                    type="email"
                    id="email"
                    autocomplete="email"
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
                <input
                    type="password"
                    id="password"
                    autocomplete="new-password"
                    placeholder=format!("At least {} characters", MIN_PASSWORD_LENGTH)
                    class="form-input"
                    class:border-red-500=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { check_password(); }
                />
                {move || password_error.get().map(|error| view! {
                    <p class="mt-1 text-sm text-red-600">{error}</p>
                })}
            </div>

            <div>
                <label for="confirm_password" class="block text-sm font-medium text-gray-700 mb-1">
                    "Confirm password"
                </label>
                <input
                    type="password"
                    id="confirm_password"
                    autocomplete="new-password"
                    class="form-input"
                    class:border-red-500=move || confirm_error.get().is_some()
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| {
                        confirm_password.set(event_target_value(&ev));
                        confirm_error.set(None);
                    }
                />
                {move || confirm_error.get().map(|error| view! {
                    <p class="mt-1 text-sm text-red-600">{error}</p>
                })}
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || submitting.get()>
                {move || if submitting.get() {
                    view! {
                        <span class="flex items-center justify-center gap-2">
                            <InlineSpinner />
                            "Creating account..."
                        </span>
                    }.into_any()
                } else {
                    view! { <span>"Create Account"</span> }.into_any()
                }}
            </button>

            <div class="text-center text-sm text-gray-600">
                "Already have an account? "
                <button
                    type="button"
                    class="text-purple-600 hover:text-purple-700 font-medium"
                    on:click=move |_| {
                        if let Some(callback) = on_login_click {
                            callback.run(());
                        }
                    }
                >
                    "Sign in"
                </button>
            </div>
        </form>
    }
}
