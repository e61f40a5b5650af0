//! User profile page component
//!
//! Shows the account details and lets the user edit name and company.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::session::UpdateProfileRequest;
use crate::ui::auth::{optional_field, use_auth_context};
use crate::ui::common::{ErrorMessage, InlineSpinner, SuccessMessage};
use crate::ui::icon::{Icon, icons};
use crate::ui::layout::AppShell;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth_context();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(None::<String>);

    // Seed the form whenever the signed-in user changes
    let user = Memo::new(move |_| auth.user());
    Effect::new(move |_| {
        if let Some(u) = user.get() {
            first_name.set(u.first_name.unwrap_or_default());
            last_name.set(u.last_name.unwrap_or_default());
            company.set(u.company.unwrap_or_default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        saved.set(None);
        saving.set(true);

        let request = UpdateProfileRequest {
            first_name: optional_field(&first_name.get_untracked()),
            last_name: optional_field(&last_name.get_untracked()),
            company: optional_field(&company.get_untracked()),
        };
        let api = auth.api();

        spawn_local(async move {
            match api.update_profile(&request).await {
                Ok(updated) => {
                    auth.update_user(updated);
                    saved.set(Some("Profile updated.".to_string()));
                }
                Err(e) => {
                    leptos::logging::error!("Profile update failed: {}", e);
                    error.set(auth.error_message(&e));
                }
            }
            saving.set(false);
        });
    };

    let field = move |id: &'static str, label: &'static str, value: RwSignal<String>| {
        view! {
            <div>
                <label for=id class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
                <input
                    id=id
                    type="text"
                    class="form-input"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    disabled=move || saving.get()
                />
            </div>
        }
    };

    view! {
        <AppShell title="Profile" subtitle="Your account details">
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                <section class="bg-white rounded-xl border border-gray-200 p-6">
                    {move || user.get().map(|u| view! {
                        <div class="flex items-center gap-4 mb-6">
                            <div class="w-14 h-14 rounded-full bg-purple-600 text-white text-lg font-semibold flex items-center justify-center">
                                {u.initials()}
                            </div>
                            <div class="min-w-0">
                                <p class="font-semibold text-gray-900 truncate">{u.display_name()}</p>
                                <p class="text-sm text-gray-500 truncate">{u.email.clone()}</p>
                            </div>
                        </div>
                        <dl class="space-y-3 text-sm">
                            <div class="flex justify-between">
                                <dt class="text-gray-500">"Member since"</dt>
                                <dd class="text-gray-900">{u.created_at.clone()}</dd>
                            </div>
                            <div class="flex justify-between">
                                <dt class="text-gray-500">"Last login"</dt>
                                <dd class="text-gray-900">{u.last_login.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            </div>
                            <div class="flex justify-between">
                                <dt class="text-gray-500">"Status"</dt>
                                <dd class="text-gray-900">{if u.is_active { "Active" } else { "Inactive" }}</dd>
                            </div>
                        </dl>
                    })}
                    <button
                        class="btn-secondary w-full mt-6 flex items-center justify-center gap-2"
                        on:click=move |_| auth.logout()
                    >
                        <Icon name=icons::LOG_OUT class="w-4 h-4" />
                        "Sign out"
                    </button>
                </section>

                <form class="lg:col-span-2 bg-white rounded-xl border border-gray-200 p-6 space-y-5" on:submit=on_submit>
                    <h2 class="text-lg font-semibold text-gray-900">"Personal information"</h2>
                    <ErrorMessage error=error />
                    <SuccessMessage message=saved />

                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                        {field("first_name", "First name", first_name)}
                        {field("last_name", "Last name", last_name)}
                    </div>
                    {field("company", "Company", company)}

                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                        <input
                            type="email"
                            class="form-input bg-gray-50"
                            prop:value=move || user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())
                            disabled=true
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || saving.get()>
                        {move || saving.get().then(|| view! { <InlineSpinner /> })}
                        {move || if saving.get() { "Saving..." } else { "Save changes" }}
                    </button>
                </form>
            </div>
        </AppShell>
    }
}
