//! Billing page component
//!
//! Current subscription with cancel / reactivate actions, the plan catalog
//! and recent payments.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{
    Payment, Plan, SubscribeRequest, Subscription, format_cents, primary_error,
};
use crate::ui::auth::{AuthContext, use_auth_context};
use crate::ui::common::{
    Badge, BadgeVariant, ErrorMessage, InlineSpinner, LoadingSpinner, SuccessMessage,
};
use crate::ui::icon::{Icon, icons};
use crate::ui::layout::AppShell;

/// Payments shown in the history table
const HISTORY_LIMIT: u32 = 10;

#[derive(Clone, Copy)]
struct BillingState {
    subscription: RwSignal<Option<Subscription>>,
    plans: RwSignal<Vec<Plan>>,
    payments: RwSignal<Vec<Payment>>,
    loading: RwSignal<bool>,
    /// Plan id or action name currently in flight
    pending: RwSignal<Option<String>>,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
}

impl BillingState {
    fn new() -> Self {
        Self {
            subscription: RwSignal::new(None),
            plans: RwSignal::new(Vec::new()),
            payments: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            pending: RwSignal::new(None),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
        }
    }

    fn reload(self, auth: AuthContext) {
        let api = auth.api();
        spawn_local(async move {
            self.loading.set(true);

            let (subscription, plans, payments) = futures::join!(
                api.subscription(),
                api.plans(),
                api.payment_history(HISTORY_LIMIT)
            );

            let failure = primary_error(
                [
                    subscription.as_ref().err(),
                    plans.as_ref().err(),
                    payments.as_ref().err(),
                ]
                .into_iter()
                .flatten(),
            );
            if let Some(e) = failure {
                leptos::logging::error!("Failed to load billing data: {}", e);
                self.error.set(auth.error_message(e));
            }

            if let Ok(s) = subscription {
                self.subscription.set(s);
            }
            if let Ok(p) = plans {
                self.plans.set(p);
            }
            if let Ok(p) = payments {
                self.payments.set(p);
            }
            self.loading.set(false);
        });
    }
}

#[component]
pub fn BillingPage() -> impl IntoView {
    let auth = use_auth_context();
    let state = BillingState::new();

    let authenticated = Memo::new(move |_| auth.is_authenticated());
    Effect::new(move |_| {
        if authenticated.get() {
            state.reload(auth);
        }
    });

    let subscribe = move |plan_id: String| {
        let api = auth.api();
        state.pending.set(Some(plan_id.clone()));
        state.error.set(None);
        state.notice.set(None);
        spawn_local(async move {
            let request = SubscribeRequest {
                plan_id,
                payment_method_id: None,
                trial_days: None,
            };
            match api.subscribe(&request).await {
                Ok(response) => {
                    if let Some(url) = response.payment_url {
                        open_checkout(&url);
                    } else {
                        state.notice.set(Some("Subscription updated.".to_string()));
                        state.reload(auth);
                    }
                }
                Err(e) => {
                    leptos::logging::error!("Subscribe failed: {}", e);
                    state.error.set(auth.error_message(&e));
                }
            }
            state.pending.set(None);
        });
    };

    let cancel = move |_| {
        if !confirm("Cancel your subscription at the end of the current period?") {
            return;
        }
        let api = auth.api();
        state.pending.set(Some("cancel".to_string()));
        spawn_local(async move {
            match api.cancel_subscription(false).await {
                Ok(r) => {
                    state.notice.set(Some(r.message).filter(|m| !m.is_empty()));
                    state.reload(auth);
                }
                Err(e) => state.error.set(auth.error_message(&e)),
            }
            state.pending.set(None);
        });
    };

    let reactivate = move |_| {
        let api = auth.api();
        state.pending.set(Some("reactivate".to_string()));
        spawn_local(async move {
            match api.reactivate_subscription().await {
                Ok(r) => {
                    state.notice.set(Some(r.message).filter(|m| !m.is_empty()));
                    state.reload(auth);
                }
                Err(e) => state.error.set(auth.error_message(&e)),
            }
            state.pending.set(None);
        });
    };

    let is_pending = move |key: &'static str| state.pending.with(|p| p.as_deref() == Some(key));

    view! {
        <AppShell title="Billing" subtitle="Manage your plan and payments">
            <div class="space-y-3 mb-6">
                <ErrorMessage error=state.error />
                <SuccessMessage message=state.notice />
            </div>

            <Show
                when=move || !state.loading.get()
                fallback=|| view! { <LoadingSpinner message="Loading billing details...".to_string() /> }
            >
                <section class="bg-white rounded-xl border border-gray-200 p-6 mb-8">
                    <h2 class="text-lg font-semibold text-gray-900 mb-4">"Current Plan"</h2>
                    {move || match state.subscription.get() {
                        None => view! {
                            <p class="text-gray-600">"You don't have an active subscription. Choose a plan below."</p>
                        }.into_any(),
                        Some(sub) => {
                            let ends = sub.current_period_end.clone().unwrap_or_default();
                            let scheduled = sub.cancel_at_period_end;
                            view! {
                                <div class="flex flex-wrap items-center justify-between gap-4">
                                    <div>
                                        <div class="flex items-center gap-3">
                                            <span class="text-xl font-bold text-gray-900">{sub.plan_name.clone()}</span>
                                            <Badge variant=BadgeVariant::for_status(&sub.status)>{sub.status.clone()}</Badge>
                                        </div>
                                        <p class="mt-1 text-sm text-gray-600">
                                            {format_cents(sub.price_cents)} " / month"
                                            {(!ends.is_empty()).then(|| {
                                                let verb = if scheduled { " · ends " } else { " · renews " };
                                                format!("{}{}", verb, ends)
                                            })}
                                        </p>
                                    </div>
                                    {if scheduled {
                                        view! {
                                            <button class="btn-primary" on:click=reactivate disabled=move || is_pending("reactivate")>
                                                {move || is_pending("reactivate").then(|| view! { <InlineSpinner /> })}
                                                "Reactivate"
                                            </button>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <button class="btn-secondary" on:click=cancel disabled=move || is_pending("cancel")>
                                                "Cancel subscription"
                                            </button>
                                        }.into_any()
                                    }}
                                </div>
                            }.into_any()
                        }
                    }}
                </section>

                <section class="mb-8">
                    <h2 class="text-lg font-semibold text-gray-900 mb-4">"Plans"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <For
                            each=move || state.plans.get()
                            key=|plan| plan.id.clone()
                            children=move |plan| {
                                let id = plan.id.clone();
                                let current = {
                                    let name = plan.name.clone();
                                    move || state.subscription.with(|s| {
                                        s.as_ref().is_some_and(|s| s.is_active() && s.plan_name == name)
                                    })
                                };
                                let busy = {
                                    let id = id.clone();
                                    move || state.pending.with(|p| p.as_ref() == Some(&id))
                                };
                                view! {
                                    <PlanCard
                                        plan=plan
                                        current=Signal::derive(current)
                                        busy=Signal::derive(busy)
                                        on_select=Callback::new(move |_| subscribe(id.clone()))
                                    />
                                }
                            }
                        />
                    </div>
                </section>

                <section class="bg-white rounded-xl border border-gray-200">
                    <h2 class="px-6 py-4 border-b border-gray-200 text-lg font-semibold text-gray-900">
                        "Payment History"
                    </h2>
                    <Show
                        when=move || state.payments.with(|p| !p.is_empty())
                        fallback=|| view! { <p class="p-6 text-gray-500">"No payments yet."</p> }
                    >
                        <table class="w-full text-sm">
                            <thead class="text-left text-gray-500">
                                <tr>
                                    <th class="px-6 py-3 font-medium">"Date"</th>
                                    <th class="px-6 py-3 font-medium">"Amount"</th>
                                    <th class="px-6 py-3 font-medium">"Status"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-100">
                                <For
                                    each=move || state.payments.get()
                                    key=|p| p.id.clone()
                                    children=|p| view! {
                                        <tr>
                                            <td class="px-6 py-3 text-gray-700">{p.created_at.clone()}</td>
                                            <td class="px-6 py-3 font-medium text-gray-900">
                                                {format_cents(p.amount_cents)} " " {p.currency.to_uppercase()}
                                            </td>
                                            <td class="px-6 py-3">
                                                <Badge variant=BadgeVariant::for_status(&p.status)>{p.status.clone()}</Badge>
                                                {p.failure_reason.clone().map(|r| view! {
                                                    <span class="ml-2 text-xs text-red-600">{r}</span>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </section>
            </Show>
        </AppShell>
    }
}

#[component]
fn PlanCard(
    plan: Plan,
    current: Signal<bool>,
    busy: Signal<bool>,
    on_select: Callback<()>,
) -> impl IntoView {
    let interval = plan.billing_interval.clone().unwrap_or_else(|| "month".to_string());
    let addresses = plan
        .max_addresses
        .map(|n| format!("Up to {} addresses", n));

    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-6 flex flex-col">
            <h3 class="text-lg font-semibold text-gray-900">{plan.name}</h3>
            {plan.description.map(|d| view! { <p class="mt-1 text-sm text-gray-600">{d}</p> })}
            <p class="mt-4">
                <span class="text-3xl font-bold text-gray-900">{format_cents(plan.price_cents)}</span>
                <span class="text-gray-500">" / " {interval}</span>
            </p>
            <ul class="mt-4 space-y-2 text-sm text-gray-700 flex-1">
                {addresses.map(|a| view! { <li class="flex gap-2"><Icon name=icons::CHECK class="w-4 h-4 text-green-600" />{a}</li> })}
                {plan.features.into_iter().map(|f| view! {
                    <li class="flex gap-2"><Icon name=icons::CHECK class="w-4 h-4 text-green-600" />{f}</li>
                }).collect_view()}
            </ul>
            <button
                class="btn-primary mt-6 w-full"
                disabled=move || current.get() || busy.get()
                on:click=move |_| on_select.run(())
            >
                {move || busy.get().then(|| view! { <InlineSpinner /> })}
                {move || if current.get() { "Current plan" } else { "Choose plan" }}
            </button>
        </div>
    }
}

#[cfg(not(feature = "ssr"))]
fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

#[cfg(feature = "ssr")]
fn confirm(_message: &str) -> bool {
    false
}

/// Leave the app for the hosted checkout page
#[cfg(not(feature = "ssr"))]
fn open_checkout(url: &str) {
    if let Err(e) = window().location().set_href(url) {
        leptos::logging::error!("Failed to open checkout: {:?}", e);
    }
}

#[cfg(feature = "ssr")]
fn open_checkout(_url: &str) {}
