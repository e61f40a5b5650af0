//! Dashboard page component
//!
//! Treasury summary cards and the list of recent alerts, loaded in parallel
//! once the session is confirmed.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::api::{TreasuryAlert, TreasuryMetrics, format_usd, primary_error};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{Badge, ErrorMessage, Skeleton};
use crate::ui::icon::{Icon, icons};
use crate::ui::layout::AppShell;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();

    let metrics = RwSignal::new(None::<TreasuryMetrics>);
    let alerts = RwSignal::new(Vec::<TreasuryAlert>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    // Token refreshes update the session state; only a sign-in should reload
    let authenticated = Memo::new(move |_| auth.is_authenticated());

    Effect::new(move |_| {
        if !authenticated.get() {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            loading.set(true);
            error.set(None);

            let (metrics_result, alerts_result) = futures::join!(api.metrics(), api.alerts());

            if let Err(e) = &metrics_result {
                leptos::logging::error!("Failed to load metrics: {}", e);
            }
            if let Err(e) = &alerts_result {
                leptos::logging::error!("Failed to load alerts: {}", e);
            }
            // A single expired session must sign out only once
            let failure = primary_error(
                [metrics_result.as_ref().err(), alerts_result.as_ref().err()]
                    .into_iter()
                    .flatten(),
            );
            error.set(failure.and_then(|e| auth.error_message(e)));

            if let Ok(m) = metrics_result {
                metrics.set(Some(m));
            }
            if let Ok(a) = alerts_result {
                alerts.set(a);
            }

            loading.set(false);
        });
    });

    let welcome = move || {
        auth.user()
            .map(|u| format!("Welcome back, {}", u.display_name()))
            .unwrap_or_default()
    };

    view! {
        <AppShell title="Treasury Dashboard" subtitle="Overview of your monitored addresses">
            <p class="-mt-6 mb-6 text-sm text-gray-500">{welcome}</p>

            <div class="mb-6">
                <ErrorMessage error=error />
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6 mb-8">
                <MetricCard
                    label="Total Value"
                    icon=icons::WALLET
                    loading=loading
                    value=Signal::derive(move || metrics.with(|m| m.as_ref().map(|m| format_usd(m.total_value))))
                />
                <MetricCard
                    label="Monitored Addresses"
                    icon=icons::EYE
                    loading=loading
                    value=Signal::derive(move || metrics.with(|m| m.as_ref().map(|m| m.address_count.to_string())))
                />
                <MetricCard
                    label="Active Alerts"
                    icon=icons::BELL
                    loading=loading
                    value=Signal::derive(move || metrics.with(|m| m.as_ref().map(|m| m.alerts_count.to_string())))
                />
            </div>

            <section class="bg-white rounded-xl border border-gray-200">
                <div class="flex items-center justify-between px-6 py-4 border-b border-gray-200">
                    <h2 class="text-lg font-semibold text-gray-900">"Recent Alerts"</h2>
                    {move || metrics.with(|m| m.as_ref().map(|m| view! {
                        <span class="text-xs text-gray-500">"Updated " {m.last_update.clone()}</span>
                    }))}
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="p-6 space-y-3">
                            <Skeleton height="2.5rem".to_string() />
                            <Skeleton height="2.5rem".to_string() />
                            <Skeleton height="2.5rem".to_string() />
                        </div>
                    }
                >
                    <Show
                        when=move || alerts.with(|a| !a.is_empty())
                        fallback=|| view! {
                            <div class="p-10 text-center text-gray-500">
                                <Icon name=icons::CHECK class="w-8 h-8 mx-auto mb-2 opacity-60" />
                                <p>"No active alerts. Everything looks healthy."</p>
                            </div>
                        }
                    >
                        <ul class="divide-y divide-gray-100">
                            <For
                                each=move || alerts.get()
                                key=|alert| alert.id.clone()
                                children=move |alert| view! { <AlertRow alert=alert /> }
                            />
                        </ul>
                    </Show>
                </Show>
            </section>

            <p class="mt-6 text-sm text-gray-500">
                "Need to watch more addresses? "
                <A href="/billing" attr:class="text-purple-600 hover:text-purple-700 font-medium">
                    "Upgrade your plan"
                </A>
            </p>
        </AppShell>
    }
}

#[component]
fn MetricCard(
    label: &'static str,
    icon: &'static str,
    loading: RwSignal<bool>,
    #[prop(into)]
    value: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-6">
            <div class="flex items-center justify-between mb-3">
                <span class="text-sm font-medium text-gray-600">{label}</span>
                <Icon name=icon class="w-5 h-5 text-purple-600" />
            </div>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <Skeleton width="60%".to_string() height="2rem".to_string() /> }
            >
                <div class="text-3xl font-bold text-gray-900">
                    {move || value.get().unwrap_or_else(|| "-".to_string())}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn AlertRow(alert: TreasuryAlert) -> impl IntoView {
    view! {
        <li class="flex items-start gap-4 px-6 py-4">
            <Badge class=alert.level.badge_class()>{alert.level.label()}</Badge>
            <div class="flex-1 min-w-0">
                <p class="text-sm text-gray-900">{alert.message}</p>
                <p class="mt-1 text-xs text-gray-500 font-mono truncate">{alert.address}</p>
            </div>
            <span class="text-xs text-gray-400 whitespace-nowrap">{alert.timestamp}</span>
        </li>
    }
}
