//! Documentation search page
//!
//! Ranks the bundled documentation index as the user types. Results open in
//! a new tab.

use leptos::prelude::*;

use crate::core::docs_search::{
    DocCategory, DocTier, SUGGESTED_QUERIES, SearchFilters, SearchHit, search,
};
use crate::ui::icon::{Icon, icons};
use crate::ui::layout::AppShell;

#[component]
pub fn DocsSearchPage() -> impl IntoView {
    view! {
        <AppShell title="Documentation" subtitle="Find guides for every stage of your treasury setup">
            <DocsSearch />
        </AppShell>
    }
}

/// Search box with category and tier filters
#[component]
pub fn DocsSearch() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let category = RwSignal::new(None::<DocCategory>);
    let tier = RwSignal::new(None::<DocTier>);

    let results = Memo::new(move |_| {
        let filters = SearchFilters {
            category: category.get(),
            tier: tier.get(),
        };
        query.with(|q| search(q, filters))
    });

    let on_category = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        category.set(DocCategory::from_tag(&value));
    };

    let on_tier = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        tier.set(value.parse::<u8>().ok().map(DocTier));
    };

    view! {
        <div class="bg-white rounded-xl border border-gray-200 p-6">
            <div class="relative">
                <Icon name=icons::SEARCH class="w-5 h-5 absolute left-3 top-1/2 -translate-y-1/2 opacity-50" />
                <input
                    type="search"
                    class="form-input pl-10"
                    placeholder="Search documentation..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </div>

            <div class="flex flex-wrap gap-3 mt-4">
                <select class="form-input w-auto" on:change=on_category>
                    <option value="">"All categories"</option>
                    {DocCategory::ALL.into_iter().map(|c| view! {
                        <option value=c.as_str()>{format!("{} {}", c.icon(), c.label())}</option>
                    }).collect_view()}
                </select>
                <select class="form-input w-auto" on:change=on_tier>
                    <option value="">"All tiers"</option>
                    {DocTier::ALL.into_iter().map(|t| view! {
                        <option value=t.0.to_string()>{format!("Tier {}: {}", t.0, t.label())}</option>
                    }).collect_view()}
                </select>
            </div>

            <Show when=move || query.with(|q| q.trim().is_empty())>
                <div class="mt-6">
                    <p class="text-sm text-gray-500 mb-2">"Try searching for:"</p>
                    <div class="flex flex-wrap gap-2">
                        {SUGGESTED_QUERIES.iter().map(|&s| view! {
                            <button
                                class="px-3 py-1 rounded-full bg-purple-50 text-purple-700 text-sm hover:bg-purple-100"
                                on:click=move |_| query.set(s.to_string())
                            >
                                {s}
                            </button>
                        }).collect_view()}
                    </div>
                </div>
            </Show>

            <Show when=move || query.with(|q| !q.trim().is_empty())>
                <Show
                    when=move || results.with(|r| !r.is_empty())
                    fallback=move || view! {
                        <p class="mt-6 text-gray-500">
                            {move || format!("No documentation found for \"{}\"", query.get())}
                        </p>
                    }
                >
                    <ul class="mt-6 divide-y divide-gray-100">
                        <For
                            each=move || results.get()
                            key=|hit| hit.entry.path
                            children=|hit| view! { <SearchResult hit=hit /> }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn SearchResult(hit: SearchHit) -> impl IntoView {
    let entry = hit.entry;
    let url = entry.url();

    view! {
        <li>
            <button
                class="w-full text-left py-4 flex items-start gap-4 hover:bg-gray-50 rounded-lg px-2"
                on:click=move |_| open_in_new_tab(&url)
            >
                <span class="text-2xl" aria-hidden="true">{entry.category.icon()}</span>
                <div class="flex-1 min-w-0">
                    <div class="flex items-center gap-2">
                        <span class="font-semibold text-gray-900">{entry.title}</span>
                        <span
                            class="px-2 py-0.5 rounded-full text-xs text-white"
                            style=format!("background-color: {}", entry.tier.color())
                        >
                            {format!("Tier {}", entry.tier.0)}
                        </span>
                        <Icon name=icons::EXTERNAL_LINK class="w-4 h-4 opacity-50" />
                    </div>
                    <p class="mt-1 text-sm text-gray-600">{entry.description}</p>
                    <p class="mt-1 text-xs text-gray-400">
                        {entry.category.label()} " · " {entry.reading_time} " · relevance " {hit.score}
                    </p>
                </div>
            </button>
        </li>
    }
}

#[cfg(not(feature = "ssr"))]
fn open_in_new_tab(url: &str) {
    if let Err(e) = window().open_with_url_and_target(url, "_blank") {
        leptos::logging::warn!("Failed to open {}: {:?}", url, e);
    }
}

#[cfg(feature = "ssr")]
fn open_in_new_tab(_url: &str) {}
