use leptos::prelude::*;

/// Badge color scheme
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BadgeVariant {
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "bg-gray-100 text-gray-800 border-gray-200",
            BadgeVariant::Success => "bg-green-100 text-green-800 border-green-200",
            BadgeVariant::Warning => "bg-yellow-100 text-yellow-800 border-yellow-200",
            BadgeVariant::Danger => "bg-red-100 text-red-800 border-red-200",
            BadgeVariant::Info => "bg-blue-100 text-blue-800 border-blue-200",
        }
    }

    /// Variant for a subscription or payment status string
    pub fn for_status(status: &str) -> Self {
        match status {
            "active" | "succeeded" | "paid" => BadgeVariant::Success,
            "trialing" | "pending" | "processing" => BadgeVariant::Info,
            "past_due" | "incomplete" => BadgeVariant::Warning,
            "canceled" | "cancelled" | "failed" | "unpaid" => BadgeVariant::Danger,
            _ => BadgeVariant::Neutral,
        }
    }
}

#[component]
pub fn Badge(
    children: Children,
    #[prop(default = BadgeVariant::Neutral)]
    variant: BadgeVariant,
    /// Overrides the variant colors, e.g. with an alert level class
    #[prop(optional)]
    class: Option<&'static str>,
) -> impl IntoView {
    let classes = format!(
        "inline-flex items-center px-2 py-0.5 rounded-full border text-xs font-medium {}",
        class.unwrap_or(variant.class())
    );

    view! { <span class=classes>{children()}</span> }
}
