use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "h-4 w-4 border-2",
            SpinnerSize::Medium => "h-8 w-8 border-2",
            SpinnerSize::Large => "h-12 w-12 border-4",
        }
    }
}

/// Ring spinner
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    /// Additional CSS classes
    #[prop(default = String::new())]
    class: String,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
    /// Whether to center the spinner
    #[prop(default = false)]
    centered: bool,
) -> impl IntoView {
    let ring = format!(
        "animate-spin rounded-full border-purple-200 border-t-purple-600 {} {}",
        size.class(),
        class
    );

    let container_class = if centered {
        "flex flex-col items-center justify-center gap-3"
    } else {
        "inline-flex items-center gap-2"
    };

    view! {
        <div class=container_class>
            <div class=ring role="status" aria-live="polite">
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="text-sm text-gray-600">{label.clone()}</div>
            })}
        </div>
    }
}

/// Centered spinner with an optional message
#[component]
pub fn LoadingSpinner(
    #[prop(default = String::new())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="min-h-[40vh] flex items-center justify-center">
            <Spinner size=SpinnerSize::Large label=message centered=true />
        </div>
    }
}

/// Inline spinner for buttons
#[component]
pub fn InlineSpinner() -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Small class="border-white/40 border-t-white".to_string() /> }
}

/// Content placeholder while data loads
#[component]
pub fn Skeleton(
    #[prop(default = "100%".to_string())]
    width: String,
    #[prop(default = "1rem".to_string())]
    height: String,
) -> impl IntoView {
    view! {
        <div
            class="animate-pulse rounded bg-gray-200"
            style=format!("width: {}; height: {}", width, height)
            aria-busy="true"
        ></div>
    }
}
