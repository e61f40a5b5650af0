use leptos::prelude::*;

/// Icon served from `/icons/{name}.svg`
#[component]
pub fn Icon(
    /// Icon name without the .svg extension
    name: &'static str,
    /// CSS classes for sizing and color
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=""
            aria-hidden="true"
            draggable=false
        />
    }
}

/// Icon names shipped in `public/icons`
pub mod icons {
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const BELL: &str = "bell";
    pub const CHECK: &str = "check";
    pub const CREDIT_CARD: &str = "credit-card";
    pub const EXTERNAL_LINK: &str = "external-link";
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const LOG_OUT: &str = "log-out";
    pub const SEARCH: &str = "search";
    pub const USER: &str = "user";
    pub const WALLET: &str = "wallet";
}
