//! Protected route wrapper

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::context::use_auth_context;
use crate::core::session::{GuardDecision, RouteGuard};
use crate::ui::common::LoadingSpinner;

/// Renders its children only for an authenticated session.
///
/// Shows a spinner while the initial session check runs, then sends
/// anonymous visitors to the login page once.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();
    let login_path = auth.config().login_path;
    let guard = StoredValue::new(RouteGuard::new());

    let status = Memo::new(move |_| auth.state.with(|s| (s.loading, s.is_authenticated())));

    let decision = Memo::new(move |_| {
        let (loading, has_session) = status.get();
        guard
            .try_update_value(|g| g.evaluate(loading, has_session))
            .unwrap_or(GuardDecision::Blank)
    });

    Effect::new(move |_| {
        if decision.get().should_navigate() {
            let navigate = use_navigate();
            navigate(&login_path, Default::default());
        }
    });

    move || match decision.get() {
        GuardDecision::Placeholder => view! {
            <LoadingSpinner message="Checking your session...".to_string() />
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect | GuardDecision::Blank => ().into_any(),
    }
}
