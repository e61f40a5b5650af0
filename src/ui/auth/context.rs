//! Auth context for the component tree
//!
//! Wraps the [`SessionStore`] created at app start:
//! - Mirrors every store change into a reactive `RwSignal<SessionState>`
//! - Runs the initial session check once hydration is complete
//! - Turns store-issued redirects (logout) into router navigations

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::sync::Arc;

use crate::core::api::{ApiClient, ApiError};
use crate::core::config::ClientConfig;
use crate::core::session::{Navigator, SessionState, SessionStore, User};

#[cfg(not(feature = "ssr"))]
type ConsoleStorage = crate::core::session::BrowserStorage;
#[cfg(not(feature = "ssr"))]
type ConsoleTransport = crate::core::session::FetchTransport;

// Nothing is persisted or fetched while rendering on the server
#[cfg(feature = "ssr")]
type ConsoleStorage = crate::core::session::MemoryStorage;
#[cfg(feature = "ssr")]
type ConsoleTransport = crate::core::session::OfflineTransport;

pub type ConsoleSession = SessionStore<ConsoleStorage, ConsoleTransport, RedirectQueue>;
pub type ConsoleApi = ApiClient<ConsoleStorage, ConsoleTransport, RedirectQueue>;

/// Navigator handing paths to the router through a signal
#[derive(Debug, Clone, Copy)]
pub struct RedirectQueue(RwSignal<Option<String>>);

impl Navigator for RedirectQueue {
    fn navigate(&self, path: &str) {
        self.0.set(Some(path.to_string()));
    }
}

/// Auth context providing session state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Latest session snapshot
    pub state: RwSignal<SessionState>,
    api: StoredValue<ConsoleApi>,
    config: StoredValue<ClientConfig>,
}

impl AuthContext {
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// API client bound to this session
    pub fn api(&self) -> ConsoleApi {
        self.api.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// Log in against the backend and install the session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.api().sign_in(email, password).await
    }

    /// Install a session obtained elsewhere
    pub fn login(&self, user: User, access_token: &str) {
        self.api().session().login(user, access_token);
    }

    /// Swap in an updated profile, keeping the current token
    pub fn update_user(&self, user: User) {
        if let Some(token) = self.state.with_untracked(|s| s.access_token.clone()) {
            self.login(user, &token);
        }
    }

    /// Inline message for a failed call. A 401 that survived the refresh
    /// means the session is gone, so the user is signed out instead.
    pub fn error_message(&self, err: &ApiError) -> Option<String> {
        if err.is_unauthorized() {
            leptos::logging::log!("Session expired, signing out");
            self.logout();
            None
        } else {
            Some(err.user_message())
        }
    }

    /// Sign out and go to the login page
    pub fn logout(&self) {
        let api = self.api();
        spawn_local(async move {
            api.session().logout().await;
        });
    }
}

/// Create the session store and provide the auth context.
///
/// Must be called inside the `<Router>` so redirects can be routed.
pub fn provide_auth_context(config: ClientConfig) -> AuthContext {
    let state = RwSignal::new(SessionState::default());
    let redirect = RwSignal::new(None::<String>);

    let store: ConsoleSession = SessionStore::new(
        &config,
        ConsoleStorage::default(),
        ConsoleTransport::default(),
        RedirectQueue(redirect),
    );
    store.subscribe(move |snapshot| state.set(snapshot.clone()));

    let ctx = AuthContext {
        state,
        api: StoredValue::new(ApiClient::new(Arc::new(store))),
        config: StoredValue::new(config),
    };

    Effect::new(move |_| {
        if let Some(path) = redirect.get() {
            let navigate = use_navigate();
            navigate(&path, Default::default());
        }
    });

    // Verify persisted credentials after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        let api = ctx.api();
        let mode = ctx.config.with_value(|c| c.bootstrap);
        spawn_local(async move {
            api.session().bootstrap(mode).await;
        });
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
