//! Session store
//!
//! Single authority for "who is logged in". The store owns the in-memory
//! session snapshot, mirrors tokens to durable storage and performs the auth
//! calls (logout, refresh, profile verification) through an injected
//! transport. UI code observes it through [`SessionStore::subscribe`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::logging::{error, log, warn};

use super::model::{
    BootstrapMode, DEMO_ACCESS_TOKEN, RefreshResponse, RefreshTokenBody, SessionState, User,
    demo_user,
};
use super::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStorage};
use super::transport::{HttpRequest, HttpTransport, TransportError};
use crate::core::config::ClientConfig;

/// Client-side navigation to an application path
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

/// Outcome of a profile lookup that reached the server
enum ProfileCheck {
    Valid(User),
    Rejected(u16),
}

pub struct SessionStore<S, H, N> {
    storage: S,
    transport: H,
    navigator: N,
    api_base: String,
    login_path: String,
    state: Mutex<SessionState>,
    listeners: Mutex<Vec<Listener>>,
    refresh_lock: futures::lock::Mutex<()>,
    /// Bumped after every successful refresh
    refresh_generation: AtomicU64,
}

impl<S, H, N> SessionStore<S, H, N>
where
    S: TokenStorage,
    H: HttpTransport,
    N: Navigator,
{
    pub fn new(config: &ClientConfig, storage: S, transport: H, navigator: N) -> Self {
        Self {
            storage,
            transport,
            navigator,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            state: Mutex::new(SessionState::default()),
            listeners: Mutex::new(Vec::new()),
            refresh_lock: futures::lock::Mutex::new(()),
            refresh_generation: AtomicU64::new(0),
        }
    }

    /// Register an observer called with the new snapshot after every change.
    /// Listeners must not subscribe from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) {
        lock(&self.listeners).push(Box::new(listener));
    }

    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    pub fn user(&self) -> Option<User> {
        lock(&self.state).user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        lock(&self.state).access_token.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Token to attach to API calls: the in-memory token, else the persisted one
    pub fn bearer_token(&self) -> Option<String> {
        self.access_token().or_else(|| self.storage.access_token())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &H {
        &self.transport
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Absolute API URL for an endpoint path such as `/auth/profile`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Install a freshly authenticated user. No network call.
    pub fn login(&self, user: User, access_token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        let token = access_token.to_string();
        self.update(move |state| {
            state.user = Some(user);
            state.access_token = Some(token);
        });
    }

    /// Persist the long-lived token returned alongside a login
    pub fn store_refresh_token(&self, refresh_token: &str) {
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
    }

    /// Sign out locally and tell the backend to drop the refresh token.
    ///
    /// Local state is cleared and the login page shown before the backend
    /// is contacted, so a slow or hanging logout call never keeps the
    /// session alive. The notification itself is best effort.
    pub async fn logout(&self) {
        let refresh_token = self.storage.refresh_token();

        self.clear();
        self.navigator.navigate(&self.login_path);

        let Some(refresh_token) = refresh_token else {
            return;
        };

        let notified = async {
            let request = HttpRequest::post(self.api_url("/auth/logout")).json(
                &RefreshTokenBody {
                    refresh_token: &refresh_token,
                },
            )?;
            self.transport.send(request).await
        }
        .await;

        match notified {
            Ok(resp) if !resp.ok() => {
                warn!("Logout request rejected with status {}", resp.status)
            }
            Ok(_) => {}
            Err(e) => warn!("Logout request failed: {}", e),
        }
    }

    /// Exchange the persisted refresh token for a new access token.
    ///
    /// Returns `false` without a network call when no refresh token is
    /// stored. A failed refresh leaves the current session untouched; the
    /// caller decides whether to clear it. Concurrent calls are serialized,
    /// and a caller that waited on a successful refresh reuses its result.
    pub async fn refresh(&self) -> bool {
        let observed = self.refresh_generation.load(Ordering::SeqCst);
        let _guard = self.refresh_lock.lock().await;

        if self.refresh_generation.load(Ordering::SeqCst) != observed {
            return true;
        }

        let Some(refresh_token) = self.storage.refresh_token() else {
            return false;
        };

        let request = match HttpRequest::post(self.api_url("/auth/refresh")).json(
            &RefreshTokenBody {
                refresh_token: &refresh_token,
            },
        ) {
            Ok(request) => request,
            Err(e) => {
                error!("Token refresh failed: {}", e);
                return false;
            }
        };

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Token refresh failed: {}", e);
                return false;
            }
        };

        if !resp.ok() {
            log!("Token refresh rejected with status {}", resp.status);
            return false;
        }

        let tokens: RefreshResponse = match serde_json::from_str(&resp.body) {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("Malformed refresh response: {}", e);
                return false;
            }
        };

        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        if let Some(rotated) = &tokens.refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, rotated);
        }
        self.update(|state| state.access_token = Some(tokens.access_token));
        self.refresh_generation.fetch_add(1, Ordering::SeqCst);

        true
    }

    /// Establish the session on first load. `loading` is false afterwards
    /// regardless of the outcome.
    pub async fn bootstrap(&self, mode: BootstrapMode) {
        match mode {
            BootstrapMode::Demo => {
                let user = demo_user(&now_iso());
                self.update(|state| {
                    state.user = Some(user);
                    state.access_token = Some(DEMO_ACCESS_TOKEN.to_string());
                    state.loading = false;
                });
            }
            BootstrapMode::Verify => self.verify_persisted().await,
        }
    }

    async fn verify_persisted(&self) {
        let Some(token) = self.storage.access_token() else {
            self.update(|state| state.loading = false);
            return;
        };

        match self.check_profile(&token).await {
            Ok(ProfileCheck::Valid(user)) => self.authenticate(user, token),
            Ok(ProfileCheck::Rejected(status)) => {
                log!("Stored token rejected ({}), attempting refresh", status);
                if !self.refresh().await {
                    self.clear();
                    return;
                }
                let Some(fresh) = self.storage.access_token() else {
                    self.clear();
                    return;
                };
                match self.check_profile(&fresh).await {
                    Ok(ProfileCheck::Valid(user)) => self.authenticate(user, fresh),
                    Ok(ProfileCheck::Rejected(_)) => self.clear(),
                    Err(e) => {
                        error!("Token verification failed: {}", e);
                        self.clear();
                    }
                }
            }
            Err(e) => {
                error!("Token verification failed: {}", e);
                self.clear();
            }
        }
    }

    async fn check_profile(&self, token: &str) -> Result<ProfileCheck, TransportError> {
        let request =
            HttpRequest::get(self.api_url("/auth/profile")).bearer(Some(token.to_string()));
        let resp = self.transport.send(request).await?;

        if !resp.ok() {
            return Ok(ProfileCheck::Rejected(resp.status));
        }

        match serde_json::from_str::<User>(&resp.body) {
            Ok(user) => Ok(ProfileCheck::Valid(user)),
            Err(e) => {
                warn!("Malformed profile response: {}", e);
                Ok(ProfileCheck::Rejected(resp.status))
            }
        }
    }

    fn authenticate(&self, user: User, token: String) {
        self.update(|state| {
            state.user = Some(user);
            state.access_token = Some(token);
            state.loading = false;
        });
    }

    /// Drop the session from memory and storage
    fn clear(&self) {
        self.storage.clear_tokens();
        self.update(|state| {
            state.user = None;
            state.access_token = None;
            state.loading = false;
        });
    }

    fn update(&self, change: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = lock(&self.state);
            change(&mut state);
            state.clone()
        };

        for listener in lock(&self.listeners).iter() {
            listener(&snapshot);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(feature = "hydrate")]
fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(not(any(feature = "ssr", feature = "hydrate")))]
fn now_iso() -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::storage::MemoryStorage;
    use crate::core::session::transport::mock::MockTransport;
    use crate::core::session::transport::{HttpResponse, Method};
    use std::sync::Arc;

    type Paths = Arc<Mutex<Vec<String>>>;
    type TestStore = SessionStore<MemoryStorage, MockTransport, Box<dyn Fn(&str)>>;

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "treasurer@example.com".to_string(),
            first_name: Some("Tess".to_string()),
            last_name: Some("Urer".to_string()),
            company: Some("Acme DAO".to_string()),
            is_active: true,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            last_login: None,
        }
    }

    fn profile_json() -> String {
        serde_json::to_string(&test_user()).unwrap()
    }

    fn store_with(storage: MemoryStorage, transport: MockTransport) -> (TestStore, Paths) {
        let paths: Paths = Arc::default();
        let recorded = paths.clone();
        let navigator: Box<dyn Fn(&str)> =
            Box::new(move |path: &str| recorded.lock().unwrap().push(path.to_string()));
        let store = SessionStore::new(&ClientConfig::default(), storage, transport, navigator);
        (store, paths)
    }

    #[test]
    fn test_login_sets_state_and_persists_access_token() {
        let (store, _) = store_with(MemoryStorage::new(), MockTransport::new());

        store.login(test_user(), "acc-1");

        let state = store.state();
        assert_eq!(state.user, Some(test_user()));
        assert_eq!(state.access_token.as_deref(), Some("acc-1"));
        assert_eq!(store.storage().access_token().as_deref(), Some("acc-1"));
        assert_eq!(store.transport().request_count(), 0);
    }

    #[test]
    fn test_listeners_observe_changes() {
        let (store, _) = store_with(MemoryStorage::new(), MockTransport::new());
        let seen: Arc<Mutex<Vec<SessionState>>> = Arc::default();
        let sink = seen.clone();
        store.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

        store.login(test_user(), "acc-1");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].access_token.as_deref(), Some("acc-1"));
    }

    #[test]
    fn test_bearer_token_falls_back_to_storage() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "persisted")]);
        let (store, _) = store_with(storage, MockTransport::new());

        assert_eq!(store.bearer_token().as_deref(), Some("persisted"));

        store.login(test_user(), "fresh");
        assert_eq!(store.bearer_token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_logout_without_refresh_token_skips_network() {
        let (store, paths) = store_with(MemoryStorage::new(), MockTransport::new());
        store.login(test_user(), "acc-1");

        store.logout().await;

        assert_eq!(store.transport().request_count(), 0);
        assert!(store.user().is_none());
        assert!(store.access_token().is_none());
        assert!(store.storage().access_token().is_none());
        assert_eq!(*paths.lock().unwrap(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_logout_notifies_backend_with_refresh_token() {
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(200, "{}"));
        let (store, paths) = store_with(storage, transport);
        store.login(test_user(), "acc-1");

        store.logout().await;

        let requests = store.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "/api/auth/logout");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"refresh_token":"ref-1"}"#));
        assert!(store.storage().refresh_token().is_none());
        assert_eq!(paths.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_completes_when_backend_unreachable() {
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let transport = MockTransport::new().fail("connection refused");
        let (store, paths) = store_with(storage, transport);
        store.login(test_user(), "acc-1");

        store.logout().await;

        assert!(store.user().is_none());
        assert!(store.storage().access_token().is_none());
        assert!(store.storage().refresh_token().is_none());
        assert_eq!(*paths.lock().unwrap(), vec!["/login".to_string()]);
    }

    /// Accepts the request and never answers
    struct HangingTransport;

    impl HttpTransport for HangingTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_logout_clears_session_while_backend_hangs() {
        let paths: Paths = Arc::default();
        let recorded = paths.clone();
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let store = SessionStore::new(
            &ClientConfig::default(),
            storage,
            HangingTransport,
            move |path: &str| recorded.lock().unwrap().push(path.to_string()),
        );
        store.login(test_user(), "acc");

        let mut logout = Box::pin(store.logout());
        assert!(futures::poll!(logout.as_mut()).is_pending());

        assert!(store.user().is_none());
        assert!(store.access_token().is_none());
        assert!(store.storage().access_token().is_none());
        assert!(store.storage().refresh_token().is_none());
        assert_eq!(*paths.lock().unwrap(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_without_token_fails_without_network() {
        let (store, _) = store_with(MemoryStorage::new(), MockTransport::new());

        assert!(!store.refresh().await);
        assert_eq!(store.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_success_updates_memory_and_storage() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "old"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new().respond(HttpResponse::json(
            200,
            r#"{"access_token":"new","refresh_token":"ref-2","token_type":"bearer"}"#,
        ));
        let (store, _) = store_with(storage, transport);
        store.login(test_user(), "old");

        assert!(store.refresh().await);

        assert_eq!(store.access_token().as_deref(), Some("new"));
        assert_eq!(store.storage().access_token().as_deref(), Some("new"));
        assert_eq!(store.storage().refresh_token().as_deref(), Some("ref-2"));
        assert_eq!(store.user(), Some(test_user()));
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_when_not_rotated() {
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(200, r#"{"access_token":"new"}"#));
        let (store, _) = store_with(storage, transport);

        assert!(store.refresh().await);
        assert_eq!(store.storage().refresh_token().as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_refresh_rejected_leaves_session_untouched() {
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, r#"{"detail":"Invalid refresh token"}"#));
        let (store, _) = store_with(storage, transport);
        store.login(test_user(), "acc-1");
        let before = store.state();

        assert!(!store.refresh().await);

        assert_eq!(store.state(), before);
        assert_eq!(store.storage().access_token().as_deref(), Some("acc-1"));
        assert_eq!(store.storage().refresh_token().as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_refresh_network_error_returns_false() {
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let transport = MockTransport::new().fail("offline");
        let (store, _) = store_with(storage, transport);

        assert!(!store.refresh().await);
        assert_eq!(store.storage().refresh_token().as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_finishes_unauthenticated() {
        let (store, paths) = store_with(MemoryStorage::new(), MockTransport::new());
        assert!(store.is_loading());

        store.bootstrap(BootstrapMode::Verify).await;

        assert!(!store.is_loading());
        assert!(store.user().is_none());
        assert_eq!(store.transport().request_count(), 0);
        assert!(paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_verifies_stored_token() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(200, profile_json()));
        let (store, _) = store_with(storage, transport);

        store.bootstrap(BootstrapMode::Verify).await;

        let requests = store.transport().requests();
        assert_eq!(requests[0].url, "/api/auth/profile");
        assert_eq!(requests[0].bearer.as_deref(), Some("acc-1"));

        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.user, Some(test_user()));
        assert_eq!(state.access_token.as_deref(), Some("acc-1"));
    }

    #[tokio::test]
    async fn test_bootstrap_refreshes_expired_token_once() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "expired"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, r#"{"detail":"Token expired"}"#))
            .respond(HttpResponse::json(200, r#"{"access_token":"acc-2"}"#))
            .respond(HttpResponse::json(200, profile_json()));
        let (store, _) = store_with(storage, transport);

        store.bootstrap(BootstrapMode::Verify).await;

        let requests = store.transport().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, "/api/auth/refresh");
        assert_eq!(requests[2].bearer.as_deref(), Some("acc-2"));
        assert_eq!(store.user(), Some(test_user()));
        assert_eq!(store.access_token().as_deref(), Some("acc-2"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_bootstrap_clears_tokens_when_refresh_fails() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "expired"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, "{}"))
            .respond(HttpResponse::json(401, "{}"));
        let (store, _) = store_with(storage, transport);

        store.bootstrap(BootstrapMode::Verify).await;

        assert!(store.user().is_none());
        assert!(store.storage().access_token().is_none());
        assert!(store.storage().refresh_token().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_bootstrap_network_error_clears_tokens() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "acc-1"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new().fail("dns failure");
        let (store, paths) = store_with(storage, transport);

        store.bootstrap(BootstrapMode::Verify).await;

        assert_eq!(store.transport().request_count(), 1);
        assert!(store.user().is_none());
        assert!(store.storage().access_token().is_none());
        assert!(store.storage().refresh_token().is_none());
        assert!(!store.is_loading());
        // Redirecting is the route guard's job
        assert!(paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_demo_mode_synthesizes_placeholder() {
        let (store, _) = store_with(MemoryStorage::new(), MockTransport::new());

        store.bootstrap(BootstrapMode::Demo).await;

        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.access_token.as_deref(), Some(DEMO_ACCESS_TOKEN));
        let user = state.user.unwrap();
        assert_eq!(user.email, "demo@treasurymonitor.com");
        assert_eq!(store.transport().request_count(), 0);
    }

    /// Holds every response until the gate is opened
    struct GatedTransport {
        gate: Mutex<Option<futures::channel::oneshot::Receiver<()>>>,
        sent: AtomicU64,
    }

    impl HttpTransport for GatedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(HttpResponse::json(200, r#"{"access_token":"shared"}"#))
        }
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_share_one_request() {
        let (open, gate) = futures::channel::oneshot::channel();
        let transport = GatedTransport {
            gate: Mutex::new(Some(gate)),
            sent: AtomicU64::new(0),
        };
        let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "ref-1")]);
        let store = SessionStore::new(&ClientConfig::default(), storage, transport, |_: &str| {});

        let (first, second, _) = futures::join!(store.refresh(), store.refresh(), async {
            let _ = open.send(());
        });

        assert!(first);
        assert!(second);
        assert_eq!(store.transport().sent.load(Ordering::SeqCst), 1);
        assert_eq!(store.access_token().as_deref(), Some("shared"));
    }
}
