//! Typed client for the Treasury Monitor REST API
//!
//! Authenticated calls go through a refresh gate: a 401 on a request that
//! carried a bearer token triggers exactly one [`SessionStore::refresh`], and
//! the request is retried once with the new token. Any other failure is
//! returned as an [`ApiError`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{
    AlertList, ApiKey, ApiKeyList, CancelRequest, CreateApiKeyRequest, MessageResponse,
    MonitorRequest, Payment, PaymentList, Plan, PlanList, SubscribeRequest, SubscribeResponse,
    Subscription, SubscriptionEnvelope, TreasuryAlert, TreasuryMetrics,
};
use crate::core::session::{
    HttpRequest, HttpResponse, HttpTransport, LoginRequest, LoginResponse, Method, Navigator,
    RegisterRequest, SessionStore, TokenStorage, TransportError, UpdateProfileRequest, User,
};

/// Whether a call carries the session's bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
}

pub struct ApiClient<S, H, N> {
    session: Arc<SessionStore<S, H, N>>,
}

impl<S, H, N> Clone for ApiClient<S, H, N> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<S, H, N> ApiClient<S, H, N>
where
    S: TokenStorage,
    H: HttpTransport,
    N: Navigator,
{
    pub fn new(session: Arc<SessionStore<S, H, N>>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionStore<S, H, N> {
        &self.session
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::Post, "/auth/login", &body, Access::Public)
            .await
    }

    /// Log in and install the result in the session store
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let resp = self.login(email, password).await?;
        let credentials = resp.credentials();
        self.session.store_refresh_token(&credentials.refresh_token);
        self.session.login(resp.user.clone(), &credentials.access_token);
        Ok(resp.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.send_json(Method::Post, "/auth/register", request, Access::Public)
            .await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get_json("/auth/profile").await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        self.send_json(Method::Put, "/auth/profile", request, Access::Authenticated)
            .await
    }

    // ------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------

    pub async fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        let resp = self
            .execute(Method::Get, "/billing/plans", None, Access::Public)
            .await?;
        decode::<PlanList>(&resp).map(|list| list.plans)
    }

    pub async fn subscribe(&self, request: &SubscribeRequest) -> Result<SubscribeResponse, ApiError> {
        self.send_json(Method::Post, "/billing/subscribe", request, Access::Authenticated)
            .await
    }

    /// Current subscription, `None` for users on the free tier
    pub async fn subscription(&self) -> Result<Option<Subscription>, ApiError> {
        self.get_json::<SubscriptionEnvelope>("/billing/subscription")
            .await
            .map(|envelope| envelope.subscription)
    }

    pub async fn cancel_subscription(&self, immediate: bool) -> Result<MessageResponse, ApiError> {
        self.send_json(
            Method::Post,
            "/billing/subscription/cancel",
            &CancelRequest { immediate },
            Access::Authenticated,
        )
        .await
    }

    pub async fn reactivate_subscription(&self) -> Result<MessageResponse, ApiError> {
        let resp = self
            .execute(
                Method::Post,
                "/billing/subscription/reactivate",
                None,
                Access::Authenticated,
            )
            .await?;
        decode(&resp)
    }

    pub async fn payment_history(&self, limit: u32) -> Result<Vec<Payment>, ApiError> {
        self.get_json::<PaymentList>(&format!("/billing/history?limit={}", limit))
            .await
            .map(|list| list.payments)
    }

    // ------------------------------------------------------------------
    // Monitoring
    // ------------------------------------------------------------------

    pub async fn metrics(&self) -> Result<TreasuryMetrics, ApiError> {
        self.get_json("/metrics").await
    }

    pub async fn alerts(&self) -> Result<Vec<TreasuryAlert>, ApiError> {
        self.get_json::<AlertList>("/alerts")
            .await
            .map(|list| list.alerts)
    }

    pub async fn monitor_addresses(
        &self,
        addresses: Vec<String>,
        duration_minutes: u32,
    ) -> Result<serde_json::Value, ApiError> {
        let body = MonitorRequest {
            addresses,
            duration_minutes,
        };
        self.send_json(Method::Post, "/monitor", &body, Access::Authenticated)
            .await
    }

    // ------------------------------------------------------------------
    // API keys
    // ------------------------------------------------------------------

    pub async fn create_api_key(&self, request: &CreateApiKeyRequest) -> Result<ApiKey, ApiError> {
        self.send_json(Method::Post, "/api-keys", request, Access::Authenticated)
            .await
    }

    pub async fn api_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        self.get_json::<ApiKeyList>("/api-keys")
            .await
            .map(|list| list.api_keys)
    }

    pub async fn revoke_api_key(&self, key_id: &str) -> Result<(), ApiError> {
        self.execute(
            Method::Delete,
            &format!("/api-keys/{}", key_id),
            None,
            Access::Authenticated,
        )
        .await
        .map(|_| ())
    }

    pub async fn api_usage(&self, days: u32) -> Result<serde_json::Value, ApiError> {
        self.get_json::<serde_json::Value>(&format!("/api-keys/usage?days={}", days))
            .await
            .map(|mut body| match body.get_mut("usage") {
                Some(usage) => usage.take(),
                None => body,
            })
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self
            .execute(Method::Get, path, None, Access::Authenticated)
            .await?;
        decode(&resp)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        access: Access,
    ) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        let resp = self.execute(method, path, Some(body), access).await?;
        decode(&resp)
    }

    /// Send a request, refreshing the session once on 401
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        access: Access,
    ) -> Result<HttpResponse, ApiError> {
        let build = |bearer: Option<String>| HttpRequest {
            method,
            url: self.session.api_url(path),
            bearer,
            body: body.clone(),
        };

        let token = match access {
            Access::Authenticated => self.session.bearer_token(),
            Access::Public => None,
        };
        let resp = self.session.transport().send(build(token.clone())).await?;

        if resp.status == 401 && token.is_some() && self.session.refresh().await {
            let retried = self
                .session
                .transport()
                .send(build(self.session.bearer_token()))
                .await?;
            return check(retried);
        }

        check(resp)
    }
}

fn check(resp: HttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::from_response(&resp))
    }
}

fn decode<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClientConfig;
    use crate::core::session::mock::MockTransport;
    use crate::core::session::{ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY};

    type TestClient = ApiClient<MemoryStorage, MockTransport, fn(&str)>;

    fn no_nav(_: &str) {}

    fn client(storage: MemoryStorage, transport: MockTransport) -> TestClient {
        let store = SessionStore::new(
            &ClientConfig::default(),
            storage,
            transport,
            no_nav as fn(&str),
        );
        ApiClient::new(Arc::new(store))
    }

    fn user_json() -> &'static str {
        r#"{"id":"u-1","email":"t@example.com","first_name":"Tess","is_active":true,"created_at":"2025-01-01T00:00:00Z"}"#
    }

    #[tokio::test]
    async fn test_authenticated_call_sends_bearer() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(
            200,
            r#"{"totalValue":10,"addressCount":1,"alertsCount":0,"lastUpdate":"now"}"#,
        ));
        let api = client(storage, transport);

        let metrics = api.metrics().await.unwrap();

        assert_eq!(metrics.address_count, 1);
        let requests = api.session().transport().requests();
        assert_eq!(requests[0].url, "/api/metrics");
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].bearer.as_deref(), Some("acc-1"));
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_retries() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "expired"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, r#"{"detail":"Token expired"}"#))
            .respond(HttpResponse::json(200, r#"{"access_token":"acc-2"}"#))
            .respond(HttpResponse::json(200, r#"{"alerts":[]}"#));
        let api = client(storage, transport);

        let alerts = api.alerts().await.unwrap();

        assert!(alerts.is_empty());
        let requests = api.session().transport().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, "/api/auth/refresh");
        assert_eq!(requests[2].url, "/api/alerts");
        assert_eq!(requests[2].bearer.as_deref(), Some("acc-2"));
    }

    #[tokio::test]
    async fn test_second_401_is_not_retried_again() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "expired"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, "{}"))
            .respond(HttpResponse::json(200, r#"{"access_token":"acc-2"}"#))
            .respond(HttpResponse::json(401, r#"{"detail":"Still unauthorized"}"#));
        let api = client(storage, transport);

        let err = api.metrics().await.unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "Still unauthorized");
        assert_eq!(api.session().transport().request_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_surfaces_first_401() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "expired")]);
        let transport =
            MockTransport::new().respond(HttpResponse::json(401, r#"{"detail":"Token expired"}"#));
        let api = client(storage, transport);

        let err = api.profile().await.unwrap_err();

        assert_eq!(err.status(), 401);
        assert_eq!(err.to_string(), "Token expired");
        // No refresh token stored, so no refresh request
        assert_eq!(api.session().transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_403_does_not_refresh() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "acc-1"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(403, r#"{"detail":"Admin only"}"#));
        let api = client(storage, transport);

        let err = api.api_keys().await.unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(api.session().transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_public_call_has_no_bearer_and_no_refresh() {
        let storage = MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "stale"),
            (REFRESH_TOKEN_KEY, "ref-1"),
        ]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(401, r#"{"detail":"Invalid email or password"}"#));
        let api = client(storage, transport);

        let err = api.login("a@b.co", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        let requests = api.session().transport().requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_installs_session_and_tokens() {
        let body = format!(
            r#"{{"user":{},"access_token":"acc-1","refresh_token":"ref-1","token_type":"bearer"}}"#,
            user_json()
        );
        let transport = MockTransport::new().respond(HttpResponse::json(200, body));
        let api = client(MemoryStorage::new(), transport);

        let user = api.sign_in("t@example.com", "s3cret-pass").await.unwrap();

        assert_eq!(user.id, "u-1");
        let session = api.session();
        assert_eq!(session.user(), Some(user));
        assert_eq!(session.access_token().as_deref(), Some("acc-1"));
        assert_eq!(session.storage().refresh_token().as_deref(), Some("ref-1"));
        let requests = session.transport().requests();
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"email":"t@example.com","password":"s3cret-pass"}"#)
        );
    }

    #[tokio::test]
    async fn test_network_failure_maps_to_network_error() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().fail("");
        let api = client(storage, transport);

        let err = api.subscription().await.unwrap_err();

        assert_eq!(err, ApiError::Network("Network request failed".to_string()));
        assert_eq!(err.status(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_decode_error() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::text(200, "<html>"));
        let api = client(storage, transport);

        assert!(matches!(api.profile().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_payment_history_passes_limit() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(
            200,
            r#"{"payments":[{"id":"pi_1","amount_cents":9900,"currency":"usd","status":"succeeded","created_at":"2025-01-01"}]}"#,
        ));
        let api = client(storage, transport);

        let payments = api.payment_history(5).await.unwrap();

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount_cents, 9900);
        assert_eq!(
            api.session().transport().requests()[0].url,
            "/api/billing/history?limit=5"
        );
    }

    #[tokio::test]
    async fn test_monitor_addresses_posts_addresses_and_duration() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(
            200,
            r#"{"status":"monitoring","addresses":2}"#,
        ));
        let api = client(storage, transport);

        let result = api
            .monitor_addresses(vec!["addr1q".to_string(), "addr1z".to_string()], 30)
            .await
            .unwrap();

        assert_eq!(result["status"], "monitoring");
        let request = &api.session().transport().requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "/api/monitor");
        assert_eq!(request.bearer.as_deref(), Some("acc-1"));
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"addresses":["addr1q","addr1z"],"duration_minutes":30}"#)
        );
    }

    #[tokio::test]
    async fn test_create_api_key_returns_secret_once() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::json(
            201,
            r#"{"id":"key-1","name":"ci","key":"tm_live_secret","key_prefix":"tm_live","permissions":["read"]}"#,
        ));
        let api = client(storage, transport);

        let request = CreateApiKeyRequest {
            name: Some("ci".to_string()),
            permissions: vec!["read".to_string()],
            expires_days: None,
        };
        let key = api.create_api_key(&request).await.unwrap();

        assert_eq!(key.id, "key-1");
        assert_eq!(key.key.as_deref(), Some("tm_live_secret"));
        let sent = &api.session().transport().requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/api-keys");
        // unset expiry is omitted from the body
        assert_eq!(sent.body.as_deref(), Some(r#"{"name":"ci","permissions":["read"]}"#));
    }

    #[tokio::test]
    async fn test_revoke_api_key_ignores_body() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new().respond(HttpResponse::text(204, ""));
        let api = client(storage, transport);

        api.revoke_api_key("key-9").await.unwrap();

        let request = &api.session().transport().requests()[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "/api/api-keys/key-9");
    }

    #[tokio::test]
    async fn test_api_usage_unwraps_envelope() {
        let storage = MemoryStorage::with_entries([(ACCESS_TOKEN_KEY, "acc-1")]);
        let transport = MockTransport::new()
            .respond(HttpResponse::json(200, r#"{"usage":{"total_requests":12}}"#));
        let api = client(storage, transport);

        let usage = api.api_usage(7).await.unwrap();

        assert_eq!(usage["total_requests"], 12);
    }
}
