//! Browser session lifecycle: credentials, token refresh and route guarding

mod guard;
mod model;
mod storage;
mod store;
mod transport;

pub use guard::{GuardDecision, RouteGuard};
pub use model::{
    BootstrapMode, CredentialPair, LoginRequest, LoginResponse, RegisterRequest, SessionState,
    UpdateProfileRequest, User, demo_user,
};
#[cfg(not(feature = "ssr"))]
pub use storage::BrowserStorage;
pub use storage::{ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY, TokenStorage};
pub use store::{Navigator, SessionStore};
#[cfg(not(feature = "ssr"))]
pub use transport::FetchTransport;
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, OfflineTransport, TransportError,
};

#[cfg(test)]
pub(crate) use transport::mock;
