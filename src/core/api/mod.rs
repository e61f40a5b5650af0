//! Treasury Monitor REST API: typed client, payloads and errors

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::{ApiError, NETWORK_FAILURE, UNEXPECTED_ERROR, primary_error};
pub use models::{
    AlertLevel, ApiKey, CreateApiKeyRequest, MessageResponse, MonitorRequest, Payment, Plan,
    SubscribeRequest, SubscribeResponse, Subscription, TreasuryAlert, TreasuryMetrics,
    format_cents, format_usd,
};
