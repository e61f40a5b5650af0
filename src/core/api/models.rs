//! Payloads for the billing, monitoring and API key endpoints

use serde::{Deserialize, Serialize};

/// Subscription plan from `GET /billing/plans`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub billing_interval: Option<String>,
    #[serde(default)]
    pub max_addresses: Option<i64>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlanList {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// Active subscription from `GET /billing/subscription`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    pub plan_name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub max_addresses: Option<i64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub current_period_start: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        matches!(self.status.as_str(), "active" | "trialing")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubscriptionEnvelope {
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

/// Request body for `POST /billing/subscribe`
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    pub plan_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
}

/// Result of `POST /billing/subscribe`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Hosted checkout page, when the backend requires one
    #[serde(default)]
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CancelRequest {
    pub immediate: bool,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Payment record from `GET /billing/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub failure_reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PaymentList {
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// Dashboard summary from `GET /metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryMetrics {
    pub total_value: f64,
    pub address_count: u32,
    pub alerts_count: u32,
    pub last_update: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Low => "Low",
            AlertLevel::Medium => "Medium",
            AlertLevel::High => "High",
            AlertLevel::Critical => "Critical",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            AlertLevel::Critical | AlertLevel::High => "bg-red-100 text-red-800 border-red-200",
            AlertLevel::Medium => "bg-yellow-100 text-yellow-800 border-yellow-200",
            AlertLevel::Low => "bg-blue-100 text-blue-800 border-blue-200",
        }
    }
}

/// Alert from `GET /alerts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasuryAlert {
    pub id: String,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlertList {
    #[serde(default)]
    pub alerts: Vec<TreasuryAlert>,
}

/// Request body for `POST /api-keys`
#[derive(Debug, Clone, Serialize, Default)]
pub struct CreateApiKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_days: Option<u32>,
}

/// API key metadata; `key` is only present right after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub last_used: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiKeyList {
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

/// Request body for `POST /monitor`
#[derive(Debug, Clone, Serialize)]
pub struct MonitorRequest {
    pub addresses: Vec<String>,
    pub duration_minutes: u32,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Format integer cents as a dollar amount, e.g. `9900` -> `$99.00`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

/// Format a dollar value without decimals, e.g. `1250000.0` -> `$1,250,000`
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
