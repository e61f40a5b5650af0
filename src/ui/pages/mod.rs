//! Application pages
//!
//! Public: login, register, documentation search. Everything else is
//! mounted behind `RequireAuth` in the route table.

mod billing;
mod dashboard;
mod docs_search;
mod login;
mod not_found;
mod profile;
mod register;

pub use billing::BillingPage;
pub use dashboard::DashboardPage;
pub use docs_search::{DocsSearch, DocsSearchPage};
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
