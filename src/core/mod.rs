//! Framework-independent logic: session state, API access, documentation
//! search and server configuration

pub mod api;
pub mod config;
pub mod docs_search;
#[cfg(feature = "ssr")]
pub mod proxy;
pub mod session;
