pub mod auth;
pub mod common;
pub mod icon;
pub mod layout;
pub mod pages;

pub use icon::{Icon, icons};
