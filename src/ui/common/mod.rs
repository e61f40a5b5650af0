//! Common reusable UI components shared by the pages

pub mod badge;
pub mod message;
pub mod spinner;

pub use badge::{Badge, BadgeVariant};
pub use message::{ErrorMessage, SuccessMessage};
pub use spinner::{InlineSpinner, LoadingSpinner, Skeleton, Spinner, SpinnerSize};
