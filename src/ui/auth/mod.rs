//! Authentication UI: context, route guard and account forms

mod context;
mod login_form;
mod register_form;
mod require_auth;
mod user_menu;
mod validation;

pub use context::{
    AuthContext, ConsoleApi, ConsoleSession, RedirectQueue, provide_auth_context,
    use_auth_context,
};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use require_auth::RequireAuth;
pub use user_menu::UserMenu;
pub use validation::{optional_field, validate_email};
