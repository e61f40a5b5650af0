//! Route guard decisions
//!
//! Pure state machine behind `<RequireAuth>`: given the loading flag and
//! whether a session exists, decide what a protected route renders and
//! whether to send the user to the login page.

/// What a protected route should do for the current auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still running: show the placeholder
    Placeholder,
    /// No session: navigate to login (once) and render nothing
    Redirect,
    /// Render nothing, a redirect was already issued
    Blank,
    /// Session present: render the protected content
    Render,
}

impl GuardDecision {
    pub fn renders_content(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    pub fn should_navigate(&self) -> bool {
        matches!(self, GuardDecision::Redirect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteGuard {
    redirected: bool,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the guard after a change of `loading` or session presence.
    ///
    /// Only the first unauthenticated evaluation yields
    /// [`GuardDecision::Redirect`]; later ones yield [`GuardDecision::Blank`]
    /// until a session appears again.
    pub fn evaluate(&mut self, loading: bool, has_session: bool) -> GuardDecision {
        if loading {
            return GuardDecision::Placeholder;
        }

        if has_session {
            self.redirected = false;
            return GuardDecision::Render;
        }

        if self.redirected {
            GuardDecision::Blank
        } else {
            self.redirected = true;
            GuardDecision::Redirect
        }
    }

    pub fn has_redirected(&self) -> bool {
        self.redirected
    }
}
