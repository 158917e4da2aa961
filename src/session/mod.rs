//! Client-side session state.
//!
//! The session is an explicit object handed to whoever needs it rather than
//! ambient global state. Every transition writes a full, consistent set of
//! fields; there are no partial updates.

mod guard;
pub mod token_store;

pub use guard::{check_access, Access};
pub use token_store::TokenStore;

use crate::models::User;

/// Message shown after the backend rejects the stored credential.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Where the session currently sits in the login lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Signal published when the backend answers 401 to any request.
///
/// The HTTP layer never navigates on its own; it clears the stored credential,
/// sends this on the expiry channel, and leaves the reaction to the top-level
/// application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionExpired;

/// The current authenticated identity, or lack of one.
///
/// Invariant: [`Session::is_authenticated`] is true iff both `user` and
/// `token` are present, iff the phase is `Authenticated`.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    user: Option<User>,
    token: Option<String>,
    error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh, anonymous session: everything absent.
    pub fn new() -> Self {
        Self {
            phase: Phase::Anonymous,
            user: None,
            token: None,
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Authenticating
    }

    /// A login attempt has been submitted.
    pub fn login_started(&mut self) {
        self.phase = Phase::Authenticating;
        self.user = None;
        self.token = None;
        self.error = None;
    }

    /// The backend accepted the credentials.
    pub fn login_succeeded(&mut self, user: User, token: String) {
        self.phase = Phase::Authenticated;
        self.user = Some(user);
        self.token = Some(token);
        self.error = None;
    }

    /// The backend rejected the credentials; back to anonymous with the
    /// normalized message.
    pub fn login_failed(&mut self, message: impl Into<String>) {
        self.phase = Phase::Anonymous;
        self.user = None;
        self.token = None;
        self.error = Some(message.into());
    }

    /// Rebuild an authenticated session from state persisted by a previous
    /// run. Same invariant as `login_succeeded`.
    pub fn resumed(&mut self, user: User, token: String) {
        self.login_succeeded(user, token);
    }

    /// Explicit logout. The caller clears the token store in the same step.
    pub fn logged_out(&mut self) {
        self.phase = Phase::Anonymous;
        self.user = None;
        self.token = None;
        self.error = None;
    }

    /// The exceptional 401 path. Ends in the same place as `logged_out` but
    /// records why the user is back at the login screen.
    pub fn expired(&mut self) {
        self.phase = Phase::Anonymous;
        self.user = None;
        self.token = None;
        self.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn test_user(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            username: "ama".to_string(),
            email: "ama@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_initial_state_is_anonymous() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Anonymous);
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_login_success_flow() {
        let mut session = Session::new();

        session.login_started();
        assert_eq!(session.phase(), Phase::Authenticating);
        assert!(session.is_loading());
        assert!(!session.is_authenticated());

        session.login_succeeded(test_user(Role::User), "tok".to_string());
        assert_eq!(session.phase(), Phase::Authenticated);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("ama"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_login_failure_returns_to_anonymous_with_error() {
        let mut session = Session::new();
        session.login_started();
        session.login_failed("Invalid credentials");

        assert_eq!(session.phase(), Phase::Anonymous);
        assert!(!session.is_authenticated());
        assert_eq!(session.error(), Some("Invalid credentials"));
        assert!(session.user().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_login_clears_previous_error() {
        let mut session = Session::new();
        session.login_failed("Invalid credentials");
        session.login_started();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = Session::new();
        session.login_succeeded(test_user(Role::Admin), "tok".to_string());
        session.logged_out();

        assert_eq!(session.phase(), Phase::Anonymous);
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_expiry_records_a_message() {
        let mut session = Session::new();
        session.login_succeeded(test_user(Role::User), "tok".to_string());
        session.expired();

        assert!(!session.is_authenticated());
        assert_eq!(session.error(), Some(SESSION_EXPIRED_MESSAGE));
    }

    #[test]
    fn test_authenticated_iff_user_and_token_present() {
        // Every transition must leave the invariant intact.
        let mut session = Session::new();
        for step in 0..6 {
            match step {
                0 => session.login_started(),
                1 => session.login_succeeded(test_user(Role::User), "tok".to_string()),
                2 => session.expired(),
                3 => session.resumed(test_user(Role::Admin), "tok2".to_string()),
                4 => session.logged_out(),
                _ => session.login_failed("nope"),
            }
            assert_eq!(
                session.is_authenticated(),
                session.user().is_some() && session.token().is_some()
            );
            assert_eq!(
                session.is_authenticated(),
                session.phase() == Phase::Authenticated
            );
        }
    }
}
