//! Access checks for role-gated views.

use super::Session;
use crate::models::Role;

/// Outcome of an access check. The redirect variants name the navigation the
/// caller should perform; the check itself has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToHome,
}

/// Decide whether the current session may enter a view, optionally requiring
/// a role. Pure predicate over session state.
pub fn check_access(session: &Session, required_role: Option<Role>) -> Access {
    if !session.is_authenticated() {
        return Access::RedirectToLogin;
    }

    if let Some(required) = required_role {
        if session.user().map(|u| u.role) != Some(required) {
            return Access::RedirectToHome;
        }
    }

    Access::Granted
}
