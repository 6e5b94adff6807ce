//! Session state shared with the UI
//!
//! The state is only changed through [`reduce`]; every auth change (restore,
//! sign-in, sign-out, profile update, role lookup) is expressed as a
//! [`SessionEvent`].

use crate::models::{AuthUser, Session};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub session: Option<Session>,
    /// Result of the profile role lookup for the current user
    pub is_admin: bool,
    /// Set once the stored session has been checked at startup
    pub restored: bool,
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Result of loading the persisted session at startup
    Restored(Option<Session>),
    SignedIn(Session),
    SignedOut,
    /// Tokens were refreshed for the same user
    TokenRefreshed(Session),
    UserUpdated(AuthUser),
    /// Outcome of the role lookup for `user_id`
    RoleResolved { user_id: String, is_admin: bool },
}

/// Applies one auth event to the session state
pub fn reduce(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        // A sign-in or sign-out already decided the session
        SessionEvent::Restored(_) if state.restored => state.clone(),
        SessionEvent::Restored(session) => SessionState {
            session,
            is_admin: false,
            restored: true,
        },
        SessionEvent::SignedIn(session) => {
            let same_user = state.user_id() == Some(session.user.id.as_str());
            SessionState {
                is_admin: same_user && state.is_admin,
                session: Some(session),
                restored: true,
            }
        }
        SessionEvent::SignedOut => SessionState {
            session: None,
            is_admin: false,
            restored: true,
        },
        SessionEvent::TokenRefreshed(session) => {
            if state.user_id() == Some(session.user.id.as_str()) {
                SessionState {
                    session: Some(session),
                    ..state.clone()
                }
            } else {
                reduce(state, SessionEvent::SignedIn(session))
            }
        }
        SessionEvent::UserUpdated(user) => {
            let mut next = state.clone();
            if let Some(session) = next.session.as_mut() {
                if session.user.id == user.id {
                    session.user = user;
                }
            }
            next
        }
        SessionEvent::RoleResolved { user_id, is_admin } => {
            if state.user_id() == Some(user_id.as_str()) {
                SessionState {
                    is_admin,
                    ..state.clone()
                }
            } else {
                // Lookup finished after the user changed
                state.clone()
            }
        }
    }
}
