use crate::models::{AuthUser, Session, SignUpOutcome, UserMetadata, UserUpdate};
use crate::offline::OfflineAuthService;
use crate::service::{AuthError, SupabaseAuthService};

/// The auth provider the app talks to, chosen at startup
#[derive(Debug, Clone)]
pub enum AuthClient {
    Supabase(SupabaseAuthService),
    Offline(OfflineAuthService),
}

macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AuthClient::Supabase(s) => s.$method($($arg),*).await,
            AuthClient::Offline(s) => s.$method($($arg),*).await,
        }
    };
}

impl AuthClient {
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AuthError> {
        delegate!(self, sign_up(email, password, metadata))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        delegate!(self, sign_in(email, password))
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        delegate!(self, refresh(refresh_token))
    }

    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        delegate!(self, get_user(access_token))
    }

    pub async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<AuthUser, AuthError> {
        delegate!(self, update_user(access_token, update))
    }

    /// Offline sessions have nothing to revoke
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        match self {
            AuthClient::Supabase(s) => s.sign_out(access_token).await,
            AuthClient::Offline(_) => Ok(()),
        }
    }
}
