//! Local account store used when the app runs without a hosted project
//!
//! Accounts only live for the lifetime of the process. Sign-up signs the
//! user in immediately; tokens are opaque strings bound to the account.

use crate::models::{AuthUser, Session, SignUpOutcome, UserMetadata, UserUpdate};
use crate::service::AuthError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const TOKEN_PREFIX: &str = "offline-";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Clone, Default)]
pub struct OfflineAuthService {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
}

impl OfflineAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account with a fixed user id
    pub async fn seed_account(&self, user_id: &str, email: &str, password: &str, metadata: UserMetadata) {
        self.accounts.lock().await.insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                user: AuthUser {
                    id: user_id.to_string(),
                    email: Some(email.to_string()),
                    user_metadata: metadata,
                },
            },
        );
    }

    fn session_for(user: &AuthUser) -> Session {
        Session {
            access_token: format!("{}{}", TOKEN_PREFIX, user.id),
            refresh_token: format!("{}refresh-{}", TOKEN_PREFIX, user.id),
            expires_in: 0,
            expires_at: None,
            user: user.clone(),
        }
    }

    fn user_id_from_token(token: &str) -> Result<&str, AuthError> {
        token
            .strip_prefix(TOKEN_PREFIX)
            .map(|rest| rest.strip_prefix("refresh-").unwrap_or(rest))
            .ok_or(AuthError::SessionExpired)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AuthError> {
        let key = email.to_lowercase();
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::UserAlreadyRegistered);
        }

        let user = AuthUser {
            id: format!("local-{}", accounts.len() + 1),
            email: Some(email.to_string()),
            user_metadata: metadata,
        };
        accounts.insert(
            key,
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );

        Ok(SignUpOutcome::SignedIn(Self::session_for(&user)))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self.accounts.lock().await;
        match accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => Ok(Self::session_for(&account.user)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let user = self.get_user(refresh_token).await?;
        Ok(Self::session_for(&user))
    }

    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let user_id = Self::user_id_from_token(access_token)?;
        self.accounts
            .lock()
            .await
            .values()
            .find(|a| a.user.id == user_id)
            .map(|a| a.user.clone())
            .ok_or(AuthError::SessionExpired)
    }

    pub async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<AuthUser, AuthError> {
        let user_id = Self::user_id_from_token(access_token)?.to_string();
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .values_mut()
            .find(|a| a.user.id == user_id)
            .ok_or(AuthError::SessionExpired)?;

        if let Some(password) = &update.password {
            account.password = password.clone();
        }
        if let Some(data) = &update.data {
            if data.full_name.is_some() {
                account.user.user_metadata.full_name = data.full_name.clone();
            }
            if data.avatar_url.is_some() {
                account.user.user_metadata.avatar_url = data.avatar_url.clone();
            }
        }
        Ok(account.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = OfflineAuthService::new();
        let outcome = auth
            .sign_up("Ann@Example.com", "secret1", UserMetadata::default())
            .await
            .unwrap();
        let SignUpOutcome::SignedIn(session) = outcome else {
            panic!("offline sign-up signs in");
        };

        let again = auth.sign_in("ann@example.com", "secret1").await.unwrap();
        assert_eq!(again.user.id, session.user.id);
        assert_eq!(
            auth.sign_in("ann@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.sign_up("ann@example.com", "x", UserMetadata::default())
                .await,
            Err(AuthError::UserAlreadyRegistered)
        );
    }

    #[tokio::test]
    async fn test_update_password() {
        let auth = OfflineAuthService::new();
        auth.seed_account("u1", "a@b.c", "old-pass", UserMetadata::default())
            .await;
        let session = auth.sign_in("a@b.c", "old-pass").await.unwrap();

        auth.update_user(
            &session.access_token,
            &UserUpdate {
                password: Some("new-pass".to_string()),
                data: None,
            },
        )
        .await
        .unwrap();

        assert!(auth.sign_in("a@b.c", "new-pass").await.is_ok());
        assert_eq!(auth.get_user("garbage").await, Err(AuthError::SessionExpired));
    }
}
