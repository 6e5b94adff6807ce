//! Session lifecycle: restore at startup, persist after sign-in, sign-out,
//! and the role lookup that decides access to the admin dashboard.

use crate::config::ContestConfig;
use crate::database::session_store;
use crate::error::AppError;
use contest_backend::{AnyBackend, ContestBackend, ProfileRecord, Role};
use rusqlite::Connection;
use supabase_auth::{AuthClient, AuthError, AuthUser, Session, SessionState, UserMetadata};

/// User id of the administrator created in memory mode
pub const DEMO_ADMIN_ID: &str = "demo-admin";

/// Backend copy that acts on behalf of the signed-in user
pub fn authorized<B: ContestBackend>(backend: &B, state: &SessionState) -> B {
    backend.with_access_token(state.access_token().map(str::to_string))
}

/// Loads the stored session and checks it with the auth provider.
///
/// Expired sessions are refreshed. A session the provider rejects is removed;
/// when the provider cannot be reached the stored session is kept as is.
pub async fn restore_session(
    conn: &Connection,
    auth: &AuthClient,
    now_unix: i64,
) -> Result<Option<Session>, AppError> {
    let Some(stored) = session_store::load_session(conn)? else {
        return Ok(None);
    };

    let checked = if stored.is_expired(now_unix) {
        log::info!("Stored session expired, refreshing");
        auth.refresh(&stored.refresh_token).await
    } else {
        auth.get_user(&stored.access_token).await.map(|user| Session {
            user,
            ..stored.clone()
        })
    };

    match checked {
        Ok(session) => {
            session_store::save_session(conn, &session)?;
            Ok(Some(session))
        }
        Err(AuthError::NetworkError(e)) => {
            log::warn!("Auth provider unreachable, keeping stored session: {}", e);
            Ok(Some(stored))
        }
        Err(e) => {
            log::info!("Stored session rejected: {}", e);
            session_store::clear_session(conn)?;
            Ok(None)
        }
    }
}

pub fn persist_session(conn: &Connection, session: &Session) -> Result<(), AppError> {
    session_store::save_session(conn, session)
}

/// Revokes the session at the provider (best effort) and forgets it locally
pub async fn sign_out(conn: &Connection, auth: &AuthClient, session: &Session) -> Result<(), AppError> {
    if let Err(e) = auth.sign_out(&session.access_token).await {
        log::warn!("Sign-out request failed: {}", e);
    }
    session_store::clear_session(conn)
}

/// Whether the profile of `user_id` carries the admin role; lookup failures
/// count as "not admin"
pub async fn resolve_role<B: ContestBackend>(backend: &B, user_id: &str) -> bool {
    match backend.get_profile(user_id).await {
        Ok(profile) => profile.is_some_and(|p| p.is_admin()),
        Err(e) => {
            log::warn!("Role lookup for {} failed: {}", user_id, e);
            false
        }
    }
}

fn profile_for(user: &AuthUser, role: Role) -> ProfileRecord {
    ProfileRecord {
        id: user.id.clone(),
        full_name: user.user_metadata.full_name.clone(),
        username: user.user_metadata.username.clone(),
        email: user.email.clone(),
        avatar_url: user.user_metadata.avatar_url.clone(),
        role,
    }
}

/// The hosted project creates profile rows itself; in memory mode the app
/// has to add them for new accounts
pub async fn ensure_profile(backend: &AnyBackend, user: &AuthUser) -> Result<(), AppError> {
    if let AnyBackend::Memory(memory) = backend {
        if memory.get_profile(&user.id).await?.is_none() {
            memory.insert_profile(profile_for(user, Role::User)).await;
            log::debug!("Created demo profile for {}", user.id);
        }
    }
    Ok(())
}

/// Creates the administrator account of memory mode
pub async fn seed_demo_admin(backend: &AnyBackend, auth: &AuthClient, config: &ContestConfig) {
    let (AnyBackend::Memory(memory), AuthClient::Offline(offline)) = (backend, auth) else {
        return;
    };

    let metadata = UserMetadata {
        full_name: Some("Ban Tổ Chức".to_string()),
        username: Some("admin".to_string()),
        avatar_url: Some(supabase_auth::default_avatar_url("Ban To Chuc")),
    };
    offline
        .seed_account(
            DEMO_ADMIN_ID,
            &config.demo_admin_email,
            &config.demo_admin_password,
            metadata.clone(),
        )
        .await;

    let user = AuthUser {
        id: DEMO_ADMIN_ID.to_string(),
        email: Some(config.demo_admin_email.clone()),
        user_metadata: metadata,
    };
    memory.insert_profile(profile_for(&user, Role::Admin)).await;
    log::info!("Demo admin available as {}", config.demo_admin_email);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;
    use contest_backend::MemoryBackend;
    use supabase_auth::OfflineAuthService;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    async fn demo() -> (AnyBackend, AuthClient, ContestConfig) {
        let backend = AnyBackend::Memory(MemoryBackend::new());
        let auth = AuthClient::Offline(OfflineAuthService::new());
        let config = ContestConfig::default();
        seed_demo_admin(&backend, &auth, &config).await;
        (backend, auth, config)
    }

    #[tokio::test]
    async fn test_demo_admin_signs_in_with_admin_role() {
        let (backend, auth, config) = demo().await;
        let session = auth
            .sign_in(&config.demo_admin_email, &config.demo_admin_password)
            .await
            .unwrap();

        assert_eq!(session.user.id, DEMO_ADMIN_ID);
        assert!(resolve_role(&backend, DEMO_ADMIN_ID).await);
        assert!(!resolve_role(&backend, "someone-else").await);
    }

    #[tokio::test]
    async fn test_restore_valid_session() {
        let (_, auth, config) = demo().await;
        let conn = setup();
        let session = auth
            .sign_in(&config.demo_admin_email, &config.demo_admin_password)
            .await
            .unwrap();
        persist_session(&conn, &session).unwrap();

        let restored = restore_session(&conn, &auth, 0).await.unwrap().unwrap();
        assert_eq!(restored.user.id, DEMO_ADMIN_ID);
    }

    #[tokio::test]
    async fn test_restore_drops_rejected_session() {
        let (_, auth, config) = demo().await;
        let conn = setup();
        let session = auth
            .sign_in(&config.demo_admin_email, &config.demo_admin_password)
            .await
            .unwrap();
        persist_session(&conn, &session).unwrap();

        // a fresh account store does not know the stored user
        let other = AuthClient::Offline(OfflineAuthService::new());
        assert_eq!(restore_session(&conn, &other, 0).await.unwrap(), None);
        assert_eq!(session_store::load_session(&conn).unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_store() {
        let (_, auth, config) = demo().await;
        let conn = setup();
        let session = auth
            .sign_in(&config.demo_admin_email, &config.demo_admin_password)
            .await
            .unwrap();
        persist_session(&conn, &session).unwrap();

        sign_out(&conn, &auth, &session).await.unwrap();
        assert_eq!(restore_session(&conn, &auth, 0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ensure_profile_creates_user_row_once() {
        let (backend, auth, _) = demo().await;
        let user = match auth
            .sign_up(
                "lan@example.com",
                "secret1",
                supabase_auth::registration_metadata("lan@example.com", "Lan"),
            )
            .await
            .unwrap()
        {
            supabase_auth::SignUpOutcome::SignedIn(session) => session.user,
            supabase_auth::SignUpOutcome::ConfirmationRequired(user) => user,
        };

        ensure_profile(&backend, &user).await.unwrap();
        ensure_profile(&backend, &user).await.unwrap();

        let profiles = backend.list_profiles().await.unwrap();
        assert_eq!(profiles.iter().filter(|p| p.id == user.id).count(), 1);
        assert!(!resolve_role(&backend, &user.id).await);
    }
}
