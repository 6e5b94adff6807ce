use crate::error::AppError;
use rusqlite::{params, Connection, OptionalExtension};
use supabase_auth::{AuthUser, Session};

/// Stores the session, replacing any previous one
pub fn save_session(conn: &Connection, session: &Session) -> Result<(), AppError> {
    let user_json = serde_json::to_string(&session.user)
        .map_err(|e| AppError::Other(format!("Failed to encode user: {}", e)))?;

    conn.execute(
        "INSERT INTO auth_session (id, user_id, access_token, refresh_token, expires_at, user_json)
         VALUES (1, ?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            access_token = excluded.access_token,
            refresh_token = excluded.refresh_token,
            expires_at = excluded.expires_at,
            user_json = excluded.user_json,
            updated_at = CURRENT_TIMESTAMP",
        params![
            session.user.id,
            session.access_token,
            session.refresh_token,
            session.expires_at,
            user_json,
        ],
    )?;

    log::debug!("Session for {} saved", session.user.id);
    Ok(())
}

/// Loads the stored session, if any
pub fn load_session(conn: &Connection) -> Result<Option<Session>, AppError> {
    let row = conn
        .query_row(
            "SELECT access_token, refresh_token, expires_at, user_json FROM auth_session WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((access_token, refresh_token, expires_at, user_json)) = row else {
        return Ok(None);
    };

    let user: AuthUser = match serde_json::from_str(&user_json) {
        Ok(user) => user,
        Err(e) => {
            log::warn!("Discarding unreadable stored session: {}", e);
            clear_session(conn)?;
            return Ok(None);
        }
    };

    Ok(Some(Session {
        access_token,
        refresh_token,
        expires_in: 0,
        expires_at,
        user,
    }))
}

pub fn clear_session(conn: &Connection) -> Result<(), AppError> {
    conn.execute("DELETE FROM auth_session", [])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;
    use supabase_auth::UserMetadata;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn session(user_id: &str, token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: format!("refresh-{}", token),
            expires_in: 3600,
            expires_at: Some(1_800_000_000),
            user: AuthUser {
                id: user_id.to_string(),
                email: Some(format!("{}@example.com", user_id)),
                user_metadata: UserMetadata {
                    full_name: Some("Lan Nguyen".to_string()),
                    ..Default::default()
                },
            },
        }
    }

    #[test]
    fn test_empty_store_has_no_session() {
        let conn = setup();
        assert_eq!(load_session(&conn).unwrap(), None);
    }

    #[test]
    fn test_save_and_load_session() {
        let conn = setup();
        save_session(&conn, &session("u1", "a")).unwrap();

        let loaded = load_session(&conn).unwrap().unwrap();
        assert_eq!(loaded.access_token, "a");
        assert_eq!(loaded.refresh_token, "refresh-a");
        assert_eq!(loaded.expires_at, Some(1_800_000_000));
        assert_eq!(loaded.user.user_metadata.full_name.as_deref(), Some("Lan Nguyen"));
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let conn = setup();
        save_session(&conn, &session("u1", "a")).unwrap();
        save_session(&conn, &session("u2", "b")).unwrap();

        let loaded = load_session(&conn).unwrap().unwrap();
        assert_eq!(loaded.user.id, "u2");

        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM auth_session", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_clear_session() {
        let conn = setup();
        save_session(&conn, &session("u1", "a")).unwrap();
        clear_session(&conn).unwrap();
        assert_eq!(load_session(&conn).unwrap(), None);
    }

    #[test]
    fn test_corrupt_user_is_discarded() {
        let conn = setup();
        conn.execute(
            "INSERT INTO auth_session (id, user_id, access_token, refresh_token, user_json)
             VALUES (1, 'u1', 'a', 'r', 'not json')",
            [],
        )
        .unwrap();

        assert_eq!(load_session(&conn).unwrap(), None);
        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM auth_session", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }
}
