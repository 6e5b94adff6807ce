use crate::error::AppError;
use supabase_auth::{AuthClient, AuthUser, UserMetadata, UserUpdate};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Input of the profile dialog
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub full_name: String,
    /// Left empty to keep the current password
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn for_user(user: &AuthUser) -> Self {
        Self {
            full_name: user.user_metadata.full_name.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// Returns the new password, or `None` when the password stays unchanged
pub fn validate_password_change(new: &str, confirm: &str) -> Result<Option<String>, AppError> {
    if new.is_empty() && confirm.is_empty() {
        return Ok(None);
    }
    if new != confirm {
        return Err(AppError::Validation("Mật khẩu mới không khớp".to_string()));
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Mật khẩu phải có ít nhất 6 ký tự".to_string(),
        ));
    }
    Ok(Some(new.to_string()))
}

/// Builds the update request, keeping the metadata fields the form does not edit
pub fn build_update(form: &ProfileForm, current: &UserMetadata) -> Result<UserUpdate, AppError> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("Vui lòng nhập họ và tên.".to_string()));
    }
    let password = validate_password_change(&form.new_password, &form.confirm_password)?;

    Ok(UserUpdate {
        password,
        data: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            ..current.clone()
        }),
    })
}

pub async fn update_profile(
    auth: &AuthClient,
    access_token: &str,
    user: &AuthUser,
    form: &ProfileForm,
) -> Result<AuthUser, AppError> {
    let update = build_update(form, &user.user_metadata)?;
    let changed_password = update.password.is_some();
    let updated = auth.update_user(access_token, &update).await?;
    log::info!(
        "Profile of {} updated{}",
        updated.id,
        if changed_password { " (password changed)" } else { "" }
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use supabase_auth::{OfflineAuthService, SignUpOutcome};

    #[test]
    fn test_password_unchanged_when_empty() {
        assert_eq!(validate_password_change("", "").unwrap(), None);
    }

    #[test]
    fn test_password_mismatch() {
        let err = validate_password_change("secret1", "secret2").unwrap_err();
        assert_eq!(err.user_message(), "Mật khẩu mới không khớp");

        // a filled confirmation alone is a mismatch too
        assert!(validate_password_change("", "secret1").is_err());
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password_change("12345", "12345").unwrap_err();
        assert_eq!(err.user_message(), "Mật khẩu phải có ít nhất 6 ký tự");
        assert_eq!(
            validate_password_change("123456", "123456").unwrap().as_deref(),
            Some("123456")
        );
    }

    #[test]
    fn test_build_update_keeps_other_metadata() {
        let current = UserMetadata {
            full_name: Some("Old".to_string()),
            username: Some("lan_ab12".to_string()),
            avatar_url: Some("https://a.example/x.png".to_string()),
        };
        let form = ProfileForm {
            full_name: " Lan Pham ".to_string(),
            ..Default::default()
        };

        let update = build_update(&form, &current).unwrap();
        assert_eq!(update.password, None);
        let data = update.data.unwrap();
        assert_eq!(data.full_name.as_deref(), Some("Lan Pham"));
        assert_eq!(data.username.as_deref(), Some("lan_ab12"));

        let blank = ProfileForm::default();
        assert!(matches!(
            build_update(&blank, &current),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_changes_name_and_password() {
        let auth = AuthClient::Offline(OfflineAuthService::new());
        let session = match auth
            .sign_up(
                "lan@example.com",
                "secret1",
                supabase_auth::registration_metadata("lan@example.com", "Lan"),
            )
            .await
            .unwrap()
        {
            SignUpOutcome::SignedIn(session) => session,
            SignUpOutcome::ConfirmationRequired(_) => panic!("offline sign-up signs in"),
        };

        let form = ProfileForm {
            full_name: "Lan Pham".to_string(),
            new_password: "secret2".to_string(),
            confirm_password: "secret2".to_string(),
        };
        let updated = update_profile(&auth, &session.access_token, &session.user, &form)
            .await
            .unwrap();
        assert_eq!(updated.user_metadata.full_name.as_deref(), Some("Lan Pham"));

        assert!(auth.sign_in("lan@example.com", "secret1").await.is_err());
        assert!(auth.sign_in("lan@example.com", "secret2").await.is_ok());
    }
}
