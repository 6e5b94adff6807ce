use crate::error::AppError;
use crate::models::GalleryPhoto;
use crate::services::gallery_service::profile_index;
use crate::services::submission_service;
use crate::services::vote_service::{count_likes, distinct_categories, top_liked, total_likes};
use contest_backend::{CategoryRecord, ContestBackend, ProfileRecord};
use supabase_auth::SessionState;

pub const TOP_COUNT: usize = 4;
pub const DELETE_USER_FAILED: &str = "Không xóa được người dùng (RLS hoặc không tồn tại)";
pub const DELETE_CATEGORY_FAILED: &str = "Không xóa được thể loại (RLS hoặc không tồn tại)";

/// Numbers of the overview tab
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminStats {
    pub photos: usize,
    /// Categories used by at least one photo
    pub categories: usize,
    pub users: usize,
    pub likes: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub stats: AdminStats,
    pub top_photos: Vec<GalleryPhoto>,
    /// Newest first
    pub photos: Vec<GalleryPhoto>,
    pub profiles: Vec<ProfileRecord>,
    pub categories: Vec<CategoryRecord>,
}

/// Only signed-in admins may open the dashboard
pub fn check_admin(state: &SessionState) -> Result<(), AppError> {
    if !state.is_authenticated() {
        return Err(AppError::LoginRequired);
    }
    if !state.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub async fn load_dashboard<B: ContestBackend>(backend: &B) -> Result<DashboardData, AppError> {
    let (photos, likes, profiles, categories) = tokio::join!(
        backend.list_photos(),
        backend.list_likes(None),
        backend.list_profiles(),
        backend.list_categories()
    );
    let photos = photos?;
    let likes = likes?;
    let profiles = profiles?;
    let categories = categories?;

    let counts = count_likes(&likes);
    let index = profile_index(profiles.clone());

    let stats = AdminStats {
        photos: photos.len(),
        categories: distinct_categories(&photos),
        users: profiles.len(),
        likes: total_likes(&photos, &likes),
    };

    let top_photos = top_liked(&photos, &likes, TOP_COUNT)
        .into_iter()
        .map(|r| GalleryPhoto::from_record(&r.photo, r.likes, &index))
        .collect();

    let photos = photos
        .iter()
        .map(|p| GalleryPhoto::from_record(p, counts.get(&p.id).copied().unwrap_or(0), &index))
        .collect();

    Ok(DashboardData {
        stats,
        top_photos,
        photos,
        profiles,
        categories,
    })
}

/// Deletes an entry together with its stored image
pub async fn delete_photo<B: ContestBackend>(
    backend: &B,
    state: &SessionState,
    photo: &GalleryPhoto,
) -> Result<(), AppError> {
    check_admin(state)?;
    submission_service::delete_photo(backend, &photo.id, &photo.url).await
}

/// Deletes a user's profile row; admins cannot delete themselves
pub async fn delete_user<B: ContestBackend>(
    backend: &B,
    state: &SessionState,
    user_id: &str,
) -> Result<(), AppError> {
    check_admin(state)?;
    if state.user_id() == Some(user_id) {
        return Err(AppError::Validation(
            "Không thể xóa tài khoản đang đăng nhập.".to_string(),
        ));
    }
    if backend.delete_profile(user_id).await? == 0 {
        return Err(AppError::NotFound(DELETE_USER_FAILED.to_string()));
    }
    log::info!("User {} deleted", user_id);
    Ok(())
}

fn category_name(
    name: &str,
    existing: &[CategoryRecord],
    except_id: Option<&str>,
) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "Tên thể loại không được để trống.".to_string(),
        ));
    }
    let taken = existing
        .iter()
        .filter(|c| Some(c.id.as_str()) != except_id)
        .any(|c| c.name.eq_ignore_ascii_case(name));
    if taken {
        return Err(AppError::Validation("Thể loại này đã tồn tại.".to_string()));
    }
    Ok(name.to_string())
}

pub async fn add_category<B: ContestBackend>(
    backend: &B,
    state: &SessionState,
    existing: &[CategoryRecord],
    name: &str,
) -> Result<CategoryRecord, AppError> {
    check_admin(state)?;
    let name = category_name(name, existing, None)?;
    Ok(backend.insert_category(&name).await?)
}

pub async fn rename_category<B: ContestBackend>(
    backend: &B,
    state: &SessionState,
    existing: &[CategoryRecord],
    category_id: &str,
    name: &str,
) -> Result<String, AppError> {
    check_admin(state)?;
    let name = category_name(name, existing, Some(category_id))?;
    backend.update_category(category_id, &name).await?;
    Ok(name)
}

pub async fn delete_category<B: ContestBackend>(
    backend: &B,
    state: &SessionState,
    category_id: &str,
) -> Result<(), AppError> {
    check_admin(state)?;
    if backend.delete_category(category_id).await? == 0 {
        return Err(AppError::NotFound(DELETE_CATEGORY_FAILED.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::MemoryBackend;
    use supabase_auth::{AuthUser, Session, UserMetadata};

    fn admin_state(user_id: &str, is_admin: bool) -> SessionState {
        SessionState {
            session: Some(Session {
                access_token: "t".to_string(),
                refresh_token: "r".to_string(),
                expires_in: 0,
                expires_at: None,
                user: AuthUser {
                    id: user_id.to_string(),
                    email: None,
                    user_metadata: UserMetadata::default(),
                },
            }),
            is_admin,
            restored: true,
        }
    }

    #[test]
    fn test_check_admin() {
        assert!(matches!(
            check_admin(&SessionState::default()),
            Err(AppError::LoginRequired)
        ));
        assert!(matches!(
            check_admin(&admin_state("u1", false)),
            Err(AppError::Forbidden)
        ));
        assert!(check_admin(&admin_state("u1", true)).is_ok());
    }

    #[tokio::test]
    async fn test_dashboard_stats_and_top_four() {
        let backend = MemoryBackend::with_demo_data();
        let data = load_dashboard(&backend).await.unwrap();

        assert_eq!(data.stats.photos, 9);
        assert_eq!(data.stats.categories, 3);
        assert_eq!(data.stats.users, 9);
        assert_eq!(data.stats.likes, 131);

        let top: Vec<u32> = data.top_photos.iter().map(|p| p.like_count).collect();
        assert_eq!(top, vec![24, 21, 18, 15]);
    }

    #[tokio::test]
    async fn test_delete_photo_requires_admin() {
        let backend = MemoryBackend::with_demo_data().with_access_token(Some("t".to_string()));
        let data = load_dashboard(&backend).await.unwrap();
        let target = &data.photos[0];

        assert!(matches!(
            delete_photo(&backend, &admin_state("u1", false), target).await,
            Err(AppError::Forbidden)
        ));
        delete_photo(&backend, &admin_state("admin", true), target).await.unwrap();
        assert_eq!(backend.list_photos().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_delete_user_checks_count_and_self() {
        let backend = MemoryBackend::with_demo_data().with_access_token(Some("t".to_string()));
        let state = admin_state("admin", true);

        delete_user(&backend, &state, "demo-photographer-1").await.unwrap();
        assert!(matches!(
            delete_user(&backend, &state, "demo-photographer-1").await,
            Err(AppError::NotFound(msg)) if msg == DELETE_USER_FAILED
        ));
        assert!(matches!(
            delete_user(&backend, &state, "admin").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            delete_user(&backend, &admin_state("u1", false), "demo-photographer-2").await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_category_management() {
        let backend = MemoryBackend::with_demo_data().with_access_token(Some("t".to_string()));
        let admin = admin_state("u1", true);
        let existing = backend.list_categories().await.unwrap();

        assert!(matches!(
            add_category(&backend, &admin, &existing, " street ").await,
            Err(AppError::Validation(_))
        ));
        let macro_cat = add_category(&backend, &admin, &existing, " Macro ").await.unwrap();
        assert_eq!(macro_cat.name, "Macro");

        let existing = backend.list_categories().await.unwrap();
        // renaming to its own name is allowed
        rename_category(&backend, &admin, &existing, &macro_cat.id, "macro").await.unwrap();
        assert!(matches!(
            rename_category(&backend, &admin, &existing, &macro_cat.id, "Portrait").await,
            Err(AppError::Validation(_))
        ));

        delete_category(&backend, &admin, &macro_cat.id).await.unwrap();
        assert!(matches!(
            delete_category(&backend, &admin, &macro_cat.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(backend.list_categories().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_category_changes_require_admin() {
        let backend = MemoryBackend::with_demo_data().with_access_token(Some("t".to_string()));
        let existing = backend.list_categories().await.unwrap();
        let user = admin_state("u1", false);
        let target = existing[0].id.clone();

        assert!(matches!(
            add_category(&backend, &user, &existing, "Macro").await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            rename_category(&backend, &user, &existing, &target, "Macro").await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            delete_category(&backend, &SessionState::default(), &target).await,
            Err(AppError::LoginRequired)
        ));
        assert_eq!(backend.list_categories().await.unwrap(), existing);
    }
}
