//! In-memory implementation of [`ContestBackend`]
//!
//! Used for the offline demo mode and as the test double for the app's
//! services. Write operations require an access token, mirroring the hosted
//! service's row-level rules, and can be switched to fail on demand.

use crate::client::{BackendError, BackendResult, ContestBackend};
use crate::models::{
    CategoryRecord, CommentRecord, LikeRecord, NewPhoto, PhotoRecord, PhotoStatus, ProfileRecord,
    Role,
};
use crate::storage;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const DEMO_BASE_URL: &str = "memory://demo";

#[derive(Debug, Default)]
struct MemoryState {
    photos: Vec<PhotoRecord>,
    likes: Vec<LikeRecord>,
    comments: Vec<CommentRecord>,
    categories: Vec<CategoryRecord>,
    profiles: Vec<ProfileRecord>,
    objects: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    access_token: Option<String>,
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-filled with sample entries across three categories
    pub fn with_demo_data() -> Self {
        let mut state = MemoryState::default();

        for name in ["Landscape", "Portrait", "Street"] {
            state.categories.push(CategoryRecord {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
            });
        }

        let samples: [(&str, &str, &str, &str, usize); 9] = [
            ("photo-1472214103451-9374bd1c798e", "Mountain Silence", "Landscape", "Elena Rivers", 12),
            ("photo-1470071459604-3b5ec3a7fe05", "Misty Valley", "Landscape", "John Smith", 9),
            ("photo-1506744038136-46273834b3fb", "Yosemite Falls", "Landscape", "Kodak Portra", 21),
            ("photo-1531746020798-e6953c6e8e04", "Soulful Eyes", "Portrait", "Maria Garcia", 15),
            ("photo-1544005313-94ddf0286df2", "The Thinker", "Portrait", "David Chen", 8),
            ("photo-1507003211169-0a1dd7228f2d", "Just a Smile", "Portrait", "Sarah Jones", 13),
            ("photo-1481349518771-20055b2a7b24", "Subway Motion", "Street", "Street Walker", 18),
            ("photo-1449824913935-59a10b8d2000", "City Rain", "Street", "Neon Nights", 24),
            ("photo-1517732306149-e8f08f64f483", "Market Chaos", "Street", "Busy Bee", 11),
        ];

        let start = Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);

        for (index, (unsplash_id, title, category, author, likes)) in samples.iter().enumerate() {
            let photographer_id = format!("demo-photographer-{}", index + 1);
            let photo_id = format!("demo-photo-{}", index + 1);

            state.profiles.push(ProfileRecord {
                id: photographer_id.clone(),
                full_name: Some(author.to_string()),
                username: None,
                email: None,
                avatar_url: None,
                role: Role::User,
            });

            state.photos.push(PhotoRecord {
                id: photo_id.clone(),
                url: format!(
                    "https://images.unsplash.com/{}?q=80&w=2070&auto=format&fit=crop",
                    unsplash_id
                ),
                title: title.to_string(),
                category: category.to_string(),
                photographer_id,
                status: PhotoStatus::Approved,
                created_at: Some((start + Duration::hours(index as i64)).to_rfc3339()),
            });

            for voter in 0..*likes {
                state.likes.push(LikeRecord {
                    photo_id: photo_id.clone(),
                    user_id: format!("demo-voter-{}", voter),
                });
            }
        }

        state.photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            state: Arc::new(Mutex::new(state)),
            access_token: None,
        }
    }

    /// Makes every following write fail with a network error
    pub async fn set_failing(&self, failing: bool) {
        self.state.lock().await.fail_writes = failing;
    }

    pub async fn insert_profile(&self, profile: ProfileRecord) {
        let mut state = self.state.lock().await;
        state.profiles.retain(|p| p.id != profile.id);
        state.profiles.push(profile);
    }

    pub async fn stored_objects(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state.lock().await.objects.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Locks the state for a write after checking authorization and failure mode
    async fn write(&self) -> BackendResult<tokio::sync::MutexGuard<'_, MemoryState>> {
        if self.access_token.is_none() {
            return Err(BackendError::Unauthorized);
        }
        let state = self.state.lock().await;
        if state.fail_writes {
            return Err(BackendError::Network("simulated failure".to_string()));
        }
        Ok(state)
    }
}

impl ContestBackend for MemoryBackend {
    fn with_access_token(&self, token: Option<String>) -> Self {
        Self {
            state: Arc::clone(&self.state),
            access_token: token,
        }
    }

    async fn list_photos(&self) -> BackendResult<Vec<PhotoRecord>> {
        Ok(self.state.lock().await.photos.clone())
    }

    async fn list_photos_by(&self, photographer_id: &str) -> BackendResult<Vec<PhotoRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .photos
            .iter()
            .filter(|p| p.photographer_id == photographer_id)
            .cloned()
            .collect())
    }

    async fn insert_photo(&self, photo: &NewPhoto) -> BackendResult<PhotoRecord> {
        let mut state = self.write().await?;
        let record = PhotoRecord {
            id: Uuid::new_v4().to_string(),
            url: photo.url.clone(),
            title: photo.title.clone(),
            category: photo.category.clone(),
            photographer_id: photo.photographer_id.clone(),
            status: PhotoStatus::Pending,
            created_at: Some(now()),
        };
        state.photos.insert(0, record.clone());
        Ok(record)
    }

    async fn update_photo_title(&self, photo_id: &str, title: &str) -> BackendResult<()> {
        let mut state = self.write().await?;
        let photo = state
            .photos
            .iter_mut()
            .find(|p| p.id == photo_id)
            .ok_or_else(|| BackendError::NotFound(format!("photo {}", photo_id)))?;
        photo.title = title.to_string();
        Ok(())
    }

    async fn delete_photo(&self, photo_id: &str) -> BackendResult<u64> {
        let mut state = self.write().await?;
        let before = state.photos.len();
        state.photos.retain(|p| p.id != photo_id);
        let deleted = (before - state.photos.len()) as u64;
        if deleted > 0 {
            state.likes.retain(|l| l.photo_id != photo_id);
            state.comments.retain(|c| c.photo_id != photo_id);
        }
        Ok(deleted)
    }

    async fn list_likes(&self, photo_id: Option<&str>) -> BackendResult<Vec<LikeRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .likes
            .iter()
            .filter(|l| photo_id.map_or(true, |id| l.photo_id == id))
            .cloned()
            .collect())
    }

    async fn add_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        let mut state = self.write().await?;
        // one like per (photo, user)
        if state
            .likes
            .iter()
            .any(|l| l.photo_id == photo_id && l.user_id == user_id)
        {
            return Ok(());
        }
        state.likes.push(LikeRecord {
            photo_id: photo_id.to_string(),
            user_id: user_id.to_string(),
        });
        Ok(())
    }

    async fn remove_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        let mut state = self.write().await?;
        state
            .likes
            .retain(|l| !(l.photo_id == photo_id && l.user_id == user_id));
        Ok(())
    }

    async fn list_comments(&self, photo_id: &str) -> BackendResult<Vec<CommentRecord>> {
        let mut comments: Vec<CommentRecord> = self
            .state
            .lock()
            .await
            .comments
            .iter()
            .filter(|c| c.photo_id == photo_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn add_comment(
        &self,
        photo_id: &str,
        user_id: &str,
        text: &str,
    ) -> BackendResult<CommentRecord> {
        let mut state = self.write().await?;
        let comment = CommentRecord {
            id: Uuid::new_v4().to_string(),
            photo_id: photo_id.to_string(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            created_at: now(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>> {
        let mut categories = self.state.lock().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert_category(&self, name: &str) -> BackendResult<CategoryRecord> {
        let mut state = self.write().await?;
        let category = CategoryRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, category_id: &str, name: &str) -> BackendResult<()> {
        let mut state = self.write().await?;
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| BackendError::NotFound(format!("category {}", category_id)))?;
        category.name = name.to_string();
        Ok(())
    }

    async fn delete_category(&self, category_id: &str) -> BackendResult<u64> {
        let mut state = self.write().await?;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != category_id);
        Ok((before - state.categories.len()) as u64)
    }

    async fn list_profiles(&self) -> BackendResult<Vec<ProfileRecord>> {
        Ok(self.state.lock().await.profiles.clone())
    }

    async fn get_profile(&self, user_id: &str) -> BackendResult<Option<ProfileRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn delete_profile(&self, user_id: &str) -> BackendResult<u64> {
        let mut state = self.write().await?;
        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != user_id);
        Ok((before - state.profiles.len()) as u64)
    }

    async fn upload_image(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> BackendResult<String> {
        let mut state = self.write().await?;
        state.objects.insert(object_path.to_string(), bytes);
        Ok(storage::public_url(DEMO_BASE_URL, object_path))
    }

    async fn remove_image(&self, object_path: &str) -> BackendResult<()> {
        let mut state = self.write().await?;
        state.objects.remove(object_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_require_token() {
        let backend = MemoryBackend::new();
        assert_eq!(
            backend.add_like("p", "u").await,
            Err(BackendError::Unauthorized)
        );

        let authorized = backend.with_access_token(Some("t".to_string()));
        authorized.add_like("p", "u").await.unwrap();
        assert_eq!(backend.list_likes(Some("p")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_like_is_unique_per_user() {
        let backend = MemoryBackend::new().with_access_token(Some("t".to_string()));
        backend.add_like("p", "u").await.unwrap();
        backend.add_like("p", "u").await.unwrap();
        backend.add_like("p", "v").await.unwrap();

        let likes = backend.list_likes(Some("p")).await.unwrap();
        assert_eq!(likes.iter().filter(|l| l.user_id == "u").count(), 1);
        assert_eq!(likes.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_photo_reports_count_and_cascades() {
        let backend = MemoryBackend::with_demo_data().with_access_token(Some("t".to_string()));
        let photos = backend.list_photos().await.unwrap();
        let target = photos[0].id.clone();

        assert_eq!(backend.delete_photo(&target).await.unwrap(), 1);
        assert_eq!(backend.delete_photo(&target).await.unwrap(), 0);
        assert!(backend.list_likes(Some(&target)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_demo_data_is_newest_first() {
        let backend = MemoryBackend::with_demo_data();
        let photos = backend.list_photos().await.unwrap();
        assert_eq!(photos.len(), 9);
        assert!(photos
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(backend.list_categories().await.unwrap()[0].name, "Landscape");
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let backend = MemoryBackend::new().with_access_token(Some("t".to_string()));
        backend.set_failing(true).await;
        assert!(matches!(
            backend.add_comment("p", "u", "hi").await,
            Err(BackendError::Network(_))
        ));
        backend.set_failing(false).await;
        assert!(backend.add_comment("p", "u", "hi").await.is_ok());
    }
}
