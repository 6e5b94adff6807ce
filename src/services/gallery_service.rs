use crate::error::AppError;
use crate::models::GalleryPhoto;
use crate::services::vote_service::{count_likes, find_leaders};
use contest_backend::{CategoryRecord, ContestBackend, LikeRecord, PhotoRecord, ProfileRecord};
use std::collections::HashMap;

/// Everything the home screen shows, derived from one fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryData {
    /// Newest first
    pub photos: Vec<GalleryPhoto>,
    /// Category keys for the filter tabs
    pub categories: Vec<String>,
    /// Photos tied for the most likes; empty while nobody has liked anything
    pub leaders: Vec<GalleryPhoto>,
    pub max_likes: u32,
}

pub fn profile_index(profiles: Vec<ProfileRecord>) -> HashMap<String, ProfileRecord> {
    profiles.into_iter().map(|p| (p.id.clone(), p)).collect()
}

/// Builds the view records and the leaderboard from raw rows
pub fn build_gallery(
    photos: &[PhotoRecord],
    likes: &[LikeRecord],
    categories: &[CategoryRecord],
    profiles: &HashMap<String, ProfileRecord>,
) -> GalleryData {
    let counts = count_likes(likes);
    let board = find_leaders(photos, likes);

    let mut category_keys: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    if category_keys.is_empty() {
        // no category rows readable: fall back to what the photos use
        for photo in photos {
            if !category_keys.contains(&photo.category) {
                category_keys.push(photo.category.clone());
            }
        }
    }

    GalleryData {
        photos: photos
            .iter()
            .map(|p| GalleryPhoto::from_record(p, counts.get(&p.id).copied().unwrap_or(0), profiles))
            .collect(),
        categories: category_keys,
        leaders: board
            .leaders
            .iter()
            .map(|l| GalleryPhoto::from_record(&l.photo, l.likes, profiles))
            .collect(),
        max_likes: board.max_likes,
    }
}

/// Photos of one category; `None` shows all
pub fn filter_by_category<'a>(
    photos: &'a [GalleryPhoto],
    category: Option<&str>,
) -> Vec<&'a GalleryPhoto> {
    photos
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

/// Fetches photos, likes, categories and profiles.
///
/// Photos and likes are required; categories and profiles only improve the
/// presentation, so their failures degrade to empty lists.
pub async fn load_gallery<B: ContestBackend>(backend: &B) -> Result<GalleryData, AppError> {
    let (photos, likes, categories, profiles) = tokio::join!(
        backend.list_photos(),
        backend.list_likes(None),
        backend.list_categories(),
        backend.list_profiles()
    );
    let photos = photos?;
    let likes = likes?;

    let categories = categories.unwrap_or_else(|e| {
        log::warn!("Failed to load categories: {}", e);
        Vec::new()
    });
    let profiles = profiles.unwrap_or_else(|e| {
        log::warn!("Failed to load profiles: {}", e);
        Vec::new()
    });

    log::info!("Gallery loaded: {} photos, {} likes", photos.len(), likes.len());
    Ok(build_gallery(&photos, &likes, &categories, &profile_index(profiles)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::MemoryBackend;

    #[tokio::test]
    async fn test_demo_gallery() {
        let backend = MemoryBackend::with_demo_data();
        let data = load_gallery(&backend).await.unwrap();

        assert_eq!(data.photos.len(), 9);
        assert_eq!(data.categories, vec!["Landscape", "Portrait", "Street"]);
        assert_eq!(data.max_likes, 24);
        assert_eq!(data.leaders.len(), 1);
        assert_eq!(data.leaders[0].like_count, 24);
        assert!(data.leaders[0].author.is_some());

        let total: u32 = data.photos.iter().map(|p| p.like_count).sum();
        assert_eq!(total, 12 + 9 + 21 + 15 + 8 + 13 + 18 + 24 + 11);
    }

    #[tokio::test]
    async fn test_empty_backend() {
        let data = load_gallery(&MemoryBackend::new()).await.unwrap();
        assert!(data.photos.is_empty());
        assert!(data.leaders.is_empty());
        assert!(data.categories.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_category() {
        let data = load_gallery(&MemoryBackend::with_demo_data()).await.unwrap();

        let street = filter_by_category(&data.photos, Some("Street"));
        assert!(!street.is_empty());
        assert!(street.iter().all(|p| p.category == "Street"));

        assert_eq!(filter_by_category(&data.photos, None).len(), data.photos.len());
        assert!(filter_by_category(&data.photos, Some("Macro")).is_empty());
    }

    #[test]
    fn test_categories_fall_back_to_photo_keys() {
        let photo = |id: &str, category: &str| PhotoRecord {
            id: id.to_string(),
            url: String::new(),
            title: id.to_string(),
            category: category.to_string(),
            photographer_id: "p".to_string(),
            status: Default::default(),
            created_at: None,
        };
        let photos = vec![photo("a", "Street"), photo("b", "Macro"), photo("c", "Street")];

        let data = build_gallery(&photos, &[], &[], &HashMap::new());
        assert_eq!(data.categories, vec!["Street", "Macro"]);
    }
}
