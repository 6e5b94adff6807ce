use crate::services::category_labels::display_label;
use contest_backend::{PhotoRecord, ProfileRecord};
use std::collections::HashMap;

/// A photo as shown in the gallery, lightbox and hall of fame
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryPhoto {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Canonical key, used for filtering
    pub category: String,
    pub category_label: String,
    pub photographer_id: String,
    /// Display name of the photographer, if their profile is known
    pub author: Option<String>,
    pub author_avatar: Option<String>,
    /// Derived from the like rows of the last fetch
    pub like_count: u32,
    pub created_at: Option<String>,
}

impl GalleryPhoto {
    pub fn from_record(
        record: &PhotoRecord,
        like_count: u32,
        profiles: &HashMap<String, ProfileRecord>,
    ) -> Self {
        let profile = profiles.get(&record.photographer_id);
        Self {
            id: record.id.clone(),
            url: record.url.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            category_label: display_label(&record.category).to_string(),
            photographer_id: record.photographer_id.clone(),
            author: profile.and_then(|p| p.display_name()).map(str::to_string),
            author_avatar: profile.and_then(|p| p.avatar_url.clone()),
            like_count,
            created_at: record.created_at.clone(),
        }
    }

    pub fn author_or<'a>(&'a self, unknown: &'a str) -> &'a str {
        self.author.as_deref().unwrap_or(unknown)
    }

    /// `unknown_author` is shown when the photographer has no profile
    pub fn to_gallery_item(&self, unknown_author: &str) -> dioxus_gallery::GalleryItem {
        dioxus_gallery::GalleryItem {
            id: self.id.clone(),
            image_url: self.url.clone(),
            title: self.title.clone(),
            badge: Some(self.category_label.clone()),
            caption: Some(format!(
                "{} · ♥ {}",
                self.author_or(unknown_author),
                self.like_count
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::{PhotoStatus, Role};

    fn record() -> PhotoRecord {
        PhotoRecord {
            id: "a".to_string(),
            url: "https://img.example/a.jpg".to_string(),
            title: "Sunset".to_string(),
            category: "Landscape".to_string(),
            photographer_id: "p1".to_string(),
            status: PhotoStatus::Approved,
            created_at: None,
        }
    }

    #[test]
    fn test_author_and_label_resolution() {
        let mut profiles = HashMap::new();
        profiles.insert(
            "p1".to_string(),
            ProfileRecord {
                id: "p1".to_string(),
                full_name: Some("Minh Tran".to_string()),
                username: None,
                email: None,
                avatar_url: Some("https://avatars.example/p1.png".to_string()),
                role: Role::User,
            },
        );

        let photo = GalleryPhoto::from_record(&record(), 4, &profiles);
        assert_eq!(photo.author.as_deref(), Some("Minh Tran"));
        assert_eq!(photo.category_label, "Ảnh Phong Cảnh");
        assert_eq!(photo.like_count, 4);
        let item = photo.to_gallery_item("?");
        assert_eq!(item.badge.as_deref(), Some("Ảnh Phong Cảnh"));
        assert_eq!(item.caption.as_deref(), Some("Minh Tran · ♥ 4"));
    }

    #[test]
    fn test_unknown_photographer_fallback() {
        let photo = GalleryPhoto::from_record(&record(), 0, &HashMap::new());
        assert_eq!(photo.author, None);
        assert_eq!(photo.author_avatar, None);
        assert_eq!(photo.author_or("Ẩn danh"), "Ẩn danh");
        assert_eq!(
            photo.to_gallery_item("Ẩn danh").caption.as_deref(),
            Some("Ẩn danh · ♥ 0")
        );
    }
}
