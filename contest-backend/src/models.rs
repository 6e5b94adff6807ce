use serde::{Deserialize, Serialize};

/// Title shown for photos stored without one
pub const UNTITLED: &str = "Untitled";

/// Review state of a contest entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PhotoStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PhotoStatus::Pending => "pending",
            PhotoStatus::Approved => "approved",
            PhotoStatus::Rejected => "rejected",
        }
    }
}

/// Wire shape of a `photos` row before defaulting
#[derive(Debug, Deserialize)]
struct RawPhoto {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    photographer_id: Option<String>,
    #[serde(default)]
    status: Option<PhotoStatus>,
    #[serde(default)]
    created_at: Option<String>,
}

/// A contest entry as stored by the backend.
///
/// Missing or blank titles are normalised to [`UNTITLED`] while deserializing,
/// so render code never has to deal with them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawPhoto")]
pub struct PhotoRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub category: String,
    pub photographer_id: String,
    pub status: PhotoStatus,
    pub created_at: Option<String>,
}

impl From<RawPhoto> for PhotoRecord {
    fn from(raw: RawPhoto) -> Self {
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Self {
            id: raw.id,
            url: raw.url.unwrap_or_default(),
            title,
            category: raw.category.unwrap_or_default(),
            photographer_id: raw.photographer_id.unwrap_or_default(),
            status: raw.status.unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}

/// Insert payload for a new entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewPhoto {
    pub title: String,
    pub url: String,
    pub category: String,
    pub photographer_id: String,
}

/// One user liking one photo. Existence is binary per (photo, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LikeRecord {
    pub photo_id: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentRecord {
    pub id: String,
    pub photo_id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: String,
    /// Canonical key used for storage and filtering
    pub name: String,
}

/// Role stored on a profile; the only authorization signal the views use
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| Role::from_str(&s)).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl ProfileRecord {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Best-effort human name: full name, then username, then email
    pub fn display_name(&self) -> Option<&str> {
        [&self.full_name, &self.username, &self.email]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_defaults_to_untitled() {
        let photo: PhotoRecord =
            serde_json::from_str(r#"{"id":"a","url":"u","category":"Portrait"}"#).unwrap();
        assert_eq!(photo.title, UNTITLED);
        assert_eq!(photo.status, PhotoStatus::Pending);

        let blank: PhotoRecord =
            serde_json::from_str(r#"{"id":"b","url":"u","title":"   "}"#).unwrap();
        assert_eq!(blank.title, UNTITLED);
    }

    #[test]
    fn test_unknown_role_is_user() {
        let profile: ProfileRecord =
            serde_json::from_str(r#"{"id":"p","role":"moderator"}"#).unwrap();
        assert_eq!(profile.role, Role::User);

        let admin: ProfileRecord = serde_json::from_str(r#"{"id":"p","role":"admin"}"#).unwrap();
        assert!(admin.is_admin());

        let missing: ProfileRecord = serde_json::from_str(r#"{"id":"p","role":null}"#).unwrap();
        assert_eq!(missing.role, Role::User);
    }

    #[test]
    fn test_display_name_fallback() {
        let profile = ProfileRecord {
            id: "p".to_string(),
            full_name: Some(" ".to_string()),
            username: None,
            email: Some("ann@example.com".to_string()),
            avatar_url: None,
            role: Role::User,
        };
        assert_eq!(profile.display_name(), Some("ann@example.com"));
    }
}
