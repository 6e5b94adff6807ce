//! Runtime choice between the hosted and the in-memory backend

use crate::client::{BackendResult, ContestBackend};
use crate::memory::MemoryBackend;
use crate::models::{CategoryRecord, CommentRecord, LikeRecord, NewPhoto, PhotoRecord, ProfileRecord};
use crate::rest::RestBackend;

#[derive(Debug, Clone)]
pub enum AnyBackend {
    Rest(RestBackend),
    Memory(MemoryBackend),
}

impl AnyBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            AnyBackend::Rest(_) => "supabase",
            AnyBackend::Memory(_) => "memory",
        }
    }
}

macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyBackend::Rest(b) => b.$method($($arg),*).await,
            AnyBackend::Memory(b) => b.$method($($arg),*).await,
        }
    };
}

impl ContestBackend for AnyBackend {
    fn with_access_token(&self, token: Option<String>) -> Self {
        match self {
            AnyBackend::Rest(b) => AnyBackend::Rest(b.with_access_token(token)),
            AnyBackend::Memory(b) => AnyBackend::Memory(b.with_access_token(token)),
        }
    }

    async fn list_photos(&self) -> BackendResult<Vec<PhotoRecord>> {
        delegate!(self, list_photos())
    }

    async fn list_photos_by(&self, photographer_id: &str) -> BackendResult<Vec<PhotoRecord>> {
        delegate!(self, list_photos_by(photographer_id))
    }

    async fn insert_photo(&self, photo: &NewPhoto) -> BackendResult<PhotoRecord> {
        delegate!(self, insert_photo(photo))
    }

    async fn update_photo_title(&self, photo_id: &str, title: &str) -> BackendResult<()> {
        delegate!(self, update_photo_title(photo_id, title))
    }

    async fn delete_photo(&self, photo_id: &str) -> BackendResult<u64> {
        delegate!(self, delete_photo(photo_id))
    }

    async fn list_likes(&self, photo_id: Option<&str>) -> BackendResult<Vec<LikeRecord>> {
        delegate!(self, list_likes(photo_id))
    }

    async fn add_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        delegate!(self, add_like(photo_id, user_id))
    }

    async fn remove_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()> {
        delegate!(self, remove_like(photo_id, user_id))
    }

    async fn list_comments(&self, photo_id: &str) -> BackendResult<Vec<CommentRecord>> {
        delegate!(self, list_comments(photo_id))
    }

    async fn add_comment(
        &self,
        photo_id: &str,
        user_id: &str,
        text: &str,
    ) -> BackendResult<CommentRecord> {
        delegate!(self, add_comment(photo_id, user_id, text))
    }

    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>> {
        delegate!(self, list_categories())
    }

    async fn insert_category(&self, name: &str) -> BackendResult<CategoryRecord> {
        delegate!(self, insert_category(name))
    }

    async fn update_category(&self, category_id: &str, name: &str) -> BackendResult<()> {
        delegate!(self, update_category(category_id, name))
    }

    async fn delete_category(&self, category_id: &str) -> BackendResult<u64> {
        delegate!(self, delete_category(category_id))
    }

    async fn list_profiles(&self) -> BackendResult<Vec<ProfileRecord>> {
        delegate!(self, list_profiles())
    }

    async fn get_profile(&self, user_id: &str) -> BackendResult<Option<ProfileRecord>> {
        delegate!(self, get_profile(user_id))
    }

    async fn delete_profile(&self, user_id: &str) -> BackendResult<u64> {
        delegate!(self, delete_profile(user_id))
    }

    async fn upload_image(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<String> {
        delegate!(self, upload_image(object_path, bytes, content_type))
    }

    async fn remove_image(&self, object_path: &str) -> BackendResult<()> {
        delegate!(self, remove_image(object_path))
    }
}
