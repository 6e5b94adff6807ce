use crate::models::{CategoryRecord, CommentRecord, LikeRecord, NewPhoto, PhotoRecord, ProfileRecord};

/// Error type for backend operations
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Transport failure (connection, timeout, TLS)
    Network(String),
    /// Response body could not be decoded
    Json(String),
    /// Non-success status returned by the service
    Server { status: u16, message: String },
    /// The request was rejected because no valid session was attached
    Unauthorized,
    NotFound(String),
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "Network error: {}", msg),
            BackendError::Json(msg) => write!(f, "JSON error: {}", msg),
            BackendError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            BackendError::Unauthorized => write!(f, "Not authorized"),
            BackendError::NotFound(msg) => write!(f, "Not found: {}", msg),
            BackendError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

pub type BackendResult<T> = Result<T, BackendError>;

/// Operations the app needs from the hosted data store and object store.
///
/// Implementations are cheap to clone; an authorized copy is obtained through
/// [`ContestBackend::with_access_token`] after sign-in.
#[allow(async_fn_in_trait)]
pub trait ContestBackend: Clone + 'static {
    /// Returns a copy that sends `token` as the bearer for row-level access
    fn with_access_token(&self, token: Option<String>) -> Self;

    /// All photos, newest first
    async fn list_photos(&self) -> BackendResult<Vec<PhotoRecord>>;

    /// Photos uploaded by one photographer, newest first
    async fn list_photos_by(&self, photographer_id: &str) -> BackendResult<Vec<PhotoRecord>>;

    async fn insert_photo(&self, photo: &NewPhoto) -> BackendResult<PhotoRecord>;

    async fn update_photo_title(&self, photo_id: &str, title: &str) -> BackendResult<()>;

    /// Returns the number of deleted rows; zero means nothing matched or
    /// access rules filtered the row out
    async fn delete_photo(&self, photo_id: &str) -> BackendResult<u64>;

    /// Likes of one photo, or of every photo when `photo_id` is `None`
    async fn list_likes(&self, photo_id: Option<&str>) -> BackendResult<Vec<LikeRecord>>;

    /// The caller checks the prior like state; this does not guard against doubles
    async fn add_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()>;

    async fn remove_like(&self, photo_id: &str, user_id: &str) -> BackendResult<()>;

    /// Comments of one photo, newest first
    async fn list_comments(&self, photo_id: &str) -> BackendResult<Vec<CommentRecord>>;

    async fn add_comment(
        &self,
        photo_id: &str,
        user_id: &str,
        text: &str,
    ) -> BackendResult<CommentRecord>;

    /// Categories ordered by name
    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>>;

    async fn insert_category(&self, name: &str) -> BackendResult<CategoryRecord>;

    async fn update_category(&self, category_id: &str, name: &str) -> BackendResult<()>;

    async fn delete_category(&self, category_id: &str) -> BackendResult<u64>;

    async fn list_profiles(&self) -> BackendResult<Vec<ProfileRecord>>;

    async fn get_profile(&self, user_id: &str) -> BackendResult<Option<ProfileRecord>>;

    async fn delete_profile(&self, user_id: &str) -> BackendResult<u64>;

    /// Stores an image under `object_path` and returns its public URL
    async fn upload_image(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<String>;

    /// Removes a stored image given the object path inside the bucket
    async fn remove_image(&self, object_path: &str) -> BackendResult<()>;
}
