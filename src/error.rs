use contest_backend::BackendError;
use std::fmt;
use supabase_auth::AuthError;

/// Central error types for the photo contest app
#[derive(Debug)]
pub enum AppError {
    /// Data store or object store failure
    Backend(BackendError),
    /// Auth provider failure
    Auth(AuthError),
    /// Local session database error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Validation error, caught before any backend call
    Validation(String),
    /// The action needs a signed-in user
    LoginRequired,
    /// The signed-in user lacks the required role
    Forbidden,
    /// Resource not found (or filtered out by access rules)
    NotFound(String),
    /// Another submission of the same view is still in flight
    Busy,
    /// Invalid configuration file
    Config(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Backend(e) => write!(f, "Backend error: {}", e),
            AppError::Auth(e) => write!(f, "Auth error: {}", e),
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::LoginRequired => write!(f, "Login required"),
            AppError::Forbidden => write!(f, "Permission denied"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Busy => write!(f, "Another request is still running"),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Unauthorized => AppError::LoginRequired,
            other => AppError::Backend(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::SessionExpired => AppError::LoginRequired,
            other => AppError::Auth(other),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

/// User-friendly error messages for toasts and inline errors
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend(e) => format!("Lỗi kết nối máy chủ: {}", e),
            AppError::Auth(e) => e.user_message(),
            AppError::Database(_) => "Lỗi lưu phiên đăng nhập trên thiết bị.".to_string(),
            AppError::Filesystem(_) => "Không thể đọc tệp. Vui lòng kiểm tra quyền truy cập.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::LoginRequired => "Vui lòng đăng nhập để tiếp tục.".to_string(),
            AppError::Forbidden => "Bạn không có quyền thực hiện thao tác này.".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Busy => "Đang xử lý, vui lòng chờ.".to_string(),
            AppError::Config(msg) => format!("Cấu hình không hợp lệ: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Authorization failures lead to a login prompt instead of an error toast
    pub fn needs_login(&self) -> bool {
        matches!(self, AppError::LoginRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_login_prompt() {
        let err: AppError = BackendError::Unauthorized.into();
        assert!(err.needs_login());

        let err: AppError = AuthError::SessionExpired.into();
        assert!(err.needs_login());

        let err: AppError = BackendError::Network("offline".to_string()).into();
        assert!(!err.needs_login());
    }
}
