use crate::models::{AuthConfig, AuthUser, Session, SignUpOutcome, UserMetadata, UserUpdate};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

/// Error type for authentication operations
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    NetworkError(String),
    JsonError(String),
    InvalidCredentials,
    EmailNotConfirmed,
    UserAlreadyRegistered,
    /// The access token was rejected or has expired
    SessionExpired,
    ServerError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AuthError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid login credentials"),
            AuthError::EmailNotConfirmed => write!(f, "Email not confirmed"),
            AuthError::UserAlreadyRegistered => write!(f, "User already registered"),
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Message shown to the user (Vietnamese, like the rest of the UI)
    pub fn user_message(&self) -> String {
        match self {
            AuthError::EmailNotConfirmed => {
                "Tài khoản chưa được kích hoạt. Vui lòng kiểm tra email của bạn để xác thực."
                    .to_string()
            }
            AuthError::InvalidCredentials => "Email hoặc mật khẩu không chính xác.".to_string(),
            AuthError::UserAlreadyRegistered => "Email này đã được sử dụng.".to_string(),
            AuthError::SessionExpired => {
                "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Maps a provider error body onto the known cases
    fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| body.to_string());

        if message.contains("Email not confirmed") {
            AuthError::EmailNotConfirmed
        } else if message.contains("Invalid login credentials") {
            AuthError::InvalidCredentials
        } else if message.contains("User already registered") {
            AuthError::UserAlreadyRegistered
        } else if status == 401 {
            AuthError::SessionExpired
        } else {
            AuthError::ServerError(format!("{} ({})", message, status))
        }
    }
}

/// Sign-up responses either carry a full session or just the user
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

/// Supabase (GoTrue) email/password authentication service
#[derive(Debug, Clone)]
pub struct SupabaseAuthService {
    config: AuthConfig,
    client: reqwest::Client,
}

impl SupabaseAuthService {
    /// Create a new authentication service
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .user_agent("SupabaseAuth/0.1.0")
            .build()
            .map_err(|e| AuthError::NetworkError(format!("Client build failed: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            path
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
            .header("Accept", "application/json")
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AuthError> {
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("Auth endpoint returned {}: {}", status, body);
        Err(AuthError::from_body(status.as_u16(), &body))
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        response
            .json::<T>()
            .await
            .map_err(|e| AuthError::JsonError(format!("Failed to parse response: {}", e)))
    }

    /// Register a new account. Most projects require email confirmation, in
    /// which case no session is returned.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AuthError> {
        let response = self
            .send(self.request(reqwest::Method::POST, "signup").json(&json!({
                "email": email,
                "password": password,
                "data": metadata,
            })))
            .await?;

        match Self::parse::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => Ok(SignUpOutcome::SignedIn(session)),
            SignUpResponse::User(user) => Ok(SignUpOutcome::ConfirmationRequired(user)),
        }
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "token")
                    .query(&[("grant_type", "password")])
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        let session: Session = Self::parse(response).await?;
        log::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "token")
                    .query(&[("grant_type", "refresh_token")])
                    .json(&json!({ "refresh_token": refresh_token })),
            )
            .await?;

        Self::parse(response).await
    }

    /// Revoke the session on the provider side
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.send(
            self.request(reqwest::Method::POST, "logout")
                .bearer_auth(access_token),
        )
        .await?;
        Ok(())
    }

    /// Load the user owning `access_token`
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::GET, "user")
                    .bearer_auth(access_token),
            )
            .await?;

        Self::parse(response).await
    }

    /// Change password and/or metadata of the current user
    pub async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<AuthUser, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::PUT, "user")
                    .bearer_auth(access_token)
                    .json(update),
            )
            .await?;

        Self::parse(response).await
    }
}

/// Username for a new account: the email's local part plus four random
/// base36 characters, e.g. `anna_k3f9`
pub fn generate_username(email: &str) -> String {
    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let local = email.split('@').next().unwrap_or(email);
    let mut rng = rand::rng();
    let suffix: String = (0..4)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}", local, suffix)
}

/// Generated avatar for users who never uploaded one
pub fn default_avatar_url(full_name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        utf8_percent_encode(full_name, NON_ALPHANUMERIC)
    )
}

/// Metadata attached to a new account
pub fn registration_metadata(email: &str, full_name: &str) -> UserMetadata {
    UserMetadata {
        full_name: Some(full_name.trim().to_string()),
        username: Some(generate_username(email)),
        avatar_url: Some(default_avatar_url(full_name.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_errors_are_recognised() {
        assert_eq!(
            AuthError::from_body(
                400,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
            ),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_body(400, r#"{"msg":"Email not confirmed"}"#),
            AuthError::EmailNotConfirmed
        );
        assert_eq!(
            AuthError::from_body(422, r#"{"msg":"User already registered"}"#),
            AuthError::UserAlreadyRegistered
        );
        assert_eq!(
            AuthError::from_body(401, r#"{"msg":"invalid JWT"}"#),
            AuthError::SessionExpired
        );
        assert!(matches!(
            AuthError::from_body(500, "boom"),
            AuthError::ServerError(_)
        ));
    }

    #[test]
    fn test_generate_username() {
        let name = generate_username("anna@example.com");
        let (local, suffix) = name.split_once('_').unwrap();
        assert_eq!(local, "anna");
        assert_eq!(suffix.len(), 4);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_default_avatar_url_is_encoded() {
        assert_eq!(
            default_avatar_url("Lê Anh"),
            "https://ui-avatars.com/api/?name=L%C3%AA%20Anh&background=random"
        );
    }

    #[test]
    fn test_sign_up_response_shapes() {
        let user: SignUpResponse =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.c","user_metadata":{}}"#).unwrap();
        assert!(matches!(user, SignUpResponse::User(_)));

        let session: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"t","refresh_token":"r","expires_in":3600,"user":{"id":"u1"}}"#,
        )
        .unwrap();
        assert!(matches!(session, SignUpResponse::Session(_)));
    }
}
