//! # Supabase Auth
//!
//! A reusable email/password authentication library for Supabase (GoTrue).
//!
//! This crate provides:
//! - Sign-up, sign-in, sign-out, token refresh and user updates
//! - An offline account store with the same surface for demo runs
//! - A pure session reducer for the application's session state
//! - A Dioxus login/registration dialog (feature `components`)
//!
//! ## Separation of Concerns
//!
//! This crate focuses solely on authentication. It does **not**:
//! - Persist sessions (handled by the application)
//! - Look up roles or profiles (handled by the application)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use supabase_auth::{AuthConfig, SupabaseAuthService};
//!
//! let service = SupabaseAuthService::new(AuthConfig {
//!     base_url: "https://project.supabase.co".to_string(),
//!     anon_key: "public-anon-key".to_string(),
//! })?;
//! let session = service.sign_in("ann@example.com", "secret").await?;
//! ```

pub mod client;
pub mod models;
pub mod offline;
pub mod service;
pub mod session;

#[cfg(feature = "components")]
pub mod component;

pub use client::AuthClient;
pub use models::{AuthConfig, AuthTab, AuthUser, Session, SignUpOutcome, UserMetadata, UserUpdate};
pub use offline::OfflineAuthService;
pub use service::{
    default_avatar_url, generate_username, registration_metadata, AuthError, SupabaseAuthService,
};
pub use session::{reduce, SessionEvent, SessionState};

#[cfg(feature = "components")]
pub use component::{AuthLabels, AuthModal, AuthModalProps};
