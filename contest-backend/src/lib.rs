//! # Contest Backend
//!
//! Typed access to the hosted services behind the photo contest app.
//!
//! This crate provides:
//! - Boundary records with defaulting applied once while decoding
//! - The [`ContestBackend`] trait describing every query and command the app issues
//! - A Supabase implementation ([`RestBackend`]) and an in-memory one ([`MemoryBackend`])
//! - Storage naming helpers for uploaded images
//!
//! ## Separation of Concerns
//!
//! Authentication is handled by the `supabase-auth` crate; this crate only
//! receives the resulting access token through
//! [`ContestBackend::with_access_token`]. No like counts or other derived
//! values are computed here.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use contest_backend::{ContestBackend, RestBackend, RestConfig};
//!
//! let backend = RestBackend::new(RestConfig {
//!     base_url: "https://project.supabase.co".to_string(),
//!     anon_key: "public-anon-key".to_string(),
//! })?;
//! let photos = backend.list_photos().await?;
//! ```

pub mod any;
pub mod client;
pub mod memory;
pub mod models;
pub mod rest;
pub mod storage;

pub use any::AnyBackend;
pub use client::{BackendError, BackendResult, ContestBackend};
pub use memory::MemoryBackend;
pub use models::{
    CategoryRecord, CommentRecord, LikeRecord, NewPhoto, PhotoRecord, PhotoStatus, ProfileRecord,
    Role, UNTITLED,
};
pub use rest::{RestBackend, RestConfig};
