pub mod account_service;
pub mod admin_service;
pub mod category_labels;
pub mod countdown;
pub mod gallery_service;
pub mod lightbox_session;
pub mod request_token;
pub mod session_service;
pub mod submission_service;
pub mod vote_service;

pub use category_labels::display_label;
pub use countdown::{time_left, TimeLeft};
pub use request_token::RequestTracker;
