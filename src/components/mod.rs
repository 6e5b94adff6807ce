pub mod admin_dashboard;
pub mod confirm_modal;
pub mod countdown_timer;
pub mod gallery;
pub mod home;
pub mod lightbox;
pub mod navigation;
pub mod profile_modal;
pub mod toast;
pub mod top_voted;
pub mod user_photos;

pub use admin_dashboard::AdminScreen;
pub use confirm_modal::ConfirmModal;
pub use countdown_timer::CountdownTimer;
pub use gallery::GalleryView;
pub use home::HomeScreen;
pub use lightbox::Lightbox;
pub use navigation::NavigationBar;
pub use profile_modal::ProfileModal;
pub use toast::{ToastHost, Toasts};
pub use top_voted::TopVoted;
pub use user_photos::MyPhotosScreen;

use dioxus::prelude::*;
use supabase_auth::{reduce, SessionEvent, SessionState};

/// Applies an auth event to the shared session state
pub fn dispatch(mut session: Signal<SessionState>, event: SessionEvent) {
    let next = reduce(&session.peek(), event);
    session.set(next);
}

/// Local "dd/mm/yyyy hh:mm" for a backend timestamp; unparsable values are
/// shown as stored
pub fn format_timestamp(value: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%d/%m/%Y %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| value.to_string())
}
