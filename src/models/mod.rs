pub mod gallery_photo;
pub mod toast;

pub use gallery_photo::GalleryPhoto;
pub use toast::{Toast, ToastKind, ToastQueue};
