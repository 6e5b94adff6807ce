//! Contest entries of the signed-in user: upload, list, rename, delete

use crate::error::AppError;
use base64::Engine;
use contest_backend::storage::{object_path, object_path_from_url};
use contest_backend::{ContestBackend, NewPhoto, PhotoRecord};
use image::ImageFormat;

pub const DELETE_PHOTO_FAILED: &str = "Không xóa được ảnh (RLS hoặc không tồn tại)";

/// Input of the upload form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadForm {
    pub title: String,
    pub category: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Image type of an upload, detected from its content
pub fn sniff_image(bytes: &[u8]) -> Result<ImageFormat, AppError> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => Ok(format),
        Ok(other) => {
            log::debug!("Rejected upload of type {:?}", other);
            Err(AppError::Validation(
                "Chỉ hỗ trợ ảnh JPG, PNG hoặc WebP.".to_string(),
            ))
        }
        Err(_) => Err(AppError::Validation(
            "Tệp đã chọn không phải là ảnh hợp lệ.".to_string(),
        )),
    }
}

/// `data:` URL for showing the selected file before upload
pub fn preview_data_url(bytes: &[u8]) -> Result<String, AppError> {
    let format = sniff_image(bytes)?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// Category preselected in the upload form
pub fn default_category(categories: &[String]) -> String {
    categories.first().cloned().unwrap_or_default()
}

/// Checks the form; returns the trimmed title and the detected image type
pub fn validate_upload(form: &UploadForm) -> Result<(String, ImageFormat), AppError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Vui lòng nhập tên ảnh.".to_string()));
    }
    if form.category.trim().is_empty() {
        return Err(AppError::Validation("Vui lòng chọn thể loại.".to_string()));
    }
    if form.bytes.is_empty() {
        return Err(AppError::Validation("Vui lòng chọn ảnh để tải lên.".to_string()));
    }
    let format = sniff_image(&form.bytes)?;
    Ok((title.to_string(), format))
}

/// Stores the image, then the photo row. If the row cannot be written the
/// stored image is removed again.
pub async fn upload_photo<B: ContestBackend>(
    backend: &B,
    owner_id: &str,
    form: UploadForm,
    now_millis: i64,
) -> Result<PhotoRecord, AppError> {
    let (title, format) = validate_upload(&form)?;
    let extension = format.extensions_str().first().copied().unwrap_or("jpg");
    let path = object_path(owner_id, &format!("upload.{}", extension), now_millis);

    log::info!("Uploading {} ({} bytes) to {}", form.file_name, form.bytes.len(), path);
    let url = backend
        .upload_image(&path, form.bytes, format.to_mime_type())
        .await?;

    let new_photo = NewPhoto {
        title,
        url,
        category: form.category.trim().to_string(),
        photographer_id: owner_id.to_string(),
    };

    match backend.insert_photo(&new_photo).await {
        Ok(record) => Ok(record),
        Err(e) => {
            if let Err(cleanup) = backend.remove_image(&path).await {
                log::warn!("Failed to remove orphaned image {}: {}", path, cleanup);
            }
            Err(e.into())
        }
    }
}

/// Photos of `owner_id`, newest first
pub async fn list_own_photos<B: ContestBackend>(
    backend: &B,
    owner_id: &str,
) -> Result<Vec<PhotoRecord>, AppError> {
    let mut photos = backend.list_photos_by(owner_id).await?;
    photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(photos)
}

pub async fn rename_photo<B: ContestBackend>(
    backend: &B,
    photo_id: &str,
    title: &str,
) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Tên ảnh không được để trống.".to_string()));
    }
    backend.update_photo_title(photo_id, title).await?;
    Ok(title.to_string())
}

/// Removes the stored image (best effort) and then the photo row.
///
/// A row delete that matches nothing is reported as [`AppError::NotFound`].
pub async fn delete_photo<B: ContestBackend>(
    backend: &B,
    photo_id: &str,
    url: &str,
) -> Result<(), AppError> {
    match object_path_from_url(url) {
        Some(path) => {
            if let Err(e) = backend.remove_image(&path).await {
                log::warn!("Failed to remove image {}: {}", path, e);
            }
        }
        None => log::debug!("Photo {} has no stored image", photo_id),
    }

    let deleted = backend.delete_photo(photo_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(DELETE_PHOTO_FAILED.to_string()));
    }
    log::info!("Photo {} deleted", photo_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::MemoryBackend;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_access_token(Some("token".to_string()))
    }

    fn form(bytes: &[u8]) -> UploadForm {
        UploadForm {
            title: "  Phố cổ  ".to_string(),
            category: "Street".to_string(),
            file_name: "pho-co.JPG".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_sniff_image() {
        assert_eq!(sniff_image(PNG).unwrap(), ImageFormat::Png);
        assert_eq!(sniff_image(JPEG).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            sniff_image(b"just some text"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_preview_data_url() {
        let url = preview_data_url(PNG).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_validation_order() {
        let mut f = form(PNG);
        f.title = " ".to_string();
        assert!(matches!(validate_upload(&f), Err(AppError::Validation(_))));

        let mut f = form(PNG);
        f.category.clear();
        assert!(matches!(validate_upload(&f), Err(AppError::Validation(_))));

        let f = form(&[]);
        assert!(matches!(validate_upload(&f), Err(AppError::Validation(_))));

        let (title, format) = validate_upload(&form(JPEG)).unwrap();
        assert_eq!(title, "Phố cổ");
        assert_eq!(format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_default_category() {
        assert_eq!(
            default_category(&["Landscape".to_string(), "Portrait".to_string()]),
            "Landscape"
        );
        assert_eq!(default_category(&[]), "");
    }

    #[tokio::test]
    async fn test_upload_stores_image_then_row() {
        let backend = backend();
        let photo = upload_photo(&backend, "u1", form(PNG), 1_700_000_000_000)
            .await
            .unwrap();

        assert_eq!(photo.title, "Phố cổ");
        assert_eq!(photo.category, "Street");
        assert_eq!(photo.photographer_id, "u1");
        assert!(photo.url.ends_with("/photos/u1/1700000000000.png"));
        assert_eq!(backend.stored_objects().await, vec!["u1/1700000000000.png"]);
    }

    #[tokio::test]
    async fn test_invalid_upload_makes_no_calls() {
        let backend = backend();
        let result = upload_photo(&backend, "u1", form(b"not an image"), 1).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(backend.stored_objects().await.is_empty());
        assert!(backend.list_photos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_requires_login() {
        let result = upload_photo(&MemoryBackend::new(), "u1", form(PNG), 1).await;
        assert!(matches!(result, Err(AppError::LoginRequired)));
    }

    #[tokio::test]
    async fn test_list_rename_delete_own_photos() {
        let backend = backend();
        let first = upload_photo(&backend, "u1", form(PNG), 1).await.unwrap();
        let second = upload_photo(&backend, "u1", form(JPEG), 2).await.unwrap();
        upload_photo(&backend, "u2", form(PNG), 3).await.unwrap();

        let own = list_own_photos(&backend, "u1").await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|p| p.photographer_id == "u1"));

        assert_eq!(
            rename_photo(&backend, &first.id, " Mới ").await.unwrap(),
            "Mới"
        );
        assert!(matches!(
            rename_photo(&backend, &first.id, "  ").await,
            Err(AppError::Validation(_))
        ));

        delete_photo(&backend, &second.id, &second.url).await.unwrap();
        let own = list_own_photos(&backend, "u1").await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].title, "Mới");
        assert!(!backend
            .stored_objects()
            .await
            .contains(&"u1/2.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_delete_missing_photo_reports_not_found() {
        let backend = backend();
        let result = delete_photo(&backend, "missing", "https://x/storage/v1/object/public/photos/u1/1.png").await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == DELETE_PHOTO_FAILED));
    }
}
