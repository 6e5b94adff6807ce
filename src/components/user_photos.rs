use crate::components::{ConfirmModal, Toasts};
use crate::error::AppError;
use crate::services::display_label;
use crate::services::session_service::authorized;
use crate::services::submission_service::{
    default_category, delete_photo, list_own_photos, preview_data_url, rename_photo, upload_photo,
    UploadForm,
};
use crate::services::RequestTracker;
use contest_backend::{AnyBackend, CategoryRecord, ContestBackend, PhotoRecord};
use dioxus::prelude::*;
use dioxus_i18n::t;
use supabase_auth::SessionState;

/// Upload form and the list of the user's own entries
#[component]
pub fn MyPhotosScreen(on_login_required: EventHandler<()>) -> Element {
    let backend = use_context::<AnyBackend>();
    let session = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Toasts>();

    let mut photos = use_signal(Vec::<PhotoRecord>::new);
    let mut categories = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut tracker = use_signal(RequestTracker::default);
    let mut reload = use_signal(|| 0u32);

    let mut title = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut file_name = use_signal(String::new);
    let mut file_bytes = use_signal(Vec::<u8>::new);
    let mut preview = use_signal(|| None::<String>);
    let mut form_error = use_signal(|| None::<String>);
    let mut uploading = use_signal(|| false);

    let mut editing = use_signal(|| None::<(String, String)>);
    let mut pending_delete = use_signal(|| None::<PhotoRecord>);

    let load_backend = backend.clone();
    use_effect(move || {
        let _ = reload();
        let Some(user_id) = session.read().user_id().map(str::to_string) else {
            loading.set(false);
            return;
        };
        let token = tracker.write().issue();
        let backend = load_backend.clone();

        spawn(async move {
            let (own, cats) = load_own_data(&backend, &user_id).await;
            if !tracker.peek().is_current(token) {
                return;
            }
            loading.set(false);
            match own {
                Ok(list) => photos.set(list),
                Err(e) => toasts.report(&e),
            }
            let names: Vec<String> = cats.into_iter().map(|c| c.name).collect();
            if category.peek().is_empty() {
                category.set(default_category(&names));
            }
            categories.set(names);
        });
    });

    let upload_backend = backend.clone();
    let submit_upload = move |_| {
        if uploading() {
            return;
        }
        let state = session.peek().clone();
        let Some(user_id) = state.user_id().map(str::to_string) else {
            on_login_required.call(());
            return;
        };
        let form = UploadForm {
            title: title(),
            category: category(),
            file_name: file_name(),
            bytes: file_bytes(),
        };
        let backend = authorized(&upload_backend, &state);
        form_error.set(None);
        uploading.set(true);

        spawn(async move {
            let now = chrono::Utc::now().timestamp_millis();
            let result = upload_photo(&backend, &user_id, form, now).await;
            uploading.set(false);
            match result {
                Ok(photo) => {
                    log::info!("Uploaded photo {}", photo.id);
                    photos.write().insert(0, photo);
                    title.set(String::new());
                    file_name.set(String::new());
                    file_bytes.set(Vec::new());
                    preview.set(None);
                    toasts.success(t!("upload-success"));
                }
                Err(AppError::Validation(msg)) => form_error.set(Some(msg)),
                Err(e) if e.needs_login() => on_login_required.call(()),
                Err(e) => toasts.report(&e),
            }
        });
    };

    let rename_backend = backend.clone();
    let save_rename = use_callback(move |(photo_id, new_title): (String, String)| {
        let backend = authorized(&rename_backend, &session.peek());
        spawn(async move {
            match rename_photo(&backend, &photo_id, &new_title).await {
                Ok(saved) => {
                    if let Some(p) = photos.write().iter_mut().find(|p| p.id == photo_id) {
                        p.title = saved;
                    }
                    editing.set(None);
                    toasts.success(t!("rename-success"));
                }
                Err(e) => toasts.report(&e),
            }
        });
    });

    let delete_backend = backend.clone();
    let confirm_delete = move |_| {
        let Some(photo) = pending_delete.take() else {
            return;
        };
        let backend = authorized(&delete_backend, &session.peek());
        spawn(async move {
            match delete_photo(&backend, &photo.id, &photo.url).await {
                Ok(()) => {
                    photos.write().retain(|p| p.id != photo.id);
                    toasts.success(t!("delete-photo-success"));
                }
                Err(e) => toasts.report(&e),
            }
        });
    };

    if !session.read().is_authenticated() {
        return rsx! {
            div { style: "max-width: 480px; margin: 96px auto; text-align: center; color: #a1a1aa;",
                h2 { style: "color: #fff;", {t!("my-photos-title")} }
                p { {t!("my-photos-login-required")} }
                button { class: "btn-primary", onclick: move |_| on_login_required.call(()), {t!("nav-login")} }
            }
        };
    }

    let input_style = "width: 100%; padding: 12px 14px; margin-bottom: 12px; font-size: 15px; border: 1px solid #27272a; border-radius: 10px; background: #18181b; color: #fff; box-sizing: border-box;";

    rsx! {
        div { style: "max-width: 1000px; margin: 0 auto; padding: 32px 16px 96px 16px; color: #fafafa;",
            h1 { style: "font-size: 32px; font-weight: 800;", {t!("my-photos-title")} }

            // Upload form
            div { class: "card", style: "margin-bottom: 32px;",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px;", {t!("upload-title")} }
                input {
                    style: "{input_style}",
                    placeholder: t!("upload-photo-title"),
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
                select {
                    style: "{input_style}",
                    value: "{category}",
                    onchange: move |e| category.set(e.value()),
                    for name in categories() {
                        option { key: "{name}", value: "{name}", "{display_label(&name)}" }
                    }
                }
                input {
                    style: "{input_style}",
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |evt: FormEvent| async move {
                        let Some(file) = evt.files().into_iter().next() else {
                            return;
                        };
                        match file.read_bytes().await {
                            Ok(bytes) => {
                                let bytes = bytes.to_vec();
                                match preview_data_url(&bytes) {
                                    Ok(url) => {
                                        preview.set(Some(url));
                                        form_error.set(None);
                                    }
                                    Err(e) => {
                                        preview.set(None);
                                        form_error.set(Some(e.user_message()));
                                    }
                                }
                                file_name.set(file.name());
                                file_bytes.set(bytes);
                            }
                            Err(e) => {
                                log::warn!("Failed to read selected file: {}", e);
                                form_error.set(Some(t!("upload-read-failed")));
                            }
                        }
                    },
                }
                if let Some(url) = preview() {
                    img { src: url, style: "display: block; max-height: 240px; margin: 0 0 12px 0; border-radius: 10px;" }
                }
                if let Some(message) = form_error() {
                    p { style: "margin: 0 0 12px 0; color: #f87171; font-size: 13px;", "{message}" }
                }
                button {
                    class: "btn-primary",
                    disabled: uploading(),
                    onclick: submit_upload,
                    if uploading() { {t!("uploading")} } else { {t!("upload-submit")} }
                }
            }

            // Own photos
            if loading() {
                p { style: "color: #71717a;", {t!("loading")} }
            } else if photos.read().is_empty() {
                p { style: "color: #71717a;", {t!("my-photos-empty")} }
            } else {
                div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px;",
                    for photo in photos() {
                        div { key: "{photo.id}", style: "background: #18181b; border: 1px solid #27272a; border-radius: 12px; overflow: hidden;",
                            img { src: "{photo.url}", alt: "{photo.title}", style: "display: block; width: 100%; height: 180px; object-fit: cover;" }
                            div { style: "padding: 12px;",
                                if editing().as_ref().is_some_and(|(id, _)| *id == photo.id) {
                                    input {
                                        style: "{input_style}",
                                        value: editing().map(|(_, text)| text).unwrap_or_default(),
                                        oninput: {
                                            let id = photo.id.clone();
                                            move |e: FormEvent| editing.set(Some((id.clone(), e.value())))
                                        },
                                    }
                                    div { style: "display: flex; gap: 8px;",
                                        button {
                                            class: "btn-primary",
                                            onclick: move |_| {
                                                if let Some(edit) = editing() {
                                                    save_rename.call(edit);
                                                }
                                            },
                                            {t!("save")}
                                        }
                                        button { class: "btn-secondary", onclick: move |_| editing.set(None), {t!("cancel")} }
                                    }
                                } else {
                                    h3 { style: "margin: 0; font-size: 16px;", "{photo.title}" }
                                    p { style: "margin: 4px 0 12px 0; font-size: 12px; color: #a1a1aa;",
                                        "{display_label(&photo.category)} · {photo.status.as_str()}"
                                    }
                                    div { style: "display: flex; gap: 8px;",
                                        button {
                                            class: "btn-secondary",
                                            onclick: {
                                                let edit = (photo.id.clone(), photo.title.clone());
                                                move |_| editing.set(Some(edit.clone()))
                                            },
                                            {t!("rename")}
                                        }
                                        button {
                                            class: "btn-danger",
                                            onclick: {
                                                let target = photo.clone();
                                                move |_| pending_delete.set(Some(target.clone()))
                                            },
                                            {t!("delete")}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(photo) = pending_delete() {
                ConfirmModal {
                    title: t!("delete-photo-title"),
                    message: t!("delete-photo-message", title: photo.title.clone()),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

/// Own photos plus the category list; a failed category fetch only empties
/// the select box
async fn load_own_data(
    backend: &AnyBackend,
    user_id: &str,
) -> (Result<Vec<PhotoRecord>, AppError>, Vec<CategoryRecord>) {
    let (own, categories) = tokio::join!(list_own_photos(backend, user_id), backend.list_categories());
    let categories = categories.unwrap_or_else(|e| {
        log::warn!("Failed to load categories: {}", e);
        Vec::new()
    });
    (own, categories)
}
