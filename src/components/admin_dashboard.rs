use crate::components::{ConfirmModal, Toasts};
use crate::error::AppError;
use crate::models::GalleryPhoto;
use crate::services::admin_service::{
    add_category, check_admin, delete_category, delete_photo, delete_user, load_dashboard,
    rename_category, DashboardData, TOP_COUNT,
};
use crate::services::display_label;
use crate::services::session_service::authorized;
use crate::services::RequestTracker;
use contest_backend::{AnyBackend, CategoryRecord, ProfileRecord};
use dioxus::prelude::*;
use dioxus_gallery::{Gallery, GalleryConfig};
use dioxus_i18n::t;
use supabase_auth::SessionState;

#[derive(Clone, Copy, PartialEq, Debug)]
enum AdminTab {
    Overview,
    Photos,
    Users,
    Categories,
}

/// Destructive action waiting for confirmation
#[derive(Clone, PartialEq, Debug)]
enum PendingDelete {
    Photo(GalleryPhoto),
    User(ProfileRecord),
    Category(CategoryRecord),
}

#[component]
pub fn AdminScreen(on_login_required: EventHandler<()>) -> Element {
    let backend = use_context::<AnyBackend>();
    let session = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Toasts>();

    let mut tab = use_signal(|| AdminTab::Overview);
    let mut data = use_signal(DashboardData::default);
    let mut loading = use_signal(|| true);
    let mut tracker = use_signal(RequestTracker::default);
    let mut reload = use_signal(|| 0u32);
    let mut pending = use_signal(|| None::<PendingDelete>);
    let mut new_category = use_signal(String::new);
    let mut editing_category = use_signal(|| None::<(String, String)>);

    let load_backend = backend.clone();
    use_effect(move || {
        let _ = reload();
        let state = session.read().clone();
        if check_admin(&state).is_err() {
            return;
        }
        let token = tracker.write().issue();
        let backend = authorized(&load_backend, &state);

        spawn(async move {
            let result = load_dashboard(&backend).await;
            if !tracker.peek().is_current(token) {
                return;
            }
            loading.set(false);
            match result {
                Ok(loaded) => data.set(loaded),
                Err(e) => toasts.report(&e),
            }
        });
    });

    let delete_backend = backend.clone();
    let confirm_delete = move |_| {
        let Some(action) = pending.take() else {
            return;
        };
        let state = session.peek().clone();
        let backend = authorized(&delete_backend, &state);
        spawn(async move {
            let (result, success) = match &action {
                PendingDelete::Photo(photo) => (
                    delete_photo(&backend, &state, photo).await,
                    t!("delete-photo-success"),
                ),
                PendingDelete::User(profile) => (
                    delete_user(&backend, &state, &profile.id).await,
                    t!("delete-user-success"),
                ),
                PendingDelete::Category(category) => (
                    delete_category(&backend, &state, &category.id).await,
                    t!("delete-category-success"),
                ),
            };
            match result {
                Ok(()) => {
                    toasts.success(success);
                    reload += 1;
                }
                Err(e) => toasts.report(&e),
            }
        });
    };

    let category_backend = backend.clone();
    let submit_category = move |_| {
        let state = session.peek().clone();
        let backend = authorized(&category_backend, &state);
        let existing = data.peek().categories.clone();
        let name = new_category();
        spawn(async move {
            match add_category(&backend, &state, &existing, &name).await {
                Ok(_) => {
                    new_category.set(String::new());
                    toasts.success(t!("category-added"));
                    reload += 1;
                }
                Err(e) => toasts.report(&e),
            }
        });
    };

    let rename_backend = backend.clone();
    let save_category = use_callback(move |(id, name): (String, String)| {
        let state = session.peek().clone();
        let backend = authorized(&rename_backend, &state);
        let existing = data.peek().categories.clone();
        spawn(async move {
            match rename_category(&backend, &state, &existing, &id, &name).await {
                Ok(_) => {
                    editing_category.set(None);
                    toasts.success(t!("category-updated"));
                    reload += 1;
                }
                Err(e) => toasts.report(&e),
            }
        });
    });

    let state = session();
    if !state.restored {
        return rsx! {
            p { style: "text-align: center; padding: 96px; color: #71717a;", {t!("loading")} }
        };
    }
    match check_admin(&state) {
        Err(AppError::LoginRequired) => {
            return rsx! {
                div { style: "max-width: 480px; margin: 96px auto; text-align: center; color: #a1a1aa;",
                    p { {t!("admin-login-required")} }
                    button { class: "btn-primary", onclick: move |_| on_login_required.call(()), {t!("nav-login")} }
                }
            };
        }
        Err(_) => {
            return rsx! {
                div { style: "max-width: 480px; margin: 96px auto; text-align: center;",
                    h2 { style: "color: #f87171;", {t!("admin-access-denied")} }
                    p { style: "color: #a1a1aa;", {t!("admin-access-denied-detail")} }
                }
            };
        }
        Ok(()) => {}
    }

    let current = data();
    let unknown_author = t!("unknown-photographer");
    let tab_style = |active: bool| {
        if active {
            "padding: 10px 16px; border: none; border-bottom: 2px solid #f59e0b; background: transparent; color: #fff; font-weight: 600; cursor: pointer;"
        } else {
            "padding: 10px 16px; border: none; border-bottom: 2px solid transparent; background: transparent; color: #a1a1aa; cursor: pointer;"
        }
    };
    let cell = "padding: 10px 12px; border-bottom: 1px solid #27272a; text-align: left; font-size: 14px;";

    rsx! {
        div { style: "max-width: 1200px; margin: 0 auto; padding: 32px 16px 96px 16px; color: #fafafa;",
            h1 { style: "font-size: 32px; font-weight: 800;", {t!("admin-title")} }

            div { style: "display: flex; gap: 4px; margin-bottom: 24px; border-bottom: 1px solid #27272a;",
                button { style: tab_style(tab() == AdminTab::Overview), onclick: move |_| tab.set(AdminTab::Overview), {t!("admin-tab-overview")} }
                button { style: tab_style(tab() == AdminTab::Photos), onclick: move |_| tab.set(AdminTab::Photos), {t!("admin-tab-photos")} }
                button { style: tab_style(tab() == AdminTab::Users), onclick: move |_| tab.set(AdminTab::Users), {t!("admin-tab-users")} }
                button { style: tab_style(tab() == AdminTab::Categories), onclick: move |_| tab.set(AdminTab::Categories), {t!("admin-tab-categories")} }
            }

            if loading() {
                p { style: "color: #71717a;", {t!("loading")} }
            } else {
                match tab() {
                    AdminTab::Overview => rsx! {
                        div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-bottom: 32px;",
                            StatCard { label: t!("admin-stat-photos"), value: current.stats.photos }
                            StatCard { label: t!("admin-stat-categories"), value: current.stats.categories }
                            StatCard { label: t!("admin-stat-users"), value: current.stats.users }
                            StatCard { label: t!("admin-stat-likes"), value: current.stats.likes }
                        }
                        h2 { style: "font-size: 20px;", {t!("admin-top-photos")} }
                        Gallery {
                            items: current.top_photos.iter().map(|p| p.to_gallery_item(&unknown_author)).collect::<Vec<_>>(),
                            config: GalleryConfig {
                                columns: TOP_COUNT as u8,
                                empty_text: t!("hall-of-fame-empty"),
                            },
                        }
                    },
                    AdminTab::Photos => rsx! {
                        table { style: "width: 100%; border-collapse: collapse;",
                            thead {
                                tr {
                                    th { style: cell, {t!("admin-col-photo")} }
                                    th { style: cell, {t!("admin-col-title")} }
                                    th { style: cell, {t!("admin-col-category")} }
                                    th { style: cell, {t!("admin-col-author")} }
                                    th { style: cell, {t!("admin-col-likes")} }
                                    th { style: cell }
                                }
                            }
                            tbody {
                                for photo in current.photos.iter().cloned() {
                                    tr { key: "{photo.id}",
                                        td { style: cell, img { src: "{photo.url}", style: "width: 64px; height: 48px; object-fit: cover; border-radius: 6px;" } }
                                        td { style: cell, "{photo.title}" }
                                        td { style: cell, "{photo.category_label}" }
                                        td { style: cell, {photo.author_or(&unknown_author).to_string()} }
                                        td { style: cell, "{photo.like_count}" }
                                        td { style: cell,
                                            button {
                                                class: "btn-danger",
                                                onclick: {
                                                    let target = PendingDelete::Photo(photo.clone());
                                                    move |_| pending.set(Some(target.clone()))
                                                },
                                                {t!("delete")}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    AdminTab::Users => rsx! {
                        table { style: "width: 100%; border-collapse: collapse;",
                            thead {
                                tr {
                                    th { style: cell, {t!("admin-col-name")} }
                                    th { style: cell, {t!("admin-col-email")} }
                                    th { style: cell, {t!("admin-col-role")} }
                                    th { style: cell }
                                }
                            }
                            tbody {
                                for profile in current.profiles.iter().cloned() {
                                    tr { key: "{profile.id}",
                                        td { style: cell, "{profile.display_name().unwrap_or(\"-\")}" }
                                        td { style: cell, "{profile.email.clone().unwrap_or_default()}" }
                                        td { style: cell, "{profile.role.as_str()}" }
                                        td { style: cell,
                                            if state.user_id() != Some(profile.id.as_str()) {
                                                button {
                                                    class: "btn-danger",
                                                    onclick: {
                                                        let target = PendingDelete::User(profile.clone());
                                                        move |_| pending.set(Some(target.clone()))
                                                    },
                                                    {t!("delete")}
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    AdminTab::Categories => rsx! {
                        div { style: "display: flex; gap: 8px; margin-bottom: 16px;",
                            input {
                                style: "flex: 1; padding: 10px 12px; border-radius: 10px; border: 1px solid #27272a; background: #18181b; color: #fff;",
                                placeholder: t!("admin-new-category"),
                                value: "{new_category}",
                                oninput: move |e| new_category.set(e.value()),
                            }
                            button { class: "btn-primary", onclick: submit_category, {t!("admin-add-category")} }
                        }
                        table { style: "width: 100%; border-collapse: collapse;",
                            thead {
                                tr {
                                    th { style: cell, {t!("admin-col-key")} }
                                    th { style: cell, {t!("admin-col-label")} }
                                    th { style: cell }
                                }
                            }
                            tbody {
                                for category in current.categories.iter().cloned() {
                                    tr { key: "{category.id}",
                                        if editing_category().as_ref().is_some_and(|(id, _)| *id == category.id) {
                                            td { style: cell,
                                                input {
                                                    style: "padding: 6px 10px; border-radius: 8px; border: 1px solid #27272a; background: #18181b; color: #fff;",
                                                    value: editing_category().map(|(_, name)| name).unwrap_or_default(),
                                                    oninput: {
                                                        let id = category.id.clone();
                                                        move |e: FormEvent| editing_category.set(Some((id.clone(), e.value())))
                                                    },
                                                }
                                            }
                                            td { style: cell, "{display_label(&category.name)}" }
                                            td { style: cell,
                                                button {
                                                    class: "btn-primary",
                                                    onclick: move |_| {
                                                        if let Some(edit) = editing_category() {
                                                            save_category.call(edit);
                                                        }
                                                    },
                                                    {t!("save")}
                                                }
                                                button { class: "btn-secondary", onclick: move |_| editing_category.set(None), {t!("cancel")} }
                                            }
                                        } else {
                                            td { style: cell, "{category.name}" }
                                            td { style: cell, "{display_label(&category.name)}" }
                                            td { style: cell,
                                                button {
                                                    class: "btn-secondary",
                                                    onclick: {
                                                        let edit = (category.id.clone(), category.name.clone());
                                                        move |_| editing_category.set(Some(edit.clone()))
                                                    },
                                                    {t!("rename")}
                                                }
                                                button {
                                                    class: "btn-danger",
                                                    onclick: {
                                                        let target = PendingDelete::Category(category.clone());
                                                        move |_| pending.set(Some(target.clone()))
                                                    },
                                                    {t!("delete")}
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }

            if let Some(action) = pending() {
                ConfirmModal {
                    title: t!("confirm-delete-title"),
                    message: match action {
                        PendingDelete::Photo(photo) => t!("delete-photo-message", title: photo.title),
                        PendingDelete::User(profile) => t!("delete-user-message", name: profile.display_name().unwrap_or("-").to_string()),
                        PendingDelete::Category(category) => t!("delete-category-message", name: category.name),
                    },
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending.set(None),
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: usize) -> Element {
    rsx! {
        div { style: "padding: 20px; background: #18181b; border: 1px solid #27272a; border-radius: 12px;",
            p { style: "margin: 0; font-size: 12px; text-transform: uppercase; color: #a1a1aa;", "{label}" }
            p { style: "margin: 8px 0 0 0; font-size: 32px; font-weight: 800;", "{value}" }
        }
    }
}
