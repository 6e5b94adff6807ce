use crate::components::{format_timestamp, Toasts};
use crate::error::AppError;
use crate::models::GalleryPhoto;
use crate::services::lightbox_session::{LightboxSession, Mutation, Step};
use crate::services::session_service::authorized;
use crate::services::RequestTracker;
use contest_backend::{AnyBackend, ContestBackend, ProfileRecord};
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::collections::HashMap;
use supabase_auth::SessionState;

/// Full-size view of one photo with likes and comments
#[component]
pub fn Lightbox(
    photo: GalleryPhoto,
    on_close: EventHandler<()>,
    on_login_required: EventHandler<()>,
    /// Called with the photo id and the new like count after a toggle
    on_like_changed: EventHandler<(String, u32)>,
) -> Element {
    let backend = use_context::<AnyBackend>();
    let session_state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Toasts>();

    let mut lightbox = use_signal(|| {
        LightboxSession::placeholder(&photo.id, session_state.peek().user_id())
    });
    let mut tracker = use_signal(RequestTracker::default);
    let mut loading = use_signal(|| true);
    let mut names = use_signal(HashMap::<String, String>::new);
    let mut comment_text = use_signal(String::new);
    let mut comment_error = use_signal(|| None::<String>);
    let mut load_error = use_signal(|| None::<String>);
    let mut reload = use_signal(|| 0u32);

    // Reload whenever the signed-in user changes, since `has_liked` depends on it
    let load_backend = backend.clone();
    let photo_id = photo.id.clone();
    use_effect(move || {
        let _ = reload();
        let user_id = session_state.read().user_id().map(str::to_string);
        let token = tracker.write().issue();
        let backend = load_backend.clone();
        let photo_id = photo_id.clone();
        loading.set(true);
        load_error.set(None);
        // no writes until the like state of this user is known
        lightbox.set(LightboxSession::placeholder(&photo_id, user_id.as_deref()));

        spawn(async move {
            let result = LightboxSession::load(&backend, &photo_id, user_id.as_deref()).await;
            let profiles: Vec<ProfileRecord> = backend.list_profiles().await.unwrap_or_default();
            if !tracker.peek().is_current(token) {
                return;
            }
            loading.set(false);
            names.set(
                profiles
                    .iter()
                    .filter_map(|p| p.display_name().map(|n| (p.id.clone(), n.to_string())))
                    .collect(),
            );
            match result {
                Ok(session) => lightbox.set(session),
                Err(e) => {
                    load_error.set(Some(e.user_message()));
                    toasts.report(&e);
                }
            }
        });
    });

    let send_backend = backend.clone();
    let submit = use_callback(move |step: Result<Step, AppError>| match step {
        Err(AppError::Busy) => {}
        Err(AppError::Validation(msg)) => comment_error.set(Some(msg)),
        Err(e) => toasts.report(&e),
        Ok(Step::LoginRequired) => on_login_required.call(()),
        Ok(Step::Send(mutation)) => {
            comment_error.set(None);
            let backend = authorized(&send_backend, &session_state.peek());
            spawn(async move {
                let result = mutation.send(&backend).await;
                let finished = lightbox.write().finish(&mutation, result);
                match finished {
                    Ok(()) => {
                        if matches!(mutation, Mutation::Comment { .. }) {
                            comment_text.set(String::new());
                        } else {
                            let (id, count) = {
                                let current = lightbox.peek();
                                (current.photo_id.clone(), current.like_count)
                            };
                            on_like_changed.call((id, count));
                        }
                    }
                    Err(e) if e.needs_login() => on_login_required.call(()),
                    Err(e) => toasts.report(&e),
                }
            });
        }
    });

    let session = lightbox();
    let own_id = session_state.read().user_id().map(str::to_string);
    let heart = if session.has_liked { "♥" } else { "♡" };
    let like_style = if session.has_liked {
        "display: flex; align-items: center; gap: 8px; padding: 10px 18px; border-radius: 999px; border: none; background: #ef4444; color: #fff; font-weight: 600; cursor: pointer;"
    } else {
        "display: flex; align-items: center; gap: 8px; padding: 10px 18px; border-radius: 999px; border: 1px solid #3f3f46; background: transparent; color: #fff; font-weight: 600; cursor: pointer;"
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; z-index: 1000; background: rgba(0, 0, 0, 0.92); display: flex; align-items: center; justify-content: center; padding: 24px;",
            onclick: move |_| on_close.call(()),

            div {
                style: "display: flex; flex-wrap: wrap; width: 100%; max-width: 1200px; max-height: 90vh; background: #09090b; border: 1px solid #27272a; border-radius: 16px; overflow: hidden;",
                onclick: move |e| e.stop_propagation(),

                div { style: "flex: 2 1 480px; display: flex; align-items: center; justify-content: center; background: #000;",
                    img { src: "{photo.url}", alt: "{photo.title}", style: "max-width: 100%; max-height: 90vh; object-fit: contain;" }
                }

                div { style: "flex: 1 1 320px; display: flex; flex-direction: column; padding: 24px; color: #fafafa; overflow-y: auto;",
                    div { style: "display: flex; justify-content: space-between; align-items: flex-start;",
                        div {
                            span { style: "font-size: 11px; text-transform: uppercase; font-weight: 700; color: #f59e0b;", "{photo.category_label}" }
                            h2 { style: "margin: 4px 0; font-size: 22px;", "{photo.title}" }
                            p { style: "margin: 0; color: #a1a1aa; font-size: 14px;", {photo.author_or(&t!("unknown-photographer")).to_string()} }
                        }
                        button {
                            style: "background: transparent; border: none; color: #a1a1aa; font-size: 28px; cursor: pointer;",
                            onclick: move |_| on_close.call(()),
                            "×"
                        }
                    }

                    div { style: "margin: 20px 0;",
                        button {
                            style: like_style,
                            disabled: session.is_submitting() || !session.is_ready(),
                            onclick: move |_| {
                                let step = lightbox.write().begin_like();
                                submit.call(step);
                            },
                            span { "{heart}" }
                            span { {t!("likes-count", count: session.like_count)} }
                        }
                        if own_id.is_none() {
                            p { style: "margin: 8px 0 0 0; font-size: 12px; color: #71717a;", {t!("lightbox-login-hint")} }
                        }
                    }

                    h3 { style: "margin: 0 0 12px 0; font-size: 16px;",
                        {t!("lightbox-comments", count: session.comments.len())}
                    }
                    div { style: "display: flex; gap: 8px; margin-bottom: 16px;",
                        input {
                            style: "flex: 1; padding: 10px 12px; border-radius: 10px; border: 1px solid #27272a; background: #18181b; color: #fff;",
                            placeholder: t!("comment-placeholder"),
                            value: "{comment_text}",
                            oninput: move |e| {
                                comment_text.set(e.value());
                                comment_error.set(None);
                            },
                        }
                        button {
                            class: "btn-primary",
                            disabled: session.is_submitting() || !session.is_ready(),
                            onclick: move |_| {
                                let text = comment_text.peek().clone();
                                let step = lightbox.write().begin_comment(&text);
                                submit.call(step);
                            },
                            {t!("comment-send")}
                        }
                    }

                    if let Some(message) = comment_error() {
                        p { style: "margin: -8px 0 12px 0; font-size: 13px; color: #f87171;", "{message}" }
                    }

                    if loading() {
                        p { style: "color: #71717a;", {t!("loading")} }
                    } else if let Some(message) = load_error() {
                        div {
                            p { style: "color: #f87171; font-size: 14px;", "{message}" }
                            button {
                                class: "btn-secondary",
                                onclick: move |_| reload += 1,
                                {t!("retry")}
                            }
                        }
                    } else if session.comments.is_empty() {
                        p { style: "color: #71717a; font-size: 14px;", {t!("comment-empty")} }
                    } else {
                        for comment in session.comments.iter() {
                            div { key: "{comment.id}", style: "padding: 10px 0; border-bottom: 1px solid #27272a;",
                                div { style: "display: flex; justify-content: space-between; font-size: 12px; color: #a1a1aa;",
                                    span { style: "font-weight: 600; color: #e4e4e7;",
                                        if own_id.as_deref() == Some(comment.user_id.as_str()) {
                                            {t!("comment-you")}
                                        } else {
                                            {names.read().get(&comment.user_id).cloned().unwrap_or_else(|| t!("comment-anonymous"))}
                                        }
                                    }
                                    span { "{format_timestamp(&comment.created_at)}" }
                                }
                                p { style: "margin: 4px 0 0 0; font-size: 14px;", "{comment.text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
