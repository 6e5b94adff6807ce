use crate::components::{CountdownTimer, GalleryView, Lightbox, TopVoted};
use crate::models::GalleryPhoto;
use crate::services::gallery_service::{load_gallery, GalleryData};
use crate::services::RequestTracker;
use contest_backend::AnyBackend;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn HomeScreen(on_login_required: EventHandler<()>) -> Element {
    let backend = use_context::<AnyBackend>();

    let mut data = use_signal(GalleryData::default);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut tracker = use_signal(RequestTracker::default);
    let mut reload = use_signal(|| 0u32);
    let mut selected = use_signal(|| None::<GalleryPhoto>);
    let mut likes_changed = use_signal(|| false);

    // Fetch photos and likes on mount and whenever `reload` is bumped
    use_effect(move || {
        let _ = reload();
        let token = tracker.write().issue();
        let backend = backend.clone();

        spawn(async move {
            let result = load_gallery(&backend).await;
            if !tracker.peek().is_current(token) {
                return;
            }
            loading.set(false);
            match result {
                Ok(loaded) => {
                    error.set(None);
                    data.set(loaded);
                }
                Err(e) => {
                    log::error!("Failed to load gallery: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    });

    let current = data();

    rsx! {
        div { style: "max-width: 1200px; margin: 0 auto; padding: 24px 16px 96px 16px;",
            // Hero
            section { style: "padding: 64px 0 16px 0; text-align: center;",
                p { style: "margin: 0; font-size: 12px; letter-spacing: 0.2em; text-transform: uppercase; color: #f59e0b;",
                    {t!("hero-kicker")}
                }
                h1 { style: "margin: 12px 0; font-size: 44px; font-weight: 900; color: #fff;",
                    {t!("hero-title")}
                }
                p { style: "margin: 0 auto; max-width: 640px; color: #a1a1aa; font-size: 16px;",
                    {t!("hero-subtitle")}
                }
            }

            CountdownTimer {}

            if loading() {
                p { style: "text-align: center; color: #71717a; padding: 48px;", {t!("loading")} }
            } else if let Some(message) = error() {
                div { style: "text-align: center; padding: 48px;",
                    p { style: "color: #f87171;", "{message}" }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| reload += 1,
                        {t!("retry")}
                    }
                }
            } else {
                TopVoted {
                    leaders: current.leaders.clone(),
                    max_likes: current.max_likes,
                    on_open: move |photo| selected.set(Some(photo)),
                }
                GalleryView {
                    photos: current.photos.clone(),
                    categories: current.categories.clone(),
                    on_open: move |photo| selected.set(Some(photo)),
                }
            }

            if let Some(photo) = selected() {
                Lightbox {
                    key: "{photo.id}",
                    photo,
                    on_close: move |_| {
                        selected.set(None);
                        if likes_changed() {
                            likes_changed.set(false);
                            reload += 1;
                        }
                    },
                    on_login_required: move |_| on_login_required.call(()),
                    on_like_changed: move |(id, count): (String, u32)| {
                        likes_changed.set(true);
                        if let Some(photo) = data.write().photos.iter_mut().find(|p| p.id == id) {
                            photo.like_count = count;
                        }
                    },
                }
            }
        }
    }
}
