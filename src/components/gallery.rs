use crate::models::GalleryPhoto;
use crate::services::display_label;
use crate::services::gallery_service::filter_by_category;
use dioxus::prelude::*;
use dioxus_gallery::{Gallery, GalleryConfig};
use dioxus_i18n::t;

/// Photo grid with category filter tabs
#[component]
pub fn GalleryView(
    photos: Vec<GalleryPhoto>,
    categories: Vec<String>,
    on_open: EventHandler<GalleryPhoto>,
) -> Element {
    let mut active = use_signal(|| None::<String>);

    let selected = active();
    let visible: Vec<GalleryPhoto> = filter_by_category(&photos, selected.as_deref())
        .into_iter()
        .cloned()
        .collect();
    let unknown_author = t!("unknown-photographer");
    let items = visible
        .iter()
        .map(|p| p.to_gallery_item(&unknown_author))
        .collect::<Vec<_>>();

    let tab_style = |is_active: bool| {
        if is_active {
            "padding: 8px 18px; border-radius: 999px; border: 1px solid #fff; background: #fff; color: #000; font-weight: 600; cursor: pointer;"
        } else {
            "padding: 8px 18px; border-radius: 999px; border: 1px solid #3f3f46; background: transparent; color: #a1a1aa; cursor: pointer;"
        }
    };

    rsx! {
        section { style: "margin: 48px 0;",
            div { style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 8px; margin-bottom: 24px;",
                button {
                    style: tab_style(selected.is_none()),
                    onclick: move |_| active.set(None),
                    {t!("gallery-all")}
                }
                for key in categories {
                    button {
                        key: "{key}",
                        style: tab_style(selected.as_deref() == Some(key.as_str())),
                        onclick: {
                            let key = key.clone();
                            move |_| active.set(Some(key.clone()))
                        },
                        "{display_label(&key)}"
                    }
                }
            }
            Gallery {
                items,
                config: GalleryConfig {
                    empty_text: t!("gallery-empty"),
                    ..GalleryConfig::default()
                },
                on_open: move |id: String| {
                    if let Some(photo) = visible.iter().find(|p| p.id == id) {
                        on_open.call(photo.clone());
                    }
                },
            }
        }
    }
}
