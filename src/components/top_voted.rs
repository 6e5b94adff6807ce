use crate::models::GalleryPhoto;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// "Hall of fame": every photo tied for the most likes
#[component]
pub fn TopVoted(leaders: Vec<GalleryPhoto>, max_likes: u32, on_open: EventHandler<GalleryPhoto>) -> Element {
    rsx! {
        section { style: "margin: 48px 0;",
            h2 { style: "margin: 0 0 8px 0; font-size: 28px; font-weight: 800; text-align: center; color: #fff;",
                {t!("hall-of-fame-title")}
            }
            if leaders.is_empty() {
                p { style: "text-align: center; color: #71717a;", {t!("hall-of-fame-empty")} }
            } else {
                p { style: "margin: 0 0 24px 0; text-align: center; color: #a1a1aa;",
                    {t!("hall-of-fame-subtitle", count: max_likes)}
                }
                div { style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 24px;",
                    for photo in leaders {
                        LeaderCard { key: "{photo.id}", photo, on_open }
                    }
                }
            }
        }
    }
}

#[component]
fn LeaderCard(photo: GalleryPhoto, on_open: EventHandler<GalleryPhoto>) -> Element {
    let author = photo.author_or(&t!("unknown-photographer")).to_string();
    let avatar = photo
        .author_avatar
        .clone()
        .unwrap_or_else(|| supabase_auth::default_avatar_url(&author));
    let open = photo.clone();

    rsx! {
        div {
            style: "width: 320px; background: #18181b; border: 1px solid #f59e0b; border-radius: 16px; overflow: hidden; cursor: pointer;",
            onclick: move |_| on_open.call(open.clone()),
            div { style: "position: relative;",
                img { src: "{photo.url}", alt: "{photo.title}", style: "display: block; width: 100%; height: 220px; object-fit: cover;" }
                span { style: "position: absolute; top: 12px; right: 12px; padding: 4px 10px; background: #f59e0b; color: #000; border-radius: 999px; font-size: 12px; font-weight: 700;",
                    "♥ {photo.like_count}"
                }
            }
            div { style: "padding: 16px;",
                span { style: "font-size: 11px; text-transform: uppercase; color: #f59e0b; font-weight: 700;", "{photo.category_label}" }
                h3 { style: "margin: 4px 0 12px 0; font-size: 18px; color: #fff;", "{photo.title}" }
                div { style: "display: flex; align-items: center; gap: 8px;",
                    img { src: "{avatar}", alt: "{author}", style: "width: 28px; height: 28px; border-radius: 50%;" }
                    span { style: "font-size: 13px; color: #d4d4d8;", "{author}" }
                }
            }
        }
    }
}
