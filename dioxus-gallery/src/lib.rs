use dioxus::prelude::*;

/// Represents a single photo in the gallery
#[derive(Clone, PartialEq, Debug)]
pub struct GalleryItem {
    /// Unique identifier for the item
    pub id: String,
    /// URL of the image
    pub image_url: String,
    /// Title shown in the hover overlay
    pub title: String,
    /// Short label in the top-left corner (e.g. the category)
    pub badge: Option<String>,
    /// Secondary line below the title (e.g. like count or author)
    pub caption: Option<String>,
}

/// Configuration for the Gallery component
#[derive(Clone, PartialEq)]
pub struct GalleryConfig {
    /// Column count of the masonry layout
    pub columns: u8,
    /// Text shown when there are no items
    pub empty_text: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            empty_text: "No photos found.".to_string(),
        }
    }
}

/// A reusable masonry photo grid for Dioxus
///
/// Renders the items in CSS columns so portrait and landscape images keep
/// their aspect ratio. Opening an item is delegated to the parent.
///
/// # Example
/// ```rust,ignore
/// Gallery {
///     items: vec![GalleryItem {
///         id: "1".to_string(),
///         image_url: "https://example.com/1.jpg".to_string(),
///         title: "Mountain Silence".to_string(),
///         badge: Some("Landscape".to_string()),
///         caption: None,
///     }],
///     on_open: move |id| {
///         // Show the photo in a lightbox
///     },
/// }
/// ```
#[component]
pub fn Gallery(
    /// List of gallery items to display
    items: Vec<GalleryItem>,
    /// Gallery configuration
    #[props(default)]
    config: GalleryConfig,
    /// Callback when the user opens an item
    #[props(default)]
    on_open: Option<EventHandler<String>>,
) -> Element {
    if items.is_empty() {
        return rsx! {
            div {
                style: "padding: 80px 24px; text-align: center; color: #71717a;",
                "{config.empty_text}"
            }
        };
    }

    let columns = config.columns.max(1);

    rsx! {
        div {
            style: "column-count: {columns}; column-gap: 16px;",
            for item in items {
                GalleryItemView {
                    key: "{item.id}",
                    item: item.clone(),
                    on_open,
                }
            }
        }
    }
}

/// Internal component for rendering a single gallery item
#[component]
fn GalleryItemView(item: GalleryItem, on_open: Option<EventHandler<String>>) -> Element {
    let mut hovered = use_signal(|| false);
    let overlay_opacity = if hovered() { "1" } else { "0" };

    rsx! {
        div {
            style: "position: relative; break-inside: avoid; margin-bottom: 16px; border-radius: 12px; overflow: hidden; background: #18181b; cursor: pointer;",
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            onclick: {
                let item_id = item.id.clone();
                move |_| {
                    if let Some(handler) = &on_open {
                        handler.call(item_id.clone());
                    }
                }
            },
            img {
                src: "{item.image_url}",
                alt: "{item.title}",
                loading: "lazy",
                style: "display: block; width: 100%; height: auto;",
            }
            if let Some(badge) = &item.badge {
                span {
                    style: "position: absolute; top: 12px; left: 12px; padding: 4px 10px; background: rgba(0, 0, 0, 0.6); border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 8px; font-size: 10px; font-weight: 700; text-transform: uppercase; letter-spacing: 0.05em; color: #fff; opacity: {overlay_opacity}; transition: opacity 0.3s;",
                    "{badge}"
                }
            }
            div {
                style: "position: absolute; inset: 0; display: flex; flex-direction: column; justify-content: flex-end; padding: 16px; background: linear-gradient(to top, rgba(0,0,0,0.8), rgba(0,0,0,0.2) 50%, transparent); opacity: {overlay_opacity}; transition: opacity 0.3s;",
                h3 { style: "margin: 0; font-size: 18px; font-weight: 700; color: #fff;",
                    "{item.title}"
                }
                if let Some(caption) = &item.caption {
                    p { style: "margin: 4px 0 0 0; font-size: 13px; color: #d4d4d8;", "{caption}" }
                }
            }
        }
    }
}
