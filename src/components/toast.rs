use crate::error::AppError;
use crate::models::{Toast, ToastKind, ToastQueue};
use dioxus::prelude::*;
use std::time::Duration;

/// Handle for showing notifications, provided through the context
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
    duration_ms: u64,
}

impl Toasts {
    pub fn new(queue: Signal<ToastQueue>, duration_ms: u64) -> Self {
        Self { queue, duration_ms }
    }

    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let mut queue = self.queue;
        queue.write().push(kind, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(ToastKind::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    /// Error toast with the user-facing text of `err`
    pub fn report(&self, err: &AppError) {
        log::warn!("{}", err);
        self.error(err.user_message());
    }
}

/// Renders the visible toasts in the bottom-right corner
#[component]
pub fn ToastHost() -> Element {
    let toasts = use_context::<Toasts>();
    let queue = toasts.queue;
    let visible = queue.read().toasts().to_vec();

    rsx! {
        div { style: "position: fixed; bottom: 24px; right: 24px; z-index: 2000; display: flex; flex-direction: column; gap: 8px;",
            for toast in visible {
                ToastItem { key: "{toast.id}", toast, queue, duration_ms: toasts.duration_ms }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, queue: Signal<ToastQueue>, duration_ms: u64) -> Element {
    let id = toast.id;

    // dismissal timer lives as long as the toast is shown
    use_future(move || async move {
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        queue.write().dismiss(id);
    });

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 12px; min-width: 260px; max-width: 380px; padding: 12px 16px; background: #18181b; color: #fafafa; border-left: 4px solid {toast.kind.accent()}; border-radius: 10px; box-shadow: 0 8px 24px rgba(0,0,0,0.4);",
            span { style: "font-weight: 700; color: {toast.kind.accent()};", "{toast.kind.icon()}" }
            span { style: "flex: 1; font-size: 14px;", "{toast.message}" }
            button {
                style: "background: transparent; border: none; color: #71717a; cursor: pointer; font-size: 16px;",
                onclick: move |_| queue.write().dismiss(id),
                "×"
            }
        }
    }
}
