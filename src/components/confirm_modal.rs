use dioxus::prelude::*;

/// Yes/no dialog shown before destructive actions
#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    #[props(default = "Xác nhận".to_string())] confirm_text: String,
    #[props(default = "Hủy".to_string())] cancel_text: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "position: fixed; inset: 0; z-index: 1500; background: rgba(0, 0, 0, 0.7); display: flex; align-items: center; justify-content: center; padding: 16px;",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "width: 100%; max-width: 400px; background: #18181b; border: 1px solid #27272a; border-radius: 16px; padding: 24px; color: #fafafa;",
                onclick: move |e| e.stop_propagation(),
                h3 { style: "margin: 0 0 8px 0; font-size: 18px;", "{title}" }
                p { style: "margin: 0 0 24px 0; color: #a1a1aa; font-size: 14px;", "{message}" }
                div { style: "display: flex; justify-content: flex-end; gap: 12px;",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_cancel.call(()),
                        "{cancel_text}"
                    }
                    button {
                        class: "btn-danger",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_text}"
                    }
                }
            }
        }
    }
}
