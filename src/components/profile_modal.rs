use crate::components::{dispatch, Toasts};
use crate::database;
use crate::services::account_service::{update_profile, ProfileForm};
use crate::services::session_service;
use dioxus::prelude::*;
use dioxus_i18n::t;
use supabase_auth::{AuthClient, SessionEvent, SessionState};

/// Edit the full name and optionally the password of the signed-in user
#[component]
pub fn ProfileModal(on_close: EventHandler<()>) -> Element {
    let auth = use_context::<AuthClient>();
    let session = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Toasts>();

    let initial = session
        .peek()
        .user()
        .map(ProfileForm::for_user)
        .unwrap_or_default();
    let mut full_name = use_signal(|| initial.full_name.clone());
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let save = move |_| {
        if saving() {
            return;
        }
        let Some(current) = session.peek().session.clone() else {
            on_close.call(());
            return;
        };
        let form = ProfileForm {
            full_name: full_name(),
            new_password: new_password(),
            confirm_password: confirm_password(),
        };
        let auth = auth.clone();
        error.set(None);
        saving.set(true);

        spawn(async move {
            let result = update_profile(&auth, &current.access_token, &current.user, &form).await;
            saving.set(false);
            match result {
                Ok(user) => {
                    dispatch(session, SessionEvent::UserUpdated(user));
                    if let Some(updated) = session.peek().session.clone() {
                        let persisted = database::init_database()
                            .and_then(|conn| session_service::persist_session(&conn, &updated));
                        if let Err(e) = persisted {
                            log::warn!("Failed to store updated session: {}", e);
                        }
                    }
                    toasts.success(t!("profile-saved"));
                    on_close.call(());
                }
                Err(e) if matches!(e, crate::error::AppError::Validation(_)) => {
                    error.set(Some(e.user_message()));
                }
                Err(e) => toasts.report(&e),
            }
        });
    };

    let email = session
        .read()
        .user()
        .and_then(|u| u.email.clone())
        .unwrap_or_default();
    let input_style = "width: 100%; padding: 12px 14px; margin-bottom: 12px; font-size: 15px; border: 1px solid #2a2f3a; border-radius: 10px; background: #0b0e14; color: #fff; box-sizing: border-box;";

    rsx! {
        div {
            style: "position: fixed; inset: 0; z-index: 1000; background: rgba(0, 0, 0, 0.8); display: flex; align-items: center; justify-content: center; padding: 16px;",
            onclick: move |_| on_close.call(()),
            div {
                style: "width: 100%; max-width: 420px; background: #11151c; border: 1px solid #1f2530; border-radius: 16px; padding: 24px; color: #fff;",
                onclick: move |e| e.stop_propagation(),

                h2 { style: "margin: 0 0 4px 0; font-size: 20px;", {t!("profile-title")} }
                p { style: "margin: 0 0 20px 0; font-size: 13px; color: #8a8f98;", "{email}" }

                label { style: "display: block; margin-bottom: 6px; font-size: 13px; color: #a1a1aa;", {t!("profile-full-name")} }
                input {
                    style: "{input_style}",
                    value: "{full_name}",
                    oninput: move |e| full_name.set(e.value()),
                }

                label { style: "display: block; margin-bottom: 6px; font-size: 13px; color: #a1a1aa;", {t!("profile-new-password")} }
                input {
                    style: "{input_style}",
                    r#type: "password",
                    placeholder: t!("profile-password-hint"),
                    value: "{new_password}",
                    oninput: move |e| new_password.set(e.value()),
                }
                input {
                    style: "{input_style}",
                    r#type: "password",
                    placeholder: t!("profile-confirm-password"),
                    value: "{confirm_password}",
                    oninput: move |e| confirm_password.set(e.value()),
                }

                if let Some(message) = error() {
                    p { style: "margin: 0 0 12px 0; padding: 10px; border-radius: 8px; background: rgba(239, 68, 68, 0.1); color: #f87171; font-size: 13px;",
                        "{message}"
                    }
                }

                div { style: "display: flex; justify-content: flex-end; gap: 12px;",
                    button { class: "btn-secondary", onclick: move |_| on_close.call(()), {t!("cancel")} }
                    button {
                        class: "btn-primary",
                        disabled: saving(),
                        onclick: save,
                        if saving() { {t!("saving")} } else { {t!("save")} }
                    }
                }
            }
        }
    }
}
