use crate::client::AuthClient;
use crate::models::{AuthTab, Session, SignUpOutcome};
use crate::service::registration_metadata;
use dioxus::prelude::*;

/// Custom labels for the authentication UI
#[derive(Clone, PartialEq)]
pub struct AuthLabels {
    pub login_tab: String,
    pub register_tab: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub login_button: String,
    pub register_button: String,
    pub working: String,
    pub missing_fields: String,
    pub check_email: String,
    pub close: String,
}

impl Default for AuthLabels {
    fn default() -> Self {
        Self {
            login_tab: "Đăng nhập".to_string(),
            register_tab: "Đăng ký".to_string(),
            full_name: "Họ và tên".to_string(),
            email: "Email".to_string(),
            password: "Mật khẩu".to_string(),
            login_button: "Đăng nhập".to_string(),
            register_button: "Tạo tài khoản".to_string(),
            working: "Đang xử lý...".to_string(),
            missing_fields: "Vui lòng điền đầy đủ thông tin.".to_string(),
            check_email: "Đăng ký thành công! Vui lòng kiểm tra hộp thư (cả mục Spam) để xác thực tài khoản trước khi đăng nhập.".to_string(),
            close: "×".to_string(),
        }
    }
}

/// Props for the AuthModal
#[derive(Props, Clone, PartialEq)]
pub struct AuthModalProps {
    /// Tab shown when the modal opens
    #[props(default)]
    pub initial_tab: AuthTab,
    pub on_close: EventHandler<()>,
    /// Called with the new session after a successful sign-in
    pub on_signed_in: EventHandler<Session>,
    /// Called with an info message when registration needs email confirmation
    #[props(default)]
    pub on_registered: Option<EventHandler<String>>,
    /// Called with the user-facing message of a failed attempt
    #[props(default)]
    pub on_error: Option<EventHandler<String>>,
    #[props(default)]
    pub labels: Option<AuthLabels>,
}

/// Login / registration dialog
///
/// Expects an [`AuthClient`] in the Dioxus context. The dialog only talks to
/// the auth provider; storing the session is left to `on_signed_in`.
///
/// # Example
/// ```rust,ignore
/// AuthModal {
///     initial_tab: AuthTab::Register,
///     on_close: move |_| show_auth.set(false),
///     on_signed_in: move |session| {
///         // Persist the session and update the app state
///     },
/// }
/// ```
#[component]
pub fn AuthModal(props: AuthModalProps) -> Element {
    let client = use_context::<AuthClient>();
    let labels = props.labels.clone().unwrap_or_default();

    let mut active_tab = use_signal(|| props.initial_tab);
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut info = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let submit = {
        let labels = labels.clone();
        let on_signed_in = props.on_signed_in;
        let on_registered = props.on_registered;
        let on_error = props.on_error;

        move |_| {
            if loading() {
                return;
            }
            let tab = active_tab();
            let email_value = email().trim().to_string();
            let password_value = password();
            let name_value = full_name().trim().to_string();

            let missing = email_value.is_empty()
                || password_value.is_empty()
                || (tab == AuthTab::Register && name_value.is_empty());
            if missing {
                error.set(Some(labels.missing_fields.clone()));
                return;
            }

            error.set(None);
            info.set(None);
            loading.set(true);

            let client = client.clone();
            let check_email = labels.check_email.clone();

            spawn(async move {
                let result = match tab {
                    AuthTab::Register => {
                        let metadata = registration_metadata(&email_value, &name_value);
                        client
                            .sign_up(&email_value, &password_value, metadata)
                            .await
                            .map(|outcome| match outcome {
                                SignUpOutcome::SignedIn(session) => Some(session),
                                SignUpOutcome::ConfirmationRequired(_) => None,
                            })
                    }
                    AuthTab::Login => client
                        .sign_in(&email_value, &password_value)
                        .await
                        .map(Some),
                };

                loading.set(false);
                match result {
                    Ok(Some(session)) => {
                        password.set(String::new());
                        on_signed_in.call(session);
                    }
                    Ok(None) => {
                        log::info!("Registration pending email confirmation");
                        info.set(Some(check_email.clone()));
                        active_tab.set(AuthTab::Login);
                        password.set(String::new());
                        if let Some(handler) = on_registered {
                            handler.call(check_email);
                        }
                    }
                    Err(e) => {
                        log::warn!("Authentication failed: {}", e);
                        let message = e.user_message();
                        error.set(Some(message.clone()));
                        if let Some(handler) = on_error {
                            handler.call(message);
                        }
                    }
                }
            });
        }
    };

    let tab_style = |selected: bool| {
        if selected {
            "flex: 1; padding: 10px; border: none; border-bottom: 2px solid #ffffff; background: transparent; color: #ffffff; font-weight: 700; cursor: pointer;"
        } else {
            "flex: 1; padding: 10px; border: none; border-bottom: 2px solid transparent; background: transparent; color: #8a8f98; cursor: pointer;"
        }
    };

    let input_style = "width: 100%; padding: 12px 14px; margin-bottom: 12px; font-size: 15px; border: 1px solid #2a2f3a; border-radius: 10px; background: #0b0e14; color: #fff; box-sizing: border-box;";

    rsx! {
        div {
            style: "position: fixed; inset: 0; z-index: 1000; background: rgba(0, 0, 0, 0.8); display: flex; align-items: center; justify-content: center; padding: 16px;",
            onclick: move |_| props.on_close.call(()),

            div {
                style: "position: relative; width: 100%; max-width: 420px; background: #11151c; border: 1px solid #1f2530; border-radius: 16px; padding: 24px; color: #fff;",
                onclick: move |e| e.stop_propagation(),

                button {
                    style: "position: absolute; top: 12px; right: 12px; background: transparent; border: none; color: #8a8f98; font-size: 24px; cursor: pointer;",
                    onclick: move |_| props.on_close.call(()),
                    "{labels.close}"
                }

                div { style: "display: flex; margin-bottom: 20px;",
                    button {
                        style: tab_style(active_tab() == AuthTab::Login),
                        onclick: move |_| {
                            active_tab.set(AuthTab::Login);
                            error.set(None);
                        },
                        "{labels.login_tab}"
                    }
                    button {
                        style: tab_style(active_tab() == AuthTab::Register),
                        onclick: move |_| {
                            active_tab.set(AuthTab::Register);
                            error.set(None);
                            info.set(None);
                        },
                        "{labels.register_tab}"
                    }
                }

                if active_tab() == AuthTab::Register {
                    input {
                        style: "{input_style}",
                        r#type: "text",
                        placeholder: "{labels.full_name}",
                        value: "{full_name}",
                        oninput: move |e| full_name.set(e.value()),
                    }
                }
                input {
                    style: "{input_style}",
                    r#type: "email",
                    placeholder: "{labels.email}",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    style: "{input_style}",
                    r#type: "password",
                    placeholder: "{labels.password}",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }

                if let Some(message) = error() {
                    p { style: "margin: 0 0 12px 0; padding: 10px; border-radius: 8px; background: rgba(239, 68, 68, 0.1); color: #f87171; font-size: 13px;",
                        "{message}"
                    }
                }
                if let Some(message) = info() {
                    p { style: "margin: 0 0 12px 0; padding: 10px; border-radius: 8px; background: rgba(34, 197, 94, 0.1); color: #4ade80; font-size: 13px;",
                        "{message}"
                    }
                }

                button {
                    class: "btn-primary",
                    style: "width: 100%; padding: 12px; font-size: 16px; font-weight: 600;",
                    disabled: loading(),
                    onclick: submit,
                    if loading() {
                        "{labels.working}"
                    } else if active_tab() == AuthTab::Register {
                        "{labels.register_button}"
                    } else {
                        "{labels.login_button}"
                    }
                }
            }
        }
    }
}
