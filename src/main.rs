use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;
use dioxus_i18n::t;
use std::time::Duration;
use supabase_auth::{AuthModal, Session, SessionEvent, SessionState};

mod components;
mod config;
mod database;
mod error;
mod i18n;
mod models;
mod services;

use components::{
    dispatch, AdminScreen, HomeScreen, MyPhotosScreen, NavigationBar, ProfileModal, ToastHost,
    Toasts,
};
use models::ToastQueue;
use services::session_service;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// How often the session expiry is checked
const REFRESH_CHECK_INTERVAL: Duration = Duration::from_secs(60);
/// Sessions are refreshed this long before they expire
const REFRESH_MARGIN_SECS: i64 = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dioxus::launch(App);
}

/// Top-level screens reachable from the navigation bar
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Home,
    MyPhotos,
    Admin,
}

fn store_session(session: &Session) {
    let stored = database::init_database()
        .and_then(|conn| session_service::persist_session(&conn, session));
    if let Err(e) = stored {
        log::warn!("Failed to store session: {}", e);
    }
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);

    let services = use_hook(config::init_services);
    use_context_provider(|| services.config.clone());
    use_context_provider(|| services.backend.clone());
    use_context_provider(|| services.auth.clone());

    let session = use_signal(SessionState::default);
    use_context_provider(|| session);
    let queue = use_signal(ToastQueue::default);
    let toasts = use_context_provider(|| Toasts::new(queue, services.config.toast_duration_ms));

    let mut current_screen = use_signal(|| Screen::Home);
    let mut show_auth = use_signal(|| false);
    let mut show_profile = use_signal(|| false);
    let mut role_checked_for = use_signal(|| None::<String>);

    // Seed memory mode and restore the stored session
    let startup = services.clone();
    use_future(move || {
        let services = startup.clone();
        async move {
            session_service::seed_demo_admin(&services.backend, &services.auth, &services.config)
                .await;

            let restored = match database::init_database() {
                Ok(conn) => {
                    let now = chrono::Utc::now().timestamp();
                    session_service::restore_session(&conn, &services.auth, now)
                        .await
                        .unwrap_or_else(|e| {
                            log::error!("Failed to restore session: {}", e);
                            None
                        })
                }
                Err(e) => {
                    log::error!("Failed to open local database: {}", e);
                    None
                }
            };
            if session.peek().restored {
                // Signed in or out while the restore was running
                log::info!("Session changed during restore, discarding stored one");
                if let Some(current) = session.peek().session.clone() {
                    store_session(&current);
                }
                return;
            }
            if let Some(s) = &restored {
                log::info!("Restored session for {}", s.user.id);
            }
            dispatch(session, SessionEvent::Restored(restored));
        }
    });

    // Keep the access token fresh while the app is open
    let refresh_auth = services.auth.clone();
    use_future(move || {
        let auth = refresh_auth.clone();
        async move {
            loop {
                tokio::time::sleep(REFRESH_CHECK_INTERVAL).await;
                let Some(current) = session.peek().session.clone() else {
                    continue;
                };
                let soon = chrono::Utc::now().timestamp() + REFRESH_MARGIN_SECS;
                if !current.is_expired(soon) {
                    continue;
                }
                match auth.refresh(&current.refresh_token).await {
                    Ok(fresh) => {
                        store_session(&fresh);
                        dispatch(session, SessionEvent::TokenRefreshed(fresh));
                    }
                    Err(e) if error::AppError::from(e.clone()).needs_login() => {
                        if session.peek().user_id() != Some(current.user.id.as_str()) {
                            continue;
                        }
                        log::warn!("Refresh token rejected, signing out: {}", e);
                        if let Err(e) = database::init_database()
                            .and_then(|conn| database::session_store::clear_session(&conn))
                        {
                            log::warn!("Failed to clear stored session: {}", e);
                        }
                        dispatch(session, SessionEvent::SignedOut);
                        current_screen.set(Screen::Home);
                        toasts.warning(t!("session-expired"));
                    }
                    Err(e) => log::warn!("Token refresh failed: {}", e),
                }
            }
        }
    });

    // Look up the role once per signed-in user
    let role_backend = services.backend.clone();
    use_effect(move || {
        let user_id = session.read().user_id().map(str::to_string);
        if *role_checked_for.peek() == user_id {
            return;
        }
        role_checked_for.set(user_id.clone());
        let Some(user_id) = user_id else {
            return;
        };
        let backend = role_backend.clone();
        spawn(async move {
            let is_admin = session_service::resolve_role(&backend, &user_id).await;
            dispatch(session, SessionEvent::RoleResolved { user_id, is_admin });
        });
    });

    let signin_backend = services.backend.clone();
    let on_signed_in = move |new_session: Session| {
        show_auth.set(false);
        store_session(&new_session);
        let user = new_session.user.clone();
        toasts.success(t!("login-success", name: user.greeting_name().to_string()));
        dispatch(session, SessionEvent::SignedIn(new_session));

        let backend = signin_backend.clone();
        spawn(async move {
            if let Err(e) = session_service::ensure_profile(&backend, &user).await {
                log::warn!("Failed to create profile for {}: {}", user.id, e);
            }
        });
    };

    let logout_auth = services.auth.clone();
    let on_logout = move |_| {
        let Some(current) = session.peek().session.clone() else {
            return;
        };
        dispatch(session, SessionEvent::SignedOut);
        current_screen.set(Screen::Home);
        toasts.info(t!("logout-success"));

        let auth = logout_auth.clone();
        spawn(async move {
            let result = match database::init_database() {
                Ok(conn) => session_service::sign_out(&conn, &auth, &current).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::warn!("Sign-out cleanup failed: {}", e);
            }
        });
    };

    let open_login = move |_| show_auth.set(true);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "min-height: 100vh; background: #09090b; font-family: sans-serif;",
            NavigationBar {
                current_screen: current_screen(),
                on_navigate: move |screen| current_screen.set(screen),
                on_login: open_login,
                on_profile: move |_| show_profile.set(true),
                on_logout,
            }

            match current_screen() {
                Screen::Home => rsx! {
                    HomeScreen { on_login_required: open_login }
                },
                Screen::MyPhotos => rsx! {
                    MyPhotosScreen { on_login_required: open_login }
                },
                Screen::Admin => rsx! {
                    AdminScreen { on_login_required: open_login }
                },
            }

            if show_auth() {
                AuthModal {
                    on_close: move |_| show_auth.set(false),
                    on_signed_in,
                    on_registered: move |message: String| toasts.info(message),
                }
            }

            if show_profile() {
                ProfileModal { on_close: move |_| show_profile.set(false) }
            }

            ToastHost {}
        }
    }
}
