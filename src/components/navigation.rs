use crate::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;
use supabase_auth::SessionState;

#[component]
pub fn NavigationBar(
    current_screen: Screen,
    on_navigate: EventHandler<Screen>,
    on_login: EventHandler<()>,
    on_profile: EventHandler<()>,
    on_logout: EventHandler<()>,
) -> Element {
    let session = use_context::<Signal<SessionState>>();
    let state = session();

    let link_style = |active: bool| {
        if active {
            "padding: 8px 14px; border: none; border-radius: 8px; background: rgba(255,255,255,0.1); color: #fff; font-size: 14px; font-weight: 600; cursor: pointer;"
        } else {
            "padding: 8px 14px; border: none; border-radius: 8px; background: transparent; color: #a1a1aa; font-size: 14px; cursor: pointer;"
        }
    };

    rsx! {
        nav { style: "position: sticky; top: 0; z-index: 500; display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 12px 24px; background: rgba(9, 9, 11, 0.85); backdrop-filter: blur(12px); border-bottom: 1px solid #27272a;",
            button {
                style: "background: transparent; border: none; color: #fff; font-size: 18px; font-weight: 800; cursor: pointer;",
                onclick: move |_| on_navigate.call(Screen::Home),
                {t!("app-title")}
            }

            div { style: "display: flex; align-items: center; gap: 4px;",
                button {
                    style: link_style(current_screen == Screen::Home),
                    onclick: move |_| on_navigate.call(Screen::Home),
                    {t!("nav-home")}
                }
                if state.is_authenticated() {
                    button {
                        style: link_style(current_screen == Screen::MyPhotos),
                        onclick: move |_| on_navigate.call(Screen::MyPhotos),
                        {t!("nav-my-photos")}
                    }
                }
                if state.is_admin {
                    button {
                        style: link_style(current_screen == Screen::Admin),
                        onclick: move |_| on_navigate.call(Screen::Admin),
                        {t!("nav-admin")}
                    }
                }
            }

            div { style: "display: flex; align-items: center; gap: 8px;",
                if let Some(user) = state.user() {
                    button {
                        style: "display: flex; align-items: center; gap: 8px; padding: 6px 10px; border: 1px solid #27272a; border-radius: 999px; background: transparent; color: #e4e4e7; cursor: pointer;",
                        onclick: move |_| on_profile.call(()),
                        if let Some(avatar) = user.user_metadata.avatar_url.clone() {
                            img { src: "{avatar}", style: "width: 24px; height: 24px; border-radius: 50%;" }
                        }
                        span { style: "font-size: 13px;", "{user.greeting_name()}" }
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_logout.call(()),
                        {t!("nav-logout")}
                    }
                } else {
                    button {
                        class: "btn-primary",
                        onclick: move |_| on_login.call(()),
                        {t!("nav-login")}
                    }
                }
            }
        }
    }
}
