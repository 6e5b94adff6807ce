use crate::config::ContestConfig;
use crate::services::{time_left, TimeLeft};
use chrono::Local;
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::time::Duration;

/// Days, hours, minutes and seconds until the submission deadline,
/// refreshed every second
#[component]
pub fn CountdownTimer() -> Element {
    let config = use_context::<ContestConfig>();
    let deadline = config.deadline_local();
    let mut left = use_signal(|| time_left(&Local::now(), &deadline));

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let next = time_left(&Local::now(), &deadline);
            if next != *left.peek() {
                left.set(next);
            }
            if next.is_over() {
                break;
            }
        }
    });

    let current: TimeLeft = left();
    let [days, hours, minutes, seconds] = current.padded();
    let deadline_text = deadline.format("%d/%m/%Y %H:%M").to_string();

    rsx! {
        div { style: "text-align: center; margin: 32px 0;",
            if current.is_over() {
                p { style: "font-size: 18px; font-weight: 600; color: #f87171;",
                    {t!("countdown-over")}
                }
            } else {
                p { style: "margin: 0 0 16px 0; font-size: 13px; text-transform: uppercase; letter-spacing: 0.1em; color: #a1a1aa;",
                    {t!("countdown-heading", deadline: deadline_text)}
                }
                div { style: "display: flex; justify-content: center; gap: 16px;",
                    CountdownBox { value: days, label: t!("countdown-days") }
                    CountdownBox { value: hours, label: t!("countdown-hours") }
                    CountdownBox { value: minutes, label: t!("countdown-minutes") }
                    CountdownBox { value: seconds, label: t!("countdown-seconds") }
                }
            }
        }
    }
}

#[component]
fn CountdownBox(value: String, label: String) -> Element {
    rsx! {
        div { style: "min-width: 72px; padding: 16px 12px; background: rgba(255,255,255,0.05); border: 1px solid rgba(255,255,255,0.1); border-radius: 12px;",
            div { style: "font-size: 32px; font-weight: 800; font-variant-numeric: tabular-nums; color: #fff;", "{value}" }
            div { style: "margin-top: 4px; font-size: 11px; text-transform: uppercase; color: #a1a1aa;", "{label}" }
        }
    }
}
