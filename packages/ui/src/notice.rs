use std::time::Duration;

use dioxus::prelude::*;

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notices {
    next_id: u64,
    pub entries: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            level,
            message: message.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|notice| notice.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

/// Show `message` and dismiss it after [`NOTICE_DURATION`].
pub fn push_notice(mut notices: Signal<Notices>, level: NoticeLevel, message: &str) {
    let id = notices.write().push(level, message);
    spawn(async move {
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(NOTICE_DURATION).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(NOTICE_DURATION).await;

        notices.write().dismiss(id);
    });
}

#[component]
pub fn NoticeProvider(children: Element) -> Element {
    let notices = use_signal(Notices::default);
    use_context_provider(|| notices);

    rsx! {
        {children}
    }
}

/// Renders the live notices, newest last. Clicking one dismisses it early.
#[component]
pub fn NoticeHost() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-host",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notice error",
                        NoticeLevel::Success => "notice success",
                        NoticeLevel::Info => "notice info",
                    },
                    onclick: move |_| notices.write().dismiss(notice.id),
                    "{notice.message}"
                }
            }
        }
    }
}
