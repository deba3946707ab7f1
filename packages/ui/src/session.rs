//! Session context and hooks for the UI.

use std::rc::Rc;

use api::{ApiClient, Session, SessionStore};
use dioxus::prelude::*;

use crate::notice::{push_notice, use_notices, NoticeLevel};
use crate::platform::{make_client, PlatformStore};

/// Shared handle to the client. `None` when the client could not be built.
pub type ClientHandle = Option<Rc<ApiClient<PlatformStore>>>;

/// Signed-in state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

/// Returns a signal that updates on sign-in, sign-out, and favorite changes.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

pub fn use_client() -> ClientHandle {
    use_context::<ClientHandle>()
}

/// Provider component that owns the client and the session signal.
/// Wrap your app with this component (inside a `NoticeProvider`).
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut state = use_signal(SessionState::default);
    let client: ClientHandle = use_hook(|| match make_client() {
        Ok(client) => Some(Rc::new(client)),
        Err(e) => {
            tracing::error!("Failed to create API client: {}", e);
            None
        }
    });

    // Restore the stored session on mount
    let loader = client.clone();
    let _ = use_resource(move || {
        let client = loader.clone();
        async move {
            let session = match &client {
                Some(client) => client.store().load().await,
                None => None,
            };
            state.set(SessionState {
                session,
                loading: false,
            });
        }
    });

    use_context_provider(|| client);
    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

/// Button that forgets the stored session and token.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut state = use_session();
    let client = use_client();
    let notices = use_notices();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            let Some(client) = client else {
                return;
            };
            match api::account::sign_out(client.store()).await {
                Ok(()) => state.set(SessionState {
                    session: None,
                    loading: false,
                }),
                Err(e) => push_notice(notices, NoticeLevel::Error, &e.message),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: state().session.is_none(),
            onclick: onclick,
            "{label}"
        }
    }
}
