//! Heart button for a catalog entry.

use api::{FavoritesCoordinator, Movie, Session};
use dioxus::prelude::*;

use crate::notice::{push_notice, use_notices, NoticeLevel};
use crate::session::{use_client, use_session};

/// Toggles `movie` in the signed-in user's favorites.
///
/// On success the session signal is updated and `on_changed` receives the new
/// session so the caller can refresh its list. On failure a notice is shown and
/// `is_favorite` stays as the caller passed it.
#[component]
pub fn FavoriteToggle(movie: Movie, is_favorite: bool, on_changed: EventHandler<Session>) -> Element {
    let mut state = use_session();
    let client = use_client();
    let notices = use_notices();
    let mut pending = use_signal(|| false);

    let class = if is_favorite {
        "favorite-toggle favorite-toggle--on"
    } else {
        "favorite-toggle"
    };
    let title = if is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    let onclick = move |_| {
        let client = client.clone();
        let movie = movie.clone();
        async move {
            let (Some(client), Some(session)) = (client, state().session) else {
                push_notice(notices, NoticeLevel::Error, "Not authenticated");
                return;
            };

            pending.set(true);
            let result = FavoritesCoordinator::new(&client)
                .toggle_favorite(&movie, &session)
                .await;
            pending.set(false);

            match result {
                Ok(updated) => {
                    state.write().session = Some(updated.clone());
                    on_changed.call(updated);
                }
                Err(e) => push_notice(notices, NoticeLevel::Error, &e.message),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            title: "{title}",
            disabled: pending(),
            onclick: onclick,
            if is_favorite {
                "♥"
            } else {
                "♡"
            }
        }
    }
}
