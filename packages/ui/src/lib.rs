//! Shared Dioxus bindings for the MovieFlix frontends.

mod platform;
pub use platform::{make_client, make_session_store, PlatformStore};

mod notice;
pub use notice::{push_notice, use_notices, Notice, NoticeHost, NoticeLevel, NoticeProvider, Notices, NOTICE_DURATION};

mod session;
pub use session::{use_client, use_session, ClientHandle, SessionProvider, SessionState, SignOutButton};

mod favorites;
pub use favorites::FavoriteToggle;
