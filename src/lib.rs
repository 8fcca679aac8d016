//! Client-side synchronization for the student dashboard REST API: typed
//! models, a thin HTTP client, and stores that keep the in-memory
//! collections consistent with the remote authoritative copy.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;
pub mod store;
pub mod validate;

pub use api::ApiClient;
pub use config::Config;
pub use error::Error;
pub use guard::{require_login, Authenticated};
pub use models::{Announcement, AnnouncementDraft, Quiz, QuizDraft, Resource};
pub use session::{SessionState, SessionStore};
pub use store::{CollectionState, CollectionStore, RefreshPolicy};
