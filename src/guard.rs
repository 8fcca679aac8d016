use std::future::Future;

use crate::error::Error;
use crate::session::SessionStore;

/// Anything that can answer whether the current session is authenticated.
/// Keeps guarding decoupled from the session store's internals.
pub trait Authenticated {
    fn is_logged_in(&self) -> impl Future<Output = bool> + Send;
}

impl Authenticated for SessionStore {
    fn is_logged_in(&self) -> impl Future<Output = bool> + Send {
        SessionStore::is_logged_in(self)
    }
}

/// Run `action` only when the session is authenticated; otherwise reject
/// before the action is awaited.
pub async fn require_login<A, F, T>(auth: &A, action: F) -> Result<T, Error>
where
    A: Authenticated,
    F: Future<Output = Result<T, Error>>,
{
    if !auth.is_logged_in().await {
        return Err(Error::Unauthorized);
    }
    action.await
}
