use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::Error;
use crate::models::Resource;

/// Whether a successful mutation splices the collection locally before the
/// follow-up refetch, or relies on the refetch alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    #[default]
    SpliceThenRefetch,
    RefetchOnly,
}

/// In-memory collection plus the per-operation in-flight flags. The flags are
/// independent: a fetch can be pending while an earlier delete settles.
#[derive(Debug, Clone)]
pub struct CollectionState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
    pub add_loading: bool,
    pub update_loading: bool,
    pub delete_loading: bool,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            add_loading: false,
            update_loading: false,
            delete_loading: false,
        }
    }
}

/// Keeps one entity collection consistent with the remote authoritative copy.
///
/// Each operation runs `Idle -> Pending -> Idle`: set its flag and clear the
/// last error, call the API, then either apply the result or record the
/// failure message. Successful mutations resync with a full fetch, so the
/// local splice is transient; the last fetch to resolve owns `items`. The
/// lock is never held across a remote call.
pub struct CollectionStore<R: Resource> {
    client: ApiClient,
    policy: RefreshPolicy,
    state: Mutex<CollectionState<R>>,
}

impl<R: Resource> CollectionStore<R> {
    pub fn new(client: ApiClient) -> Self {
        Self::with_policy(client, RefreshPolicy::default())
    }

    pub fn with_policy(client: ApiClient, policy: RefreshPolicy) -> Self {
        Self {
            client,
            policy,
            state: Mutex::new(CollectionState::default()),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> CollectionState<R> {
        self.state.lock().await.clone()
    }

    pub async fn items(&self) -> Vec<R> {
        self.state.lock().await.items.clone()
    }

    /// Replace `items` wholesale with the server's copy. The server's order
    /// is trusted as-is here; the entity ordering rule applies only after
    /// mutations.
    pub async fn fetch(&self) -> Result<(), Error> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }
        match self.client.list::<R>().await {
            Ok(items) => {
                let mut state = self.state.lock().await;
                state.items = items;
                state.loading = false;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.loading = false;
                state.error = Some(err.surface(&format!("Failed to fetch {}", R::PATH)));
                Err(err)
            }
        }
    }

    /// Create an entity, splice it into the collection, then resync.
    pub async fn add(&self, draft: R::Draft) -> Result<R, Error> {
        R::validate(&draft)?;
        {
            let mut state = self.state.lock().await;
            state.add_loading = true;
            state.error = None;
        }
        match self.client.create::<R>(&draft).await {
            Ok(created) => {
                {
                    let mut state = self.state.lock().await;
                    if self.policy == RefreshPolicy::SpliceThenRefetch {
                        R::place_created(&mut state.items, created.clone());
                    }
                    state.add_loading = false;
                }
                self.refetch().await;
                Ok(created)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.add_loading = false;
                state.error = Some(err.surface(&format!("Failed to add {}", R::SINGULAR)));
                Err(err)
            }
        }
    }

    /// Update the entity with `id`, replace it in place, then resync. An id
    /// missing from the local collection leaves `items` alone and lets the
    /// refetch reconcile.
    pub async fn update(&self, id: &str, draft: R::Draft) -> Result<R, Error> {
        R::validate(&draft)?;
        {
            let mut state = self.state.lock().await;
            state.update_loading = true;
            state.error = None;
        }
        match self.client.update::<R>(id, &draft).await {
            Ok(updated) => {
                {
                    let mut state = self.state.lock().await;
                    if self.policy == RefreshPolicy::SpliceThenRefetch {
                        if let Some(slot) = state
                            .items
                            .iter_mut()
                            .find(|item| item.id() == updated.id())
                        {
                            *slot = updated.clone();
                        }
                        R::reorder(&mut state.items);
                    }
                    state.update_loading = false;
                }
                self.refetch().await;
                Ok(updated)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.update_loading = false;
                state.error = Some(err.surface(&format!("Failed to update {}", R::SINGULAR)));
                Err(err)
            }
        }
    }

    /// Delete the entity with `id`, drop it locally, then resync.
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        {
            let mut state = self.state.lock().await;
            state.delete_loading = true;
            state.error = None;
        }
        match self.client.remove::<R>(id).await {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    if self.policy == RefreshPolicy::SpliceThenRefetch {
                        state.items.retain(|item| item.id() != id);
                    }
                    state.delete_loading = false;
                }
                self.refetch().await;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.delete_loading = false;
                state.error = Some(err.surface(&format!("Failed to delete {}", R::SINGULAR)));
                Err(err)
            }
        }
    }

    /// Post-mutation resync. The mutation already succeeded, so a failure
    /// here only lands in `state.error` via `fetch`.
    async fn refetch(&self) {
        if let Err(err) = self.fetch().await {
            tracing::debug!(resource = R::PATH, error = %err, "post-mutation refetch failed");
        }
    }
}
