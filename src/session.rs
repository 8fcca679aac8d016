use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::Error;

/// Login flag plus its own in-flight/error pair.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Tracks the boolean login state across the two no-argument auth calls.
/// Failure leaves the flag where it was.
pub struct SessionStore {
    client: ApiClient,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.is_logged_in
    }

    pub async fn login(&self) -> Result<(), Error> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }
        match self.client.login().await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.is_logged_in = true;
                state.loading = false;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.loading = false;
                state.error = Some(err.surface("Failed to login"));
                Err(err)
            }
        }
    }

    pub async fn logout(&self) -> Result<(), Error> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }
        match self.client.logout().await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.is_logged_in = false;
                state.loading = false;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.loading = false;
                state.error = Some(err.surface("Failed to logout"));
                Err(err)
            }
        }
    }
}
