use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Response;
use serde::Deserialize;

use crate::config::Config;
use crate::error::Error;
use crate::models::{Envelope, Resource};

// Bytes that may not appear raw in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?');

#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// HTTP client for the dashboard REST API. The session cookie set by
/// `auth/login` is carried out-of-band by the cookie store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base: config.api_url.clone(),
        })
    }

    /// Fetch the full collection, unwrapping the `{success, data}` envelope.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, Error> {
        let resp = self.http.get(self.collection_url::<R>()).send().await?;
        let envelope: Envelope<R> = ok(resp).await?.json().await?;
        Ok(envelope.data)
    }

    /// Create an entity; returns the server's canonical representation,
    /// identity included.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, Error> {
        let resp = self
            .http
            .post(self.collection_url::<R>())
            .json(draft)
            .send()
            .await?;
        Ok(ok(resp).await?.json().await?)
    }

    pub async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R, Error> {
        let resp = self
            .http
            .put(self.item_url::<R>(id))
            .json(draft)
            .send()
            .await?;
        Ok(ok(resp).await?.json().await?)
    }

    pub async fn remove<R: Resource>(&self, id: &str) -> Result<(), Error> {
        let resp = self.http.delete(self.item_url::<R>(id)).send().await?;
        ok(resp).await?;
        Ok(())
    }

    /// No-argument login; the concrete credential exchange lives behind the
    /// API boundary.
    pub async fn login(&self) -> Result<(), Error> {
        let resp = self
            .http
            .post(format!("{}/auth/login", self.base))
            .send()
            .await?;
        ok(resp).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), Error> {
        let resp = self
            .http
            .post(format!("{}/auth/logout", self.base))
            .send()
            .await?;
        ok(resp).await?;
        Ok(())
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.base, R::PATH)
    }

    fn item_url<R: Resource>(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base, R::PATH, utf8_percent_encode(id, SEGMENT))
    }
}

/// Pass 2xx responses through; turn anything else into `Error::Server`,
/// keeping the structured message when the body carries one.
async fn ok(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ServerMessage>()
        .await
        .ok()
        .and_then(|body| body.message);
    Err(Error::Server { status, message })
}
