use std::{
    ops::{Deref, DerefMut},
    sync::{Arc, OnceLock},
};

use futures::FutureExt as _;
use secrecy::ExposeSecret as _;

use crate::{
    Config, Error, Result,
    types::{self, Envelope, GenerationConfig, Response, SafetySetting},
};

/// A single call that has been prepared but not sent yet
///
/// Awaiting a `Route` performs the call and always yields an [Envelope]; use [Route::send] to
/// see why a call failed.
pub struct Route<T> {
    client: Client,
    kind: T,
}

impl<T> Route<T> {
    fn new(client: &Client, kind: T) -> Self {
        Self {
            client: client.clone(),
            kind,
        }
    }
}

impl Deref for Route<GenerateContent> {
    type Target = GenerateContent;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl DerefMut for Route<GenerateContent> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.kind
    }
}

impl Route<GenerateContent> {
    /// Performs the call, keeping transport and decoding failures apart
    ///
    /// Any HTTP status is returned as-is inside the envelope. A blank body decodes to `None`.
    pub async fn send(self) -> Result<Envelope<Response>> {
        let http = self.client.inner.reqwest.clone();
        self.send_on(http).await
    }

    #[tracing::instrument(
        name = "generate_content",
        skip_all,
        fields(model = %self.client.inner.config.model(), prompt_len = self.kind.prompt.len())
    )]
    async fn send_on(self, http: reqwest::Client) -> Result<Envelope<Response>> {
        let config = &self.client.inner.config;
        let body = self.kind.body(config);

        tracing::debug!(
            safety_settings = body.safety_settings.as_ref().map(Vec::len),
            has_generation_config = body.generation_config.is_some(),
            "sending request"
        );

        let response = http
            .post(format!("{}:generateContent", config.base_url()))
            .query(&[("key", config.key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(without_url)?;

        let status = i32::from(response.status().as_u16());
        let raw_json = response.text().await.map_err(without_url)?;
        tracing::debug!(status, bytes = raw_json.len(), "received response");

        let body = if raw_json.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Response>(&raw_json)?)
        };

        Ok(Envelope::new(status, body))
    }

    /// Runs the call to completion on the calling thread
    ///
    /// Blocking calls go through their own HTTP connection pool and a current-thread runtime
    /// owned by the [Client], so they can be freely mixed with awaited calls on the same client.
    /// That pool does not use the reqwest client passed to [Client::with_http_client].
    ///
    /// Called from inside an async runtime this does not block; it returns the
    /// [Envelope::TRANSPORT_FAILURE] envelope instead.
    pub fn blocking(self) -> Envelope<Response> {
        if tokio::runtime::Handle::try_current().is_ok() {
            tracing::warn!("blocking call attempted from inside an async runtime");
            return Envelope::failed();
        }

        let client = self.client.clone();
        let Some(blocking) = client.inner.blocking.get_or_init(BlockingRuntime::start) else {
            return Envelope::failed();
        };
        let Some(runtime) = &blocking.runtime else {
            return Envelope::failed();
        };

        runtime.block_on(collapse(self.send_on(blocking.reqwest.clone())))
    }
}

impl IntoFuture for Route<GenerateContent> {
    type Output = Envelope<Response>;
    type IntoFuture = futures::future::BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        collapse(self.send()).boxed()
    }
}

async fn collapse(call: impl Future<Output = Result<Envelope<Response>>>) -> Envelope<Response> {
    match call.await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(error = %err, "generate_content failed");
            Envelope::failed()
        }
    }
}

/// Runtime and connection pool reserved for [Route::blocking]
///
/// Connections opened here are driven by this runtime only, and it is shut down in the
/// background on drop, so dropping the last [Client] inside async code is fine.
struct BlockingRuntime {
    runtime: Option<tokio::runtime::Runtime>,
    reqwest: reqwest::Client,
}

impl BlockingRuntime {
    fn start() -> Option<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .inspect_err(|err| tracing::warn!(error = %err, "failed to start runtime"))
            .ok()?;
        Some(Self {
            runtime: Some(runtime),
            reqwest: reqwest::Client::new(),
        })
    }
}

impl Drop for BlockingRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

// reqwest includes the request URL in its errors, and ours carries the key.
fn without_url(err: reqwest::Error) -> Error {
    Error::Http(err.without_url())
}

/// Per-call settings for `generateContent`
///
/// Overrides replace the [Config] defaults wholesale; nothing is merged per category.
pub struct GenerateContent {
    prompt: Box<str>,
    safety_settings: Option<Vec<SafetySetting>>,
    generation_config: Option<GenerationConfig>,
}

impl GenerateContent {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.into(),
            safety_settings: None,
            generation_config: None,
        }
    }

    /// Replaces the configured safety settings for this call. An empty list sends `[]`.
    pub fn safety_settings(&mut self, safety_settings: Vec<SafetySetting>) -> &mut Self {
        self.safety_settings = Some(safety_settings);
        self
    }

    pub fn generation_config(&mut self, config: GenerationConfig) -> &mut Self {
        self.generation_config = Some(config);
        self
    }

    pub(crate) fn body(&self, config: &Config) -> types::GenerateContent {
        types::GenerateContent {
            safety_settings: self
                .safety_settings
                .clone()
                .or_else(|| config.safety_settings().map(<[_]>::to_vec)),
            generation_config: self
                .generation_config
                .clone()
                .or_else(|| config.generation_config().cloned()),
            ..types::GenerateContent::prompt(&self.prompt)
        }
    }
}

/// Handle to the `generateContent` endpoint
///
/// Cloning is cheap; clones share the [Config] and the underlying HTTP clients.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Uses a preconfigured reqwest client, e.g. one with a timeout or proxy
    pub fn with_http_client(config: Config, reqwest: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                reqwest,
                config,
                blocking: OnceLock::new(),
            }),
        }
    }

    pub fn from_env() -> Result<Self> {
        Config::from_env().map(Self::new)
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn generate_content(&self, prompt: &str) -> Route<GenerateContent> {
        Route::new(self, GenerateContent::new(prompt))
    }
}

struct ClientInner {
    reqwest: reqwest::Client,
    config: Config,
    blocking: OnceLock<Option<BlockingRuntime>>,
}
