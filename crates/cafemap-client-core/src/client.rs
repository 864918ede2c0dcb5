use anyhow::{anyhow, Context};
use cafemap_shared::{
    const_config::{client::DEFAULT_SERVER_ADDRESS, path::PathSpec},
    token::AuthToken,
};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use reqwest::{Method, StatusCode};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::storage::{MemoryTokenStore, TokenStore};

pub mod session;

use session::{SessionObserver, SessionState};

pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[];

/// Handle to the session and its transport. Cheap to clone; clones share
/// state.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    pub(crate) inner: Arc<Mutex<ClientInner>>,
    pub(crate) token_store: Arc<dyn TokenStore>,
}

pub(crate) struct ClientInner {
    pub(crate) server_address: String,
    pub(crate) token: Option<AuthToken>,
    pub(crate) session: SessionState,
    pub(crate) observers: Vec<Arc<dyn SessionObserver>>,
}

impl Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("server_address", &self.server_address)
            .field("has_token", &self.token.is_some())
            .field("session", &self.session)
            .field("observer_count", &self.observers.len())
            .finish()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            DEFAULT_SERVER_ADDRESS.to_string(),
            Arc::new(MemoryTokenStore::default()),
        )
    }
}

impl ClientInner {
    fn new(server_address: String, token: Option<AuthToken>) -> Self {
        Self {
            server_address,
            token,
            session: SessionState::Unauthenticated,
            observers: Vec::new(),
        }
    }
}

impl Client {
    /// Any token left behind by a previous run is picked up from the store
    /// here but stays unvalidated until [`Client::validate_session`] runs.
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(token_store))]
    pub fn new(server_address: String, token_store: Arc<dyn TokenStore>) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        let token = token_store.load();
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(server_address, token))),
            token_store,
        }
    }

    /// Header value to attach to authenticated requests; `None` when no
    /// credential is held (callers must tolerate a 401 in response)
    pub fn auth_header_value(&self) -> Option<String> {
        self.lock_inner().token.as_ref().map(AuthToken::header_value)
    }

    pub(crate) fn lock_inner(&self) -> MutexGuard<'_, ClientInner> {
        self.inner.lock().expect("mutex poisoned")
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe"
    // versions would usually already be logged by the caller
    pub(crate) fn initiate_request<T, F, O>(&self, path_spec: PathSpec, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let is_get_method = path_spec.method == Method::GET;
        let mut request = self
            .api_client
            .request(path_spec.method, self.path_to_url(path_spec.path));
        if let Some(header_value) = self.auth_header_value() {
            request = request.header(reqwest::header::AUTHORIZATION, header_value);
        }
        request = if is_get_method {
            request.query(&args)
        } else {
            request.json(&args)
        };
        reqwest_cross::fetch(request, on_done)
    }

    #[tracing::instrument(ret)]
    pub(crate) fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", &self.lock_inner().server_address)
    }
}

/// Status-aware classification of a data response. 401 gets its own arm
/// because consumers must force the session out on it.
#[derive(Debug)]
pub(crate) enum FetchOutcome<T> {
    Success(T),
    Unauthorized,
    Failed(anyhow::Error),
}

pub(crate) async fn process_data_response<T>(
    response: reqwest::Result<reqwest::Response>,
) -> FetchOutcome<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = match extract_response(response) {
        Ok(extracted) => extracted,
        Err(e) => return FetchOutcome::Failed(e),
    };
    if status == StatusCode::UNAUTHORIZED {
        return FetchOutcome::Unauthorized;
    }
    if status != StatusCode::OK {
        return FetchOutcome::Failed(handle_error(response).await);
    }
    match response
        .json()
        .await
        .context("failed to parse result as json")
    {
        Ok(data) => FetchOutcome::Success(data),
        Err(e) => FetchOutcome::Failed(e),
    }
}

#[tracing::instrument(ret, err(Debug))]
pub(crate) async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    match status {
        StatusCode::OK => Ok(response
            .json()
            .await
            .context("failed to parse result as json")?),
        _ => Err(handle_error(response).await),
    }
}

#[tracing::instrument(ret)]
pub(crate) async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body");
    };
    if body.is_empty() {
        anyhow!("request failed with status code: {status} and no body")
    } else {
        anyhow!("{body}")
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
pub(crate) fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

/// Repeatable callback used to ask the UI shell to repaint
pub trait WakeFn: Fn() + Send + Sync + 'static {}
impl<T> WakeFn for T where T: Fn() + Send + Sync + 'static {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
