//! Session lifecycle: the authenticated-or-not state of this client and the
//! operations that move it between states.

use std::sync::Arc;

use anyhow::Context;
use cafemap_shared::{
    const_config::path::{PATH_ACCOUNTS_LOGIN, PATH_ACCOUNTS_LOGOUT, PATH_ACCOUNTS_ME},
    log_err_as_warn,
    req_args::LoginReqArgs,
    token::AuthToken,
    uac::{LoginApiResponse, MeResponse, UserInfo},
};
use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use tracing::{info, warn};

use crate::client::{extract_response, process_json_body, Client, UiCallBack, DUMMY_ARGUMENT};

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// A persisted token exists and is being checked against the backend
    Validating,
    Authenticated(Arc<UserInfo>),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Point-in-time copy of the session handed to observers and the UI
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn user_info(&self) -> Option<Arc<UserInfo>> {
        match &self.state {
            SessionState::Authenticated(user) => Some(Arc::clone(user)),
            _ => None,
        }
    }
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Settled into a user-facing message, either by the fail-fast credential
    /// check (no request goes out) or by the backend's rejection message
    Rejected(String),
}

/// Called on every committed session transition. Registered via
/// [`Client::on_session_change`]; this is how a login reaches the data layer
/// without any global lookup.
pub trait SessionObserver: 'static + Send + Sync + Fn(&SessionSnapshot) {}
impl<T> SessionObserver for T where T: 'static + Send + Sync + Fn(&SessionSnapshot) {}

impl Client {
    #[tracing::instrument(skip(self, args, ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LoginOutcome>> {
        let (tx, rx) = oneshot::channel();
        if let Err(e) = args.validated() {
            // Fail fast, no network call
            let _ = tx.send(Ok(LoginOutcome::Rejected(e.to_string())));
            ui_notify();
            return rx;
        }
        let body = serde_json::json!({
            "email": args.email.trim(),
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_login(resp, client).await;
            let _ = tx.send(msg);
            ui_notify();
        };
        self.initiate_request(PATH_ACCOUNTS_LOGIN, &body, on_done);
        rx
    }

    /// Checks any persisted token against the backend. Safe to call with no
    /// token (resolves to `false` without a network call) and idempotent.
    /// Every failure settles into the unauthenticated state, never an error.
    #[tracing::instrument(skip(self, ui_notify))]
    pub fn validate_session<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        {
            let mut guard = self.lock_inner();
            if guard.token.is_none() {
                drop(guard);
                let _ = tx.send(false);
                ui_notify();
                return rx;
            }
            guard.session = SessionState::Validating;
        }
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let validated = process_session_validation(resp, client).await;
            let _ = tx.send(validated);
            ui_notify();
        };
        self.initiate_request(PATH_ACCOUNTS_ME, &DUMMY_ARGUMENT, on_done);
        rx
    }

    /// Logs out locally unconditionally; the backend is told best-effort and
    /// a failure there is only logged
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) {
        let (changed, token) = self.clear_session();
        self.token_store.clear();
        if changed {
            self.notify_observers();
        }
        // The captured token still authenticates the server-side logout
        let Some(token) = token else { return };
        let request = self
            .api_client
            .request(
                PATH_ACCOUNTS_LOGOUT.method,
                self.path_to_url(PATH_ACCOUNTS_LOGOUT.path),
            )
            .header(reqwest::header::AUTHORIZATION, token.header_value())
            .json(&serde_json::json!({}));
        reqwest_cross::fetch(request, |resp: reqwest::Result<reqwest::Response>| async {
            log_err_as_warn!(resp.and_then(|r| r.error_for_status()));
        });
    }

    /// Forced transition used when any authenticated call observes a 401.
    /// Returns whether a transition actually happened (observers are only
    /// notified on a real change, which is what lets repeated 401s converge).
    #[tracing::instrument(skip(self))]
    pub fn force_logout(&self) -> bool {
        let (changed, _token) = self.clear_session();
        if changed {
            self.token_store.clear();
            self.notify_observers();
        }
        changed
    }

    pub fn on_session_change(&self, observer: impl SessionObserver) {
        self.lock_inner().observers.push(Arc::new(observer));
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.lock_inner().session.clone(),
        }
    }

    pub fn user_info(&self) -> Option<Arc<UserInfo>> {
        match &self.lock_inner().session {
            SessionState::Authenticated(user) => Some(Arc::clone(user)),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_inner().session.is_authenticated()
    }

    pub fn has_persisted_token(&self) -> bool {
        self.lock_inner().token.is_some()
    }

    pub(crate) fn complete_login(&self, token: AuthToken, user: UserInfo) {
        self.token_store.save(&token);
        {
            let mut guard = self.lock_inner();
            guard.token = Some(token);
            guard.session = SessionState::Authenticated(Arc::new(user));
        }
        // The state is committed before anyone reacts to it, so a reload
        // triggered by this transition reads the post-login session
        self.notify_observers();
    }

    pub(crate) fn complete_validation_success(&self, user: UserInfo) {
        {
            let mut guard = self.lock_inner();
            guard.session = SessionState::Authenticated(Arc::new(user));
        }
        self.notify_observers();
    }

    pub(crate) fn complete_validation_failure(&self) {
        self.token_store.clear();
        {
            let mut guard = self.lock_inner();
            guard.token = None;
            guard.session = SessionState::Unauthenticated;
        }
        self.notify_observers();
    }

    /// Returns whether anything was cleared and the token that was held
    fn clear_session(&self) -> (bool, Option<AuthToken>) {
        let mut guard = self.lock_inner();
        let changed =
            !matches!(guard.session, SessionState::Unauthenticated) || guard.token.is_some();
        guard.session = SessionState::Unauthenticated;
        let token = guard.token.take();
        (changed, token)
    }

    /// Observers run with the lock released so they are free to issue new
    /// requests
    fn notify_observers(&self) {
        let (snapshot, observers) = {
            let guard = self.lock_inner();
            (
                SessionSnapshot {
                    state: guard.session.clone(),
                },
                guard.observers.clone(),
            )
        };
        for observer in observers {
            (*observer)(&snapshot);
        }
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<LoginOutcome> {
    let (response, _status) = extract_response(response)?;
    // The backend answers rejected logins with the same body shape, so the
    // body is decoded regardless of status code
    let login_response: LoginApiResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    match login_response {
        LoginApiResponse {
            success: true,
            token: Some(token),
            user: Some(user),
            ..
        } => {
            info!("login succeeded for {}", user.username);
            client.complete_login(token, user);
            Ok(LoginOutcome::Success)
        }
        LoginApiResponse { message, .. } => Ok(LoginOutcome::Rejected(
            message.unwrap_or_else(|| "로그인에 실패했습니다.".to_string()),
        )),
    }
}

async fn process_session_validation(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> bool {
    match process_json_body::<MeResponse>(response).await {
        Ok(me) => {
            client.complete_validation_success(me.user);
            true
        }
        Err(e) => {
            warn!(?e, "session validation failed, discarding persisted token");
            client.complete_validation_failure();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::storage::{MemoryTokenStore, TokenStore};

    fn test_user() -> UserInfo {
        UserInfo {
            username: "tester".try_into().unwrap(),
            role: "analyst".try_into().unwrap(),
        }
    }

    fn client_with_store() -> (Client, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::default());
        let client = Client::new("http://127.0.0.1:9".to_string(), store.clone());
        (client, store)
    }

    #[test]
    fn login_with_empty_credentials_resolves_without_a_network_call() {
        let (client, _store) = client_with_store();
        let args = LoginReqArgs::new("user@example.com", String::new().into());

        // No async runtime exists here, so reaching the transport would panic;
        // the receiver being ready already proves the request never went out
        let mut rx = client.login(args, || {});

        let outcome = rx
            .try_recv()
            .expect("channel closed")
            .expect("should already be resolved")
            .expect("validation failures are not channel errors");
        assert_eq!(
            outcome,
            LoginOutcome::Rejected("이메일과 비밀번호를 입력해주세요.".to_string())
        );
        assert!(!client.is_authenticated());
    }

    #[test]
    fn validate_session_without_token_is_a_no_op() {
        let (client, _store) = client_with_store();

        let mut rx = client.validate_session(|| {});

        let validated = rx
            .try_recv()
            .expect("channel closed")
            .expect("should already be resolved");
        assert!(!validated);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn completed_login_persists_the_token_and_notifies() {
        let (client, store) = client_with_store();
        let notified = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notified);
        client.on_session_change(move |snapshot| {
            assert!(snapshot.is_authenticated(), "observer must see the post-login state");
            seen.fetch_add(1, Ordering::SeqCst);
        });

        client.complete_login("tok-1".into(), test_user());

        assert!(client.is_authenticated());
        assert_eq!(store.load(), Some("tok-1".into()));
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(client.user_info().unwrap().username.as_ref(), "tester");
    }

    #[test]
    fn token_survives_a_restart_and_user_info_does_not() {
        let (client, store) = client_with_store();
        client.complete_login("tok-1".into(), test_user());
        drop(client);

        let restarted = Client::new("http://127.0.0.1:9".to_string(), store);

        assert!(restarted.has_persisted_token());
        assert!(!restarted.is_authenticated());
        assert!(restarted.user_info().is_none());

        // What validate_session applies on a successful round trip
        restarted.complete_validation_success(test_user());
        assert!(restarted.is_authenticated());
    }

    #[test]
    fn forced_logout_clears_the_persisted_token() {
        let (client, store) = client_with_store();
        client.complete_login("tok-1".into(), test_user());

        assert!(client.force_logout());

        assert!(!client.is_authenticated());
        assert!(!client.has_persisted_token());
        assert_eq!(store.load(), None);
        assert!(client.auth_header_value().is_none());
    }

    #[test]
    fn forced_logout_only_notifies_on_a_real_transition() {
        let (client, _store) = client_with_store();
        let notified = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notified);
        client.on_session_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        client.complete_login("tok-1".into(), test_user());

        assert!(client.force_logout());
        assert!(!client.force_logout());
        assert!(!client.force_logout());

        // login + one logout; the repeats were no-ops
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn validation_failure_discards_the_token() {
        let store = Arc::new(MemoryTokenStore::default());
        store.save(&"stale-token".into());
        let client = Client::new("http://127.0.0.1:9".to_string(), store.clone());
        assert!(client.has_persisted_token());

        client.complete_validation_failure();

        assert!(!client.has_persisted_token());
        assert_eq!(store.load(), None);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn auth_header_uses_the_backend_scheme() {
        let (client, _store) = client_with_store();
        client.complete_login("tok-9".into(), test_user());

        assert_eq!(client.auth_header_value().unwrap(), "Token tok-9");
    }
}
