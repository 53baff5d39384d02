//! Tower session middleware.
//!
//! `SessionLayer` and `SessionService` wrap any inner service with session
//! loading and saving. Handlers reach the context through the [`Session`]
//! extractor; the context is written back only if a handler changed it.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::response::IntoResponse;
use http::request::Parts;
use http::{HeaderValue, Request, StatusCode};
use swatch_core::PersonId;
use tower::{Layer, Service};

use crate::cookie::{find_cookie, set_cookie_value};
use crate::{CookieSigner, SessionContext, SessionId, SessionStore};

/// Tower `Layer` that attaches a [`Session`] to every request.
#[derive(Clone)]
pub struct SessionLayer {
    store: Arc<dyn SessionStore>,
    signer: Arc<CookieSigner>,
    cookie_name: Arc<str>,
}

impl SessionLayer {
    /// Create a new session layer.
    pub fn new(store: Arc<dyn SessionStore>, signer: CookieSigner, cookie_name: &str) -> Self {
        Self {
            store,
            signer: Arc::new(signer),
            cookie_name: Arc::from(cookie_name),
        }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            store: self.store.clone(),
            signer: self.signer.clone(),
            cookie_name: self.cookie_name.clone(),
        }
    }
}

/// Tower `Service` that loads the session before, and saves it after, the
/// inner service.
#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    store: Arc<dyn SessionStore>,
    signer: Arc<CookieSigner>,
    cookie_name: Arc<str>,
}

impl<S> Service<Request<Body>> for SessionService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let store = self.store.clone();
        let signer = self.signer.clone();
        let cookie_name = self.cookie_name.clone();

        Box::pin(async move {
            let presented =
                find_cookie(req.headers(), &cookie_name).and_then(|value| signer.verify(value));

            let (id, context, is_new) = match presented {
                Some(id) => match store.load(id).await {
                    Ok(context) => (id, context.unwrap_or_default(), false),
                    Err(e) => {
                        log::error!("Failed to load session: {e}");
                        return Ok(internal_error_response());
                    }
                },
                None => (SessionId::generate(), SessionContext::default(), true),
            };

            let session = Session::new(context);
            req.extensions_mut().insert(session.clone());

            let mut response = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {})
                .into_response();

            let Some(context) = session.take_changes() else {
                return Ok(response);
            };

            let saved = if context.is_empty() {
                store.remove(id).await
            } else {
                store.save(id, &context).await
            };
            if let Err(e) = saved {
                log::error!("Failed to save session: {e}");
                return Ok(internal_error_response());
            }

            if is_new && !context.is_empty() {
                let cookie = set_cookie_value(&cookie_name, &signer.sign(id));
                match HeaderValue::from_str(&cookie) {
                    Ok(value) => {
                        response
                            .headers_mut()
                            .append(http::header::SET_COOKIE, value);
                    }
                    Err(e) => log::warn!("Could not encode session cookie: {e}"),
                }
            }

            Ok(response)
        })
    }
}

fn internal_error_response() -> axum::response::Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

// ============================================================================
// Session handle
// ============================================================================

#[derive(Debug, Default)]
struct SessionState {
    context: SessionContext,
    changed: bool,
}

/// Handle to the current request's session context.
///
/// Cheap to clone; clones share state. Concurrent requests in the same
/// browser session each get their own copy, and the last one to finish wins.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Wrap an already-loaded context.
    pub fn new(context: SessionContext) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                context,
                changed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Person whose list was viewed most recently in this session.
    pub fn current_person_id(&self) -> Option<PersonId> {
        self.lock().context.current_person_id
    }

    /// Record the person whose list is being viewed.
    pub fn set_current_person_id(&self, id: PersonId) {
        let mut state = self.lock();
        if state.context.current_person_id != Some(id) {
            state.context.current_person_id = Some(id);
            state.changed = true;
        }
    }

    /// Remember the name for the list a copy will create.
    pub fn set_pending_new_list_name(&self, name: impl Into<String>) {
        let mut state = self.lock();
        state.context.pending_new_list_name = Some(name.into());
        state.changed = true;
    }

    /// Read the pending list name, clearing it.
    pub fn take_pending_new_list_name(&self) -> Option<String> {
        let mut state = self.lock();
        let name = state.context.pending_new_list_name.take();
        if name.is_some() {
            state.changed = true;
        }
        name
    }

    /// A copy of the current context.
    pub fn snapshot(&self) -> SessionContext {
        self.lock().context.clone()
    }

    /// The context if it changed since the last call.
    fn take_changes(&self) -> Option<SessionContext> {
        let mut state = self.lock();
        if !state.changed {
            return None;
        }
        state.changed = false;
        Some(state.context.clone())
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Session>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "session layer is not installed",
        ))
    }
}
