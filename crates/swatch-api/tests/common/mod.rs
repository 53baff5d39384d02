//! Common test utilities and harness for Swatch HTTP tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use async_trait::async_trait;
use swatch_api::Server;
use swatch_core::{Item, ItemId, Person, PersonId};
use swatch_session::{CookieSigner, MemorySessionStore, SessionLayer};
use swatch_storage::{ListStore, MemoryStore, RemovedPerson};
use tower::ServiceExt;

/// Test harness acting as one browser.
///
/// Keeps the session cookie between requests like a browser would.
pub struct TestBrowser {
    /// The router under test
    pub router: Router,
    /// Direct handle on the store behind the router
    pub store: Arc<MemoryStore>,
    cookie: Option<String>,
}

impl TestBrowser {
    /// A browser talking to a fresh server with an empty store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::serving(store.clone(), store)
    }

    /// A browser whose server reads and writes through `served`.
    ///
    /// `backing` is the memory store `served` ultimately keeps its documents
    /// in; the inspection helpers read it directly.
    pub fn serving(served: Arc<dyn ListStore>, backing: Arc<MemoryStore>) -> Self {
        let sessions = SessionLayer::new(
            Arc::new(MemorySessionStore::new()),
            CookieSigner::from_secret("integration"),
            "swatch.sid",
        );
        let server = Server::new("127.0.0.1:0".parse().unwrap(), served, sessions);
        Self {
            router: server.router(),
            store: backing,
            cookie: None,
        }
    }

    /// A second browser (separate session) against the same server.
    pub fn other_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            store: self.store.clone(),
            cookie: None,
        }
    }

    async fn send(&mut self, mut req: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            req.headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }
        let resp = self.router.clone().oneshot(req).await.unwrap();
        if let Some(set) = resp.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        resp
    }

    /// Issue a GET.
    pub async fn get(&mut self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    /// Issue a form POST; `fields` are URL-encoded by the caller.
    pub async fn post_form(&mut self, uri: &str, fields: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(fields.to_string()))
            .unwrap();
        self.send(req).await
    }

    /// All persons in store order.
    pub async fn persons(&self) -> Vec<Person> {
        self.store.list_persons(usize::MAX).await.unwrap()
    }

    /// All items owned by `owner`.
    pub async fn items(&self, owner: PersonId) -> Vec<Item> {
        self.store.list_items(owner, usize::MAX).await.unwrap()
    }

    /// Create a person directly in the store.
    pub async fn seed_person(&self, name: &str, colours: &[&str]) -> Person {
        let person = self.store.insert_person(name).await.unwrap();
        for colour in colours {
            self.store.insert_item(person.id, colour).await.unwrap();
        }
        person
    }
}

impl Default for TestBrowser {
    fn default() -> Self {
        Self::new()
    }
}

/// A store that can be switched into failing its list and copy operations.
pub struct FlakyStore {
    inner: Arc<MemoryStore>,
    failing: AtomicBool,
}

impl FlakyStore {
    /// Wrap `inner`; starts healthy.
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    /// Make `list_items` and `create_person_with_items` fail or succeed.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> swatch_storage::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            return Err(swatch_storage::Error::Document(source));
        }
        Ok(())
    }
}

#[async_trait]
impl ListStore for FlakyStore {
    fn backend_name(&self) -> &'static str {
        "flaky"
    }

    async fn list_persons(&self, limit: usize) -> swatch_storage::Result<Vec<Person>> {
        self.inner.list_persons(limit).await
    }

    async fn get_person(&self, id: PersonId) -> swatch_storage::Result<Option<Person>> {
        self.inner.get_person(id).await
    }

    async fn insert_person(&self, name: &str) -> swatch_storage::Result<Person> {
        self.inner.insert_person(name).await
    }

    async fn remove_person(&self, id: PersonId) -> swatch_storage::Result<RemovedPerson> {
        self.inner.remove_person(id).await
    }

    async fn list_items(&self, owner: PersonId, limit: usize) -> swatch_storage::Result<Vec<Item>> {
        self.check()?;
        self.inner.list_items(owner, limit).await
    }

    async fn get_item(&self, id: ItemId) -> swatch_storage::Result<Option<Item>> {
        self.inner.get_item(id).await
    }

    async fn insert_item(&self, owner: PersonId, value: &str) -> swatch_storage::Result<Item> {
        self.inner.insert_item(owner, value).await
    }

    async fn update_item_value(&self, id: ItemId, value: &str) -> swatch_storage::Result<bool> {
        self.inner.update_item_value(id, value).await
    }

    async fn remove_item(&self, id: ItemId) -> swatch_storage::Result<bool> {
        self.inner.remove_item(id).await
    }

    async fn create_person_with_items(
        &self,
        name: &str,
        values: &[String],
    ) -> swatch_storage::Result<(Person, Vec<Item>)> {
        self.check()?;
        self.inner.create_person_with_items(name, values).await
    }
}

/// Assert `resp` redirects and return the target.
pub fn redirect_target(resp: &Response) -> String {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "expected a redirect");
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Read a response body as text.
pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Location of a person's list.
pub fn list_path(id: PersonId) -> String {
    format!("/personsColours?id={id}")
}
