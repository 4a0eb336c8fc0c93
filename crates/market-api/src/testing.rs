use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use market_db::models::{ListingUpdate, NewListing};
use market_db::{Database, ListingStore};
use market_types::{Listing, ObjectId, Password};

use crate::{AppStateInner, router};

/// In-memory store that counts every call made against it.
pub(crate) struct CountingStore {
    inner: Database,
    calls: AtomicUsize,
}

impl CountingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: Database::open_in_memory().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ListingStore for CountingStore {
    fn create(&self, listing: NewListing) -> anyhow::Result<Listing> {
        self.hit();
        self.inner.create(listing)
    }

    fn find(&self) -> anyhow::Result<Vec<Listing>> {
        self.hit();
        self.inner.find()
    }

    fn find_one(&self, id: &ObjectId) -> anyhow::Result<Option<Listing>> {
        self.hit();
        self.inner.find_one(id)
    }

    fn update_one(&self, id: &ObjectId, update: ListingUpdate) -> anyhow::Result<u64> {
        self.hit();
        self.inner.update_one(id, update)
    }

    fn delete_one(&self, id: &ObjectId) -> anyhow::Result<u64> {
        self.hit();
        self.inner.delete_one(id)
    }
}

/// Store whose every call fails, standing in for a lost database.
pub(crate) struct BrokenStore;

impl ListingStore for BrokenStore {
    fn create(&self, _: NewListing) -> anyhow::Result<Listing> {
        anyhow::bail!("database is locked")
    }

    fn find(&self) -> anyhow::Result<Vec<Listing>> {
        anyhow::bail!("database is locked")
    }

    fn find_one(&self, _: &ObjectId) -> anyhow::Result<Option<Listing>> {
        anyhow::bail!("database is locked")
    }

    fn update_one(&self, _: &ObjectId, _: ListingUpdate) -> anyhow::Result<u64> {
        anyhow::bail!("database is locked")
    }

    fn delete_one(&self, _: &ObjectId) -> anyhow::Result<u64> {
        anyhow::bail!("database is locked")
    }
}

/// Store where every listing disappears right after it is looked up, as if
/// another client deleted it between lookup and write.
pub(crate) struct VanishingStore {
    inner: Database,
}

impl VanishingStore {
    /// Insert the listing every test works on (password 1234).
    pub(crate) fn seed(&self) -> ObjectId {
        self.inner
            .create(NewListing {
                title: "Phone".into(),
                content: "used".into(),
                author: "Alice".into(),
                password: Password::new(1234),
            })
            .unwrap()
            .id
    }
}

impl ListingStore for VanishingStore {
    fn create(&self, listing: NewListing) -> anyhow::Result<Listing> {
        self.inner.create(listing)
    }

    fn find(&self) -> anyhow::Result<Vec<Listing>> {
        self.inner.find()
    }

    fn find_one(&self, id: &ObjectId) -> anyhow::Result<Option<Listing>> {
        let found = self.inner.find_one(id)?;
        self.inner.delete_one(id)?;
        Ok(found)
    }

    fn update_one(&self, id: &ObjectId, update: ListingUpdate) -> anyhow::Result<u64> {
        self.inner.update_one(id, update)
    }

    fn delete_one(&self, id: &ObjectId) -> anyhow::Result<u64> {
        self.inner.delete_one(id)
    }
}

pub(crate) fn vanishing_app() -> (Router, Arc<VanishingStore>) {
    let store = Arc::new(VanishingStore {
        inner: Database::open_in_memory().unwrap(),
    });
    let app = router(AppStateInner::new(store.clone()));
    (app, store)
}

pub(crate) fn counting_app() -> (Router, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::new());
    let app = router(AppStateInner::new(store.clone()));
    (app, store)
}

pub(crate) fn broken_app() -> Router {
    router(AppStateInner::new(Arc::new(BrokenStore)))
}

pub(crate) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
