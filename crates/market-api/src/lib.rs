pub mod error;
pub mod extract;
pub mod ownership;
pub mod products;
pub mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{Router, routing::get};
use tracing::error;

use market_db::ListingStore;

use crate::error::ApiError;
use crate::ownership::{OwnershipCheck, PlaintextPassword};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn ListingStore>,
    pub ownership: Box<dyn OwnershipCheck>,
}

impl AppStateInner {
    /// State using the plaintext numeric password check.
    pub fn new(store: Arc<dyn ListingStore>) -> AppState {
        Self::with_ownership(store, Box::new(PlaintextPassword))
    }

    pub fn with_ownership(store: Arc<dyn ListingStore>, ownership: Box<dyn OwnershipCheck>) -> AppState {
        Arc::new(Self { store, ownership })
    }
}

/// Product routes, relative to whatever prefix the caller nests them under.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{product_id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(state)
}

/// Run a blocking store call off the async runtime.
pub(crate) async fn with_store<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn ListingStore) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?;
    Ok(result?)
}
