use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    error::Result,
    queries::product_queries,
    routes,
    store::{DynamoDbStore, ProductStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

/// Connects to the product store and assembles the router. Connection and
/// provisioning failures are fatal and propagate to `main`.
pub async fn build(config: &AppConfig) -> Result<Router> {
    let store = DynamoDbStore::connect(&config.store).await?;

    build_with_store(Arc::new(store)).await
}

/// Router assembly over any store implementation. Tests inject a
/// [`crate::store::MemoryStore`] here.
pub async fn build_with_store(store: Arc<dyn ProductStore>) -> Result<Router> {
    product_queries::ensure_table(store.as_ref()).await?;

    let state = AppState { store };

    let app = routes::create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
