use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use routes::{
    books::{create_book, delete_book, get_book, list_books},
    health::health_check,
};
use services::catalog::{Catalog, Store};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(store)),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/status", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route("/books/:book_id", get(get_book).delete(delete_book))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
