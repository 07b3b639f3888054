// src/lib.rs

use axum::routing::{get, post};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod account;
    pub mod dealer;
    pub mod opportunity;
}

pub mod services {
    pub mod amount_words;
    pub mod currency;
    pub mod entity_resolver;
    pub mod intake;
    pub mod query;
    pub mod stage;
}

pub mod models {
    pub mod opportunity;
}

pub mod handlers {
    pub mod opportunity;
}

pub mod error;

/// Build the application router; shared by `main` and the integration tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::opportunity::welcome))
        .route("/new_customer", post(handlers::opportunity::new_customer))
        .route("/get-customers", get(handlers::opportunity::get_customers))
        .route(
            "/single-customer",
            get(handlers::opportunity::single_customer),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
