//! `api` crate — HTTP REST layer over the database function gateway.
//!
//! Routes:
//!   GET    /api/v1/companies             list (query: busqueda, limit, offset)
//!   POST   /api/v1/companies             create
//!   GET    /api/v1/companies/{id}        get
//!   PUT    /api/v1/companies/{id}        edit
//!   DELETE /api/v1/companies/{id}        delete
//!   (same five for /api/v1/permissions and /api/v1/menus)
//!   GET    /api/v1/menus/options         plain menu-option list
//!   GET    /api/v1/menus/tree/{user_id}  navigation tree for one user
//!
//! Handlers only translate gateway outcomes into status codes; every piece
//! of validation and business logic lives in the stored functions.

pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use db::FunctionInvoker;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::AppState;

use handlers::{companies, menus, permissions};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/companies",
            get(companies::list).post(companies::create),
        )
        .route(
            "/api/v1/companies/:id",
            get(companies::get)
                .put(companies::edit)
                .delete(companies::delete),
        )
        .route(
            "/api/v1/permissions",
            get(permissions::list).post(permissions::create),
        )
        .route(
            "/api/v1/permissions/:id",
            get(permissions::get)
                .put(permissions::edit)
                .delete(permissions::delete),
        )
        .route("/api/v1/menus", get(menus::list).post(menus::create))
        .route("/api/v1/menus/options", get(menus::options))
        .route("/api/v1/menus/tree/:user_id", get(menus::tree))
        .route(
            "/api/v1/menus/:id",
            get(menus::get).put(menus::edit).delete(menus::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and run the HTTP server until it is shut down.
pub async fn serve(bind: &str, invoker: Arc<dyn FunctionInvoker>) -> std::io::Result<()> {
    let app = router(AppState { invoker });
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("API listening on {bind}");
    axum::serve(listener, app).await
}
