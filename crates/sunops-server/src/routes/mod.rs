//! HTTP routes

mod configuracoes;
mod premissas;
mod pricing;
mod transacoes;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use sunops_common::VERSION;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let financeiro = Router::new()
        .route("/calcular-preco", post(pricing::calcular_preco))
        .route(
            "/premissas",
            get(premissas::list_premissas).post(premissas::create_premissa),
        )
        .route(
            "/premissas/:id",
            get(premissas::get_premissa)
                .put(premissas::update_premissa)
                .delete(premissas::delete_premissa),
        )
        .route(
            "/configuracoes",
            get(configuracoes::get_configuracoes).put(configuracoes::update_configuracoes),
        )
        .route(
            "/transacoes",
            get(transacoes::list_transacoes).post(transacoes::create_transacao),
        )
        .route("/transacoes/vencidas", get(transacoes::list_vencidas))
        .route("/transacoes/:id/marcar-pago", post(transacoes::marcar_pago));

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .nest("/financeiro", financeiro)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "sunops-server",
        "version": VERSION,
    }))
}
