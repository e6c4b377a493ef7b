pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

pub fn build_app(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/api/auth/registro", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route(
            "/api/auth/me",
            get(handlers::auth::get_me).delete(handlers::auth::delete_me),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let imovel_routes = Router::new()
        .route(
            "/api/imoveis",
            get(handlers::imoveis::list_imoveis).post(handlers::imoveis::create_imovel),
        )
        .route(
            "/api/imoveis/{imovel_id}",
            get(handlers::imoveis::get_imovel)
                .put(handlers::imoveis::update_imovel)
                .delete(handlers::imoveis::delete_imovel),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        // Adicionada depois do route_layer: fica pública
        .route(
            "/api/imoveis/buscar-cep/{cep}",
            get(handlers::imoveis::buscar_cep),
        );

    let unidade_routes = Router::new()
        .route("/api/unidades", post(handlers::unidades::create_unidade))
        .route(
            "/api/unidades/{unidade_id}",
            get(handlers::unidades::get_unidade)
                .put(handlers::unidades::update_unidade)
                .delete(handlers::unidades::delete_unidade),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let locatario_routes = Router::new()
        .route("/api/locatarios", post(handlers::locatarios::create_locatario))
        .route(
            "/api/locatarios/{locatario_id}",
            get(handlers::locatarios::get_locatario)
                .put(handlers::locatarios::update_locatario)
                .delete(handlers::locatarios::delete_locatario),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(imovel_routes)
        .merge(unidade_routes)
        .merge(locatario_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "API de Gerenciamento de Aluguéis",
        "docs": "/api-docs/openapi.json",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
