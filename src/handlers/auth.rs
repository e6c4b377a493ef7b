// src/handlers/auth.rs

use axum::{extract::State, Json};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginUserPayload, RegisterUserPayload, TokenResponse, Usuario},
};

#[utoipa::path(
    post,
    path = "/api/auth/registro",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 200, description = "Usuário criado", body = Usuario),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<Usuario>, AppError> {
    payload.validate()?;

    let usuario = app_state
        .auth_service
        .register_user(&payload.nome, &payload.email, &payload.senha)
        .await?;

    Ok(Json(usuario))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Token de acesso", body = TokenResponse),
        (status = 401, description = "Email ou senha incorretos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.senha)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário autenticado", body = Usuario),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}

#[utoipa::path(
    delete,
    path = "/api/auth/me",
    tag = "Users",
    responses(
        (status = 200, description = "Conta removida junto com imóveis, unidades e locatários"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<Value>, AppError> {
    app_state.auth_service.delete_user(usuario.id).await?;
    Ok(Json(json!({ "message": "Usuário deletado com sucesso" })))
}
