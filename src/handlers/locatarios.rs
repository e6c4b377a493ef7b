// src/handlers/locatarios.rs

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::locatario::{CreateLocatarioPayload, Locatario, LocatarioDados},
};

#[utoipa::path(
    post,
    path = "/api/locatarios",
    tag = "Locatarios",
    request_body = CreateLocatarioPayload,
    responses(
        (status = 200, description = "Locatário criado; a unidade passa a 'alugado'", body = Locatario),
        (status = 400, description = "Dados inválidos ou unidade já ocupada"),
        (status = 403, description = "Unidade de outro usuário"),
        (status = 404, description = "Unidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_locatario(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreateLocatarioPayload>,
) -> Result<Json<Locatario>, AppError> {
    payload.validate()?;
    let (unidade_id, dados) = payload.into_parts();

    let locatario = app_state
        .locatario_service
        .create_locatario(usuario.id, unidade_id, &dados)
        .await?;
    Ok(Json(locatario))
}

#[utoipa::path(
    get,
    path = "/api/locatarios/{locatario_id}",
    tag = "Locatarios",
    responses(
        (status = 200, description = "Locatário", body = Locatario),
        (status = 403, description = "Locatário de outro usuário"),
        (status = 404, description = "Locatário não encontrado")
    ),
    params(
        ("locatario_id" = Uuid, Path, description = "ID do Locatário")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_locatario(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(locatario_id): Path<Uuid>,
) -> Result<Json<Locatario>, AppError> {
    let locatario = app_state
        .locatario_service
        .get_locatario(usuario.id, locatario_id)
        .await?;
    Ok(Json(locatario))
}

#[utoipa::path(
    put,
    path = "/api/locatarios/{locatario_id}",
    tag = "Locatarios",
    request_body = LocatarioDados,
    responses(
        (status = 200, description = "Locatário substituído", body = Locatario),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Locatário de outro usuário"),
        (status = 404, description = "Locatário não encontrado")
    ),
    params(
        ("locatario_id" = Uuid, Path, description = "ID do Locatário")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_locatario(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(locatario_id): Path<Uuid>,
    Json(payload): Json<LocatarioDados>,
) -> Result<Json<Locatario>, AppError> {
    payload.validate()?;

    let locatario = app_state
        .locatario_service
        .replace_locatario(usuario.id, locatario_id, &payload)
        .await?;
    Ok(Json(locatario))
}

#[utoipa::path(
    delete,
    path = "/api/locatarios/{locatario_id}",
    tag = "Locatarios",
    responses(
        (status = 200, description = "Locatário removido; a unidade volta a 'disponivel'"),
        (status = 403, description = "Locatário de outro usuário"),
        (status = 404, description = "Locatário não encontrado")
    ),
    params(
        ("locatario_id" = Uuid, Path, description = "ID do Locatário")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_locatario(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(locatario_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state
        .locatario_service
        .delete_locatario(usuario.id, locatario_id)
        .await?;
    Ok(Json(json!({ "message": "Locatário removido com sucesso" })))
}
