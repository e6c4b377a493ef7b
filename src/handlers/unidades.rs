// src/handlers/unidades.rs

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
    models::unidade::{CreateUnidadePayload, Unidade, UnidadeDados, UnidadeDetalhada},
};

#[utoipa::path(
    post,
    path = "/api/unidades",
    tag = "Unidades",
    request_body = CreateUnidadePayload,
    responses(
        (status = 200, description = "Unidade criada como 'disponivel'", body = Unidade),
        (status = 400, description = "Dados inválidos ou número já usado neste imóvel"),
        (status = 403, description = "Imóvel de outro usuário"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_unidade(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CreateUnidadePayload>,
) -> Result<Json<Unidade>, AppError> {
    payload.validate()?;
    let (imovel_id, dados) = payload.into_parts();

    let unidade = app_state
        .unidade_service
        .create_unidade(usuario.id, imovel_id, &dados)
        .await?;
    Ok(Json(unidade))
}

#[utoipa::path(
    get,
    path = "/api/unidades/{unidade_id}",
    tag = "Unidades",
    responses(
        (status = 200, description = "Unidade com o locatário atual", body = UnidadeDetalhada),
        (status = 403, description = "Unidade de outro usuário"),
        (status = 404, description = "Unidade não encontrada")
    ),
    params(
        ("unidade_id" = Uuid, Path, description = "ID da Unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_unidade(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(unidade_id): Path<Uuid>,
) -> Result<Json<UnidadeDetalhada>, AppError> {
    let unidade = app_state
        .unidade_service
        .get_unidade(usuario.id, unidade_id)
        .await?;
    Ok(Json(unidade))
}

// O `status` não é aceito aqui; ele segue o locatário
#[utoipa::path(
    put,
    path = "/api/unidades/{unidade_id}",
    tag = "Unidades",
    request_body = UnidadeDados,
    responses(
        (status = 200, description = "Unidade substituída", body = Unidade),
        (status = 400, description = "Dados inválidos ou número já usado neste imóvel"),
        (status = 403, description = "Unidade de outro usuário"),
        (status = 404, description = "Unidade não encontrada")
    ),
    params(
        ("unidade_id" = Uuid, Path, description = "ID da Unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_unidade(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(unidade_id): Path<Uuid>,
    Json(payload): Json<UnidadeDados>,
) -> Result<Json<Unidade>, AppError> {
    payload.validate()?;

    let unidade = app_state
        .unidade_service
        .replace_unidade(usuario.id, unidade_id, &payload)
        .await?;
    Ok(Json(unidade))
}

#[utoipa::path(
    delete,
    path = "/api/unidades/{unidade_id}",
    tag = "Unidades",
    responses(
        (status = 200, description = "Unidade removida (locatário em cascata)"),
        (status = 403, description = "Unidade de outro usuário"),
        (status = 404, description = "Unidade não encontrada")
    ),
    params(
        ("unidade_id" = Uuid, Path, description = "ID da Unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_unidade(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(unidade_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state
        .unidade_service
        .delete_unidade(usuario.id, unidade_id)
        .await?;
    Ok(Json(json!({ "message": "Unidade deletada com sucesso" })))
}
