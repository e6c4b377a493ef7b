// src/handlers/imoveis.rs

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
    models::{
        endereco::Endereco,
        imovel::{Imovel, ImovelDetalhado, ImovelPayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/imoveis",
    tag = "Imoveis",
    responses(
        (status = 200, description = "Imóveis do usuário autenticado", body = [Imovel])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_imoveis(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<Vec<Imovel>>, AppError> {
    let imoveis = app_state.imovel_service.list_imoveis(usuario.id).await?;
    Ok(Json(imoveis))
}

#[utoipa::path(
    get,
    path = "/api/imoveis/{imovel_id}",
    tag = "Imoveis",
    responses(
        (status = 200, description = "Imóvel com unidades e locatários", body = ImovelDetalhado),
        (status = 403, description = "Imóvel de outro usuário"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    params(
        ("imovel_id" = Uuid, Path, description = "ID do Imóvel")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(imovel_id): Path<Uuid>,
) -> Result<Json<ImovelDetalhado>, AppError> {
    let imovel = app_state
        .imovel_service
        .get_imovel(usuario.id, imovel_id)
        .await?;
    Ok(Json(imovel))
}

#[utoipa::path(
    post,
    path = "/api/imoveis",
    tag = "Imoveis",
    request_body = ImovelPayload,
    responses(
        (status = 200, description = "Imóvel criado", body = Imovel),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<ImovelPayload>,
) -> Result<Json<Imovel>, AppError> {
    payload.validate()?;

    let imovel = app_state
        .imovel_service
        .create_imovel(usuario.id, &payload)
        .await?;
    Ok(Json(imovel))
}

#[utoipa::path(
    put,
    path = "/api/imoveis/{imovel_id}",
    tag = "Imoveis",
    request_body = ImovelPayload,
    responses(
        (status = 200, description = "Imóvel substituído", body = Imovel),
        (status = 403, description = "Imóvel de outro usuário"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    params(
        ("imovel_id" = Uuid, Path, description = "ID do Imóvel")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(imovel_id): Path<Uuid>,
    Json(payload): Json<ImovelPayload>,
) -> Result<Json<Imovel>, AppError> {
    payload.validate()?;

    let imovel = app_state
        .imovel_service
        .replace_imovel(usuario.id, imovel_id, &payload)
        .await?;
    Ok(Json(imovel))
}

#[utoipa::path(
    delete,
    path = "/api/imoveis/{imovel_id}",
    tag = "Imoveis",
    responses(
        (status = 200, description = "Imóvel removido (unidades e locatários em cascata)"),
        (status = 403, description = "Imóvel de outro usuário"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    params(
        ("imovel_id" = Uuid, Path, description = "ID do Imóvel")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(imovel_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state
        .imovel_service
        .delete_imovel(usuario.id, imovel_id)
        .await?;
    Ok(Json(json!({ "message": "Imóvel deletado com sucesso" })))
}

// Rota pública: não exige token
#[utoipa::path(
    get,
    path = "/api/imoveis/buscar-cep/{cep}",
    tag = "Imoveis",
    responses(
        (status = 200, description = "Endereço do CEP", body = Endereco),
        (status = 404, description = "CEP não encontrado")
    ),
    params(
        ("cep" = String, Path, description = "CEP, com ou sem máscara")
    )
)]
pub async fn buscar_cep(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<Endereco>, AppError> {
    let endereco = app_state.cep_service.buscar(&cep).await?;
    Ok(Json(endereco))
}
