// src/models/imovel.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::unidade::UnidadeDetalhada;

// ---
// Imovel (O "Prédio")
// ---
// O dono é fixado na criação e nunca muda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Imovel {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub cep: Option<String>,
    pub usuario_id: Uuid,
}

/// Estado completo de um imóvel. Usado tanto na criação quanto na
/// substituição (PUT): campos omitidos não são "mantidos", são substituídos.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImovelPayload {
    #[validate(length(min = 1, message = "O nome do imóvel é obrigatório."))]
    #[schema(example = "Edifício Aurora")]
    pub nome: String,

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    #[schema(example = "Rua das Flores, 123")]
    pub endereco: String,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    #[schema(example = "São Paulo")]
    pub cidade: String,

    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    #[schema(example = "SP")]
    pub estado: String,

    #[serde(default)]
    #[schema(example = "01001-000")]
    pub cep: Option<String>,
}

// Imóvel com as suas unidades (e o locatário de cada uma)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImovelDetalhado {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub cep: Option<String>,
    pub usuario_id: Uuid,
    pub unidades: Vec<UnidadeDetalhada>,
}

impl ImovelDetalhado {
    pub fn new(imovel: Imovel, unidades: Vec<UnidadeDetalhada>) -> Self {
        Self {
            id: imovel.id,
            nome: imovel.nome,
            endereco: imovel.endereco,
            cidade: imovel.cidade,
            estado: imovel.estado,
            cep: imovel.cep,
            usuario_id: imovel.usuario_id,
            unidades,
        }
    }
}
