// src/models/endereco.rs

use serde::Serialize;
use utoipa::ToSchema;

// Endereço resolvido a partir de um CEP
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Endereco {
    #[schema(example = "Praça da Sé")]
    pub endereco: String,
    #[schema(example = "Sé")]
    pub bairro: String,
    #[schema(example = "São Paulo")]
    pub cidade: String,
    #[schema(example = "SP")]
    pub estado: String,
    #[schema(example = "01001-000")]
    pub cep: String,
}
