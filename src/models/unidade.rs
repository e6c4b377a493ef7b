// src/models/unidade.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::locatario::Locatario;

// Estado de ocupação. Só o serviço de locatários muda esse valor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_unidade", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum StatusUnidade {
    #[default]
    Disponivel, // Vira "disponivel"
    Alugado,    // Vira "alugado"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Unidade {
    pub id: Uuid,
    pub imovel_id: Uuid,
    #[schema(example = "101")]
    pub numero: String,
    #[schema(value_type = f64, example = 1500.0)]
    pub valor_aluguel: Decimal,
    pub status: StatusUnidade,
}

// ---
// Validação Customizada
// ---
// A coluna é NUMERIC(12, 2): no máximo 10 dígitos inteiros e 2 casas decimais.
const CASAS_DECIMAIS: u32 = 2;
const LIMITE_ALUGUEL: i64 = 10_000_000_000;

pub(crate) fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("exclusive_min".into(), &0.0);
        err.message = Some("O valor do aluguel deve ser maior que zero.".into());
        return Err(err);
    }
    if val.normalize().scale() > CASAS_DECIMAIS {
        let mut err = ValidationError::new("scale");
        err.add_param("max_scale".into(), &CASAS_DECIMAIS);
        err.message = Some("O valor do aluguel aceita no máximo 2 casas decimais.".into());
        return Err(err);
    }
    if *val >= Decimal::from(LIMITE_ALUGUEL) {
        let mut err = ValidationError::new("range");
        err.add_param("exclusive_max".into(), &LIMITE_ALUGUEL);
        err.message = Some("O valor do aluguel excede o limite permitido.".into());
        return Err(err);
    }
    Ok(())
}

/// Estado completo e mutável de uma unidade (substituição integral no PUT).
/// O `status` fica de fora: ele é derivado da existência de um locatário.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UnidadeDados {
    #[validate(length(min = 1, message = "O número da unidade é obrigatório."))]
    #[schema(example = "101")]
    pub numero: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 1500.0)]
    pub valor_aluguel: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUnidadePayload {
    pub imovel_id: Uuid,

    #[validate(length(min = 1, message = "O número da unidade é obrigatório."))]
    #[schema(example = "101")]
    pub numero: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 1500.0)]
    pub valor_aluguel: Decimal,
}

impl CreateUnidadePayload {
    pub fn into_parts(self) -> (Uuid, UnidadeDados) {
        (
            self.imovel_id,
            UnidadeDados {
                numero: self.numero,
                valor_aluguel: self.valor_aluguel,
            },
        )
    }
}

// Unidade com o locatário atual (se houver)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnidadeDetalhada {
    pub id: Uuid,
    pub imovel_id: Uuid,
    pub numero: String,
    #[schema(value_type = f64)]
    pub valor_aluguel: Decimal,
    pub status: StatusUnidade,
    pub locatario: Option<Locatario>,
}

impl UnidadeDetalhada {
    pub fn new(unidade: Unidade, locatario: Option<Locatario>) -> Self {
        Self {
            id: unidade.id,
            imovel_id: unidade.imovel_id,
            numero: unidade.numero,
            valor_aluguel: unidade.valor_aluguel,
            status: unidade.status,
            locatario,
        }
    }
}
