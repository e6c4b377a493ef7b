// src/models/locatario.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Locatario {
    pub id: Uuid,
    pub unidade_id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub data_inicio_contrato: NaiveDate,
    pub data_fim_contrato: Option<NaiveDate>,
}

// Regra: o contrato não pode terminar antes de começar.
fn validate_periodo(dados: &LocatarioDados) -> Result<(), ValidationError> {
    check_periodo(dados.data_inicio_contrato, dados.data_fim_contrato)
}

fn validate_periodo_create(payload: &CreateLocatarioPayload) -> Result<(), ValidationError> {
    check_periodo(payload.data_inicio_contrato, payload.data_fim_contrato)
}

fn check_periodo(inicio: NaiveDate, fim: Option<NaiveDate>) -> Result<(), ValidationError> {
    match fim {
        Some(fim) if fim < inicio => {
            let mut err = ValidationError::new("PeriodoInvalido");
            err.message =
                Some("A data de fim do contrato não pode ser anterior à data de início.".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Estado completo e mutável de um locatário (substituição integral no PUT).
/// A unidade não faz parte: um locatário nunca muda de unidade.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_periodo", skip_on_field_errors = false))]
pub struct LocatarioDados {
    #[validate(length(min = 1, message = "O nome do locatário é obrigatório."))]
    #[schema(example = "João da Silva")]
    pub nome: String,

    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    #[schema(example = "123.456.789-00")]
    pub cpf: String,

    #[serde(default)]
    pub telefone: Option<String>,

    #[serde(default)]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[schema(example = "2025-01-01")]
    pub data_inicio_contrato: NaiveDate,

    #[serde(default)]
    #[schema(example = "2025-12-31")]
    pub data_fim_contrato: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_periodo_create", skip_on_field_errors = false))]
pub struct CreateLocatarioPayload {
    pub unidade_id: Uuid,

    #[validate(length(min = 1, message = "O nome do locatário é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    pub cpf: String,

    #[serde(default)]
    pub telefone: Option<String>,

    #[serde(default)]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub data_inicio_contrato: NaiveDate,

    #[serde(default)]
    pub data_fim_contrato: Option<NaiveDate>,
}

impl CreateLocatarioPayload {
    pub fn into_parts(self) -> (Uuid, LocatarioDados) {
        (
            self.unidade_id,
            LocatarioDados {
                nome: self.nome,
                cpf: self.cpf,
                telefone: self.telefone,
                email: self.email,
                data_inicio_contrato: self.data_inicio_contrato,
                data_fim_contrato: self.data_fim_contrato,
            },
        )
    }
}
