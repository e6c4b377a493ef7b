// src/services/cep_service.rs

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{common::error::AppError, models::endereco::Endereco};

/// Falhas da consulta de CEP. A borda HTTP trata as duas como 404.
#[derive(Debug, thiserror::Error)]
pub enum CepError {
    #[error("CEP inexistente")]
    NaoEncontrado,

    #[error("serviço de CEP indisponível: {0}")]
    Indisponivel(String),
}

// Campos do ViaCEP com os nomes de lá.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespostaViaCep {
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    // Vem como `true` (ou "true") quando o CEP não existe
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

impl RespostaViaCep {
    fn is_erro(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        }
    }
}

#[async_trait]
pub trait CepLookup: Send + Sync {
    /// `cep` já normalizado: exatamente 8 dígitos.
    async fn lookup(&self, cep: &str) -> Result<RespostaViaCep, CepError>;
}

pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente HTTP: {}", e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CepLookup for ViaCepClient {
    async fn lookup(&self, cep: &str) -> Result<RespostaViaCep, CepError> {
        let url = format!("{}/{}/json/", self.base_url, cep);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CepError::Indisponivel(e.to_string()))?;

        // ViaCEP responde 400 para formato inválido
        if resp.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(CepError::NaoEncontrado);
        }
        if !resp.status().is_success() {
            return Err(CepError::Indisponivel(format!("status {}", resp.status())));
        }

        let corpo: RespostaViaCep = resp
            .json()
            .await
            .map_err(|e| CepError::Indisponivel(e.to_string()))?;
        if corpo.is_erro() {
            return Err(CepError::NaoEncontrado);
        }
        Ok(corpo)
    }
}

/// Só os dígitos; precisa sobrar exatamente 8.
pub fn normalize_cep(cep: &str) -> Option<String> {
    let digitos: String = cep.chars().filter(|c| c.is_ascii_digit()).collect();
    (digitos.len() == 8).then_some(digitos)
}

#[derive(Clone)]
pub struct CepService {
    lookup: Arc<dyn CepLookup>,
}

impl CepService {
    pub fn new(lookup: Arc<dyn CepLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve o endereço de um CEP. O campo `cep` da resposta repete a entrada.
    pub async fn buscar(&self, cep: &str) -> Result<Endereco, AppError> {
        let digitos = normalize_cep(cep).ok_or(AppError::CepNotFound)?;

        match self.lookup.lookup(&digitos).await {
            Ok(r) => Ok(Endereco {
                endereco: r.logradouro,
                bairro: r.bairro,
                cidade: r.localidade,
                estado: r.uf,
                cep: cep.to_string(),
            }),
            Err(CepError::NaoEncontrado) => Err(AppError::CepNotFound),
            Err(e @ CepError::Indisponivel(_)) => {
                tracing::warn!(cep = %digitos, error = %e, "⚠️ Falha na consulta de CEP");
                Err(AppError::CepNotFound)
            }
        }
    }
}
