#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use gestao_alugueis::{
    build_app,
    config::{AppState, Config},
    db::MemoryStore,
    services::cep_service::{CepError, CepLookup, RespostaViaCep},
};

/// Responde só para o CEP 01001000; o 99999999 simula o serviço fora do ar.
pub struct CepFixo;

#[async_trait]
impl CepLookup for CepFixo {
    async fn lookup(&self, cep: &str) -> Result<RespostaViaCep, CepError> {
        match cep {
            "01001000" => Ok(RespostaViaCep {
                logradouro: "Praça da Sé".into(),
                bairro: "Sé".into(),
                localidade: "São Paulo".into(),
                uf: "SP".into(),
                erro: None,
            }),
            "99999999" => Err(CepError::Indisponivel("connection refused".into())),
            _ => Err(CepError::NaoEncontrado),
        }
    }
}

/// O router completo sobre um armazenamento em memória.
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config {
            database_url: "postgres://nao-usado".into(),
            jwt_secret: "segredo-de-teste".into(),
            jwt_expiration_minutes: 60,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            viacep_url: "http://localhost".into(),
            cep_timeout: Duration::from_secs(1),
            bcrypt_cost: 4,
        };
        let state = AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(CepFixo));
        Self {
            router: build_app(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, Some(token), None).await
    }

    /// Registra e faz login, devolvendo o token de acesso.
    pub async fn user(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/registro",
                None,
                json!({ "nome": "Teste", "email": email, "senha": "senha123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registro falhou: {body}");

        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "senha": "senha123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login falhou: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn imovel(&self, token: &str, nome: &str) -> String {
        let (status, body) = self
            .post(
                "/api/imoveis",
                Some(token),
                json!({
                    "nome": nome,
                    "endereco": "Rua das Flores, 123",
                    "cidade": "São Paulo",
                    "estado": "SP",
                    "cep": "01001-000"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "criar imóvel falhou: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn unidade(&self, token: &str, imovel_id: &str, numero: &str) -> (StatusCode, Value) {
        self.post(
            "/api/unidades",
            Some(token),
            json!({ "imovel_id": imovel_id, "numero": numero, "valor_aluguel": 1500.0 }),
        )
        .await
    }

    pub async fn locatario(&self, token: &str, unidade_id: &str, nome: &str) -> (StatusCode, Value) {
        self.post(
            "/api/locatarios",
            Some(token),
            json!({
                "unidade_id": unidade_id,
                "nome": nome,
                "cpf": "123.456.789-00",
                "data_inicio_contrato": "2025-01-01"
            }),
        )
        .await
    }
}
