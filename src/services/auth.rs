// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Store,
    models::auth::{Claims, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        jwt_secret: String,
        token_ttl: chrono::Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    pub async fn register_user(
        &self,
        nome: &str,
        email: &str,
        senha: &str,
    ) -> Result<Usuario, AppError> {
        // 1. Checagem rápida antes do hashing (a chave única do e-mail continua valendo)
        {
            let mut uow = self.store.begin().await?;
            if uow.find_usuario_by_email(email).await?.is_some() {
                return Err(AppError::EmailAlreadyExists);
            }
        }

        // 2. Hashing fora da transação, em um thread separado
        let senha_clone = senha.to_owned();
        let cost = self.bcrypt_cost;
        let senha_hash = tokio::task::spawn_blocking(move || hash(&senha_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 3. Cria o usuário
        let mut uow = self.store.begin().await?;
        let usuario = uow.insert_usuario(nome, email, &senha_hash).await?;
        uow.commit().await?;

        tracing::info!(usuario_id = %usuario.id, "👤 Usuário registrado");
        Ok(usuario)
    }

    /// Confere e-mail e senha e devolve o usuário.
    pub async fn authenticate(&self, email: &str, senha: &str) -> Result<Usuario, AppError> {
        let usuario = {
            let mut uow = self.store.begin().await?;
            uow.find_usuario_by_email(email)
                .await?
                .ok_or(AppError::InvalidCredentials)?
        };

        let senha_clone = senha.to_owned();
        let hash_clone = usuario.senha_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }
        Ok(usuario)
    }

    pub async fn login_user(&self, email: &str, senha: &str) -> Result<String, AppError> {
        let usuario = self.authenticate(email, senha).await?;
        self.create_token(&usuario.email)
    }

    /// Valida o token e carrega o usuário do `sub` (e-mail).
    pub async fn verify_token(&self, token: &str) -> Result<Usuario, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let mut uow = self.store.begin().await?;
        uow.find_usuario_by_email(&token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub async fn delete_user(&self, usuario_id: Uuid) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        uow.delete_usuario(usuario_id).await?;
        uow.commit().await?;

        tracing::info!(%usuario_id, "🗑️ Usuário removido (imóveis em cascata)");
        Ok(())
    }

    pub fn create_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: email.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
