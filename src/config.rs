// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::Store,
    services::{
        auth::AuthService,
        cep_service::{CepLookup, CepService},
        imovel_service::ImovelService,
        locatario_service::LocatarioService,
        unidade_service::UnidadeService,
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub bind_addr: SocketAddr,
    pub viacep_url: String,
    pub cep_timeout: Duration,
    pub bcrypt_cost: u32,
}

// Lê uma variável opcional, convertendo com `FromStr`
fn var_or<T>(nome: &str, padrao: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(nome) {
        Ok(valor) => valor
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválida ('{}'): {}", nome, valor, e)),
        Err(_) => Ok(padrao),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let jwt_expiration_minutes =
            check_jwt_expiration(var_or("JWT_EXPIRATION_MINUTES", 60 * 24 * 7)?)?;

        let bind_addr = var_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let viacep_url =
            env::var("VIACEP_URL").unwrap_or_else(|_| "https://viacep.com.br/ws".to_string());
        let cep_timeout = Duration::from_secs(var_or("CEP_TIMEOUT_SECS", 5u64)?);

        let bcrypt_cost = var_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST deve estar entre 4 e 31");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_minutes,
            bind_addr,
            viacep_url,
            cep_timeout,
            bcrypt_cost,
        })
    }
}

// Um ano no máximo; valores fora da faixa do `chrono::Duration` derrubariam o processo.
const JWT_EXPIRATION_MAX_MINUTES: i64 = 60 * 24 * 365;

fn check_jwt_expiration(minutos: i64) -> anyhow::Result<i64> {
    if !(1..=JWT_EXPIRATION_MAX_MINUTES).contains(&minutos) {
        anyhow::bail!(
            "JWT_EXPIRATION_MINUTES deve estar entre 1 e {}",
            JWT_EXPIRATION_MAX_MINUTES
        );
    }
    Ok(minutos)
}

pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub imovel_service: ImovelService,
    pub unidade_service: UnidadeService,
    pub locatario_service: LocatarioService,
    pub cep_service: CepService,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(config: Config, store: Arc<dyn Store>, cep_lookup: Arc<dyn CepLookup>) -> Self {
        let auth_service = AuthService::new(
            store.clone(),
            config.jwt_secret,
            chrono::Duration::minutes(config.jwt_expiration_minutes),
            config.bcrypt_cost,
        );

        Self {
            imovel_service: ImovelService::new(store.clone()),
            unidade_service: UnidadeService::new(store.clone()),
            locatario_service: LocatarioService::new(store),
            cep_service: CepService::new(cep_lookup),
            auth_service,
        }
    }
}
