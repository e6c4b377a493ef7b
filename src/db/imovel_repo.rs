// src/db/imovel_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::imovel::{Imovel, ImovelPayload},
};

const COLUMNS: &str = "id, nome, endereco, cidade, estado, cep, usuario_id";

#[derive(Debug, Clone, Copy, Default)]
pub struct ImovelRepository;

impl ImovelRepository {
    pub async fn list_by_usuario<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
    ) -> Result<Vec<Imovel>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM imoveis WHERE usuario_id = $1 ORDER BY nome ASC");
        let imoveis = sqlx::query_as::<_, Imovel>(&sql)
            .bind(usuario_id)
            .fetch_all(executor)
            .await?;
        Ok(imoveis)
    }

    /// Busca um imóvel; com `for_update` a linha fica travada até o fim da transação.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        for_update: bool,
    ) -> Result<Option<Imovel>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lock = if for_update { " FOR UPDATE" } else { "" };
        let sql = format!("SELECT {COLUMNS} FROM imoveis WHERE id = $1{lock}");
        let imovel = sqlx::query_as::<_, Imovel>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(imovel)
    }

    pub async fn create_imovel<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO imoveis (id, nome, endereco, cidade, estado, cep, usuario_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        );
        let imovel = sqlx::query_as::<_, Imovel>(&sql)
            .bind(Uuid::new_v4())
            .bind(&dados.nome)
            .bind(&dados.endereco)
            .bind(&dados.cidade)
            .bind(&dados.estado)
            .bind(&dados.cep)
            .bind(usuario_id)
            .fetch_one(executor)
            .await?;
        Ok(imovel)
    }

    // Substitui todos os campos mutáveis (o dono não muda)
    pub async fn replace_imovel<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE imoveis
            SET nome = $2, endereco = $3, cidade = $4, estado = $5, cep = $6
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let imovel = sqlx::query_as::<_, Imovel>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.endereco)
            .bind(&dados.cidade)
            .bind(&dados.estado)
            .bind(&dados.cep)
            .fetch_one(executor)
            .await?;
        Ok(imovel)
    }

    pub async fn delete_imovel<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM imoveis WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
