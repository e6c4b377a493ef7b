// src/db/unidade_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::unidade::{StatusUnidade, Unidade, UnidadeDados},
};

const COLUMNS: &str = "id, imovel_id, numero, valor_aluguel, status";

#[derive(Debug, Clone, Copy, Default)]
pub struct UnidadeRepository;

// Converte a violação de (imovel_id, numero) no erro de regra de negócio
fn map_numero_conflict(e: sqlx::Error, numero: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("unidades_imovel_numero_key") {
            return AppError::UnitNumberAlreadyExists(numero.to_string());
        }
    }
    e.into()
}

impl UnidadeRepository {
    pub async fn list_by_imovel<'e, E>(
        &self,
        executor: E,
        imovel_id: Uuid,
    ) -> Result<Vec<Unidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM unidades WHERE imovel_id = $1 ORDER BY numero ASC");
        let unidades = sqlx::query_as::<_, Unidade>(&sql)
            .bind(imovel_id)
            .fetch_all(executor)
            .await?;
        Ok(unidades)
    }

    /// Busca uma unidade; com `for_update` a linha fica travada até o fim da transação.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        for_update: bool,
    ) -> Result<Option<Unidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lock = if for_update { " FOR UPDATE" } else { "" };
        let sql = format!("SELECT {COLUMNS} FROM unidades WHERE id = $1{lock}");
        let unidade = sqlx::query_as::<_, Unidade>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(unidade)
    }

    pub async fn find_by_numero<'e, E>(
        &self,
        executor: E,
        imovel_id: Uuid,
        numero: &str,
    ) -> Result<Option<Unidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM unidades WHERE imovel_id = $1 AND numero = $2");
        let unidade = sqlx::query_as::<_, Unidade>(&sql)
            .bind(imovel_id)
            .bind(numero)
            .fetch_optional(executor)
            .await?;
        Ok(unidade)
    }

    /// Toda unidade nasce "disponivel".
    pub async fn create_unidade<'e, E>(
        &self,
        executor: E,
        imovel_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO unidades (id, imovel_id, numero, valor_aluguel, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Unidade>(&sql)
            .bind(Uuid::new_v4())
            .bind(imovel_id)
            .bind(&dados.numero)
            .bind(dados.valor_aluguel)
            .bind(StatusUnidade::Disponivel)
            .fetch_one(executor)
            .await
            .map_err(|e| map_numero_conflict(e, &dados.numero))
    }

    // Substitui numero e valor_aluguel; o status não é tocado aqui
    pub async fn replace_unidade<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE unidades
            SET numero = $2, valor_aluguel = $3
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Unidade>(&sql)
            .bind(id)
            .bind(&dados.numero)
            .bind(dados.valor_aluguel)
            .fetch_one(executor)
            .await
            .map_err(|e| map_numero_conflict(e, &dados.numero))
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: StatusUnidade,
    ) -> Result<Unidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("UPDATE unidades SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let unidade = sqlx::query_as::<_, Unidade>(&sql)
            .bind(id)
            .bind(status)
            .fetch_one(executor)
            .await?;
        Ok(unidade)
    }

    pub async fn delete_unidade<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM unidades WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
