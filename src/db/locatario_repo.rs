// src/db/locatario_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::locatario::{Locatario, LocatarioDados},
};

const COLUMNS: &str = "id, unidade_id, nome, cpf, telefone, email, data_inicio_contrato, data_fim_contrato";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocatarioRepository;

impl LocatarioRepository {
    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Locatario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM locatarios WHERE id = $1");
        let locatario = sqlx::query_as::<_, Locatario>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(locatario)
    }

    pub async fn find_by_unidade<'e, E>(
        &self,
        executor: E,
        unidade_id: Uuid,
    ) -> Result<Option<Locatario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM locatarios WHERE unidade_id = $1");
        let locatario = sqlx::query_as::<_, Locatario>(&sql)
            .bind(unidade_id)
            .fetch_optional(executor)
            .await?;
        Ok(locatario)
    }

    /// A chave única em `unidade_id` é a última barreira do 1:1 unidade/locatário.
    pub async fn create_locatario<'e, E>(
        &self,
        executor: E,
        unidade_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO locatarios (
                id, unidade_id, nome, cpf, telefone, email,
                data_inicio_contrato, data_fim_contrato
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Locatario>(&sql)
            .bind(Uuid::new_v4())
            .bind(unidade_id)
            .bind(&dados.nome)
            .bind(&dados.cpf)
            .bind(&dados.telefone)
            .bind(&dados.email)
            .bind(dados.data_inicio_contrato)
            .bind(dados.data_fim_contrato)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.constraint() == Some("locatarios_unidade_id_key") {
                        return AppError::UnitAlreadyOccupied;
                    }
                }
                e.into()
            })
    }

    pub async fn replace_locatario<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE locatarios
            SET nome = $2, cpf = $3, telefone = $4, email = $5,
                data_inicio_contrato = $6, data_fim_contrato = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let locatario = sqlx::query_as::<_, Locatario>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.cpf)
            .bind(&dados.telefone)
            .bind(&dados.email)
            .bind(dados.data_inicio_contrato)
            .bind(dados.data_fim_contrato)
            .fetch_one(executor)
            .await?;
        Ok(locatario)
    }

    pub async fn delete_locatario<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM locatarios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
