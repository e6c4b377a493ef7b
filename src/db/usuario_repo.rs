// src/db/usuario_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Usuario};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Debug, Clone, Copy, Default)]
pub struct UsuarioRepository;

impl UsuarioRepository {
    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_user = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, nome, email, senha_hash, created_at
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário no banco de dados,
    // com tratamento de erro específico para e-mails duplicados.
    pub async fn create_usuario<'e, E>(
        &self,
        executor: E,
        nome: &str,
        email: &str,
        senha_hash: &str,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (id, nome, email, senha_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, email, senha_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nome)
        .bind(email)
        .bind(senha_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("usuarios_email_key") {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    // Os imóveis (e tudo abaixo deles) vão junto pelo ON DELETE CASCADE
    pub async fn delete_usuario<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
