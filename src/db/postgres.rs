// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ImovelRepository, LocatarioRepository, UnidadeRepository, UsuarioRepository,
        store::{Store, UnitOfWork},
    },
    models::{
        auth::Usuario,
        imovel::{Imovel, ImovelPayload},
        locatario::{Locatario, LocatarioDados},
        unidade::{StatusUnidade, Unidade, UnidadeDados},
    },
};

// Armazenamento de produção: cada unidade de trabalho é uma transação do Postgres
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        // READ COMMITTED (padrão do Postgres) + travas de linha nos fluxos de verificar-e-agir
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork {
            tx,
            usuarios: UsuarioRepository,
            imoveis: ImovelRepository,
            unidades: UnidadeRepository,
            locatarios: LocatarioRepository,
        }))
    }
}

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
    usuarios: UsuarioRepository,
    imoveis: ImovelRepository,
    unidades: UnidadeRepository,
    locatarios: LocatarioRepository,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn insert_usuario(
        &mut self,
        nome: &str,
        email: &str,
        senha_hash: &str,
    ) -> Result<Usuario, AppError> {
        self.usuarios
            .create_usuario(&mut *self.tx, nome, email, senha_hash)
            .await
    }

    async fn find_usuario_by_email(&mut self, email: &str) -> Result<Option<Usuario>, AppError> {
        self.usuarios.find_by_email(&mut *self.tx, email).await
    }

    async fn delete_usuario(&mut self, id: Uuid) -> Result<(), AppError> {
        self.usuarios.delete_usuario(&mut *self.tx, id).await
    }

    async fn list_imoveis(&mut self, usuario_id: Uuid) -> Result<Vec<Imovel>, AppError> {
        self.imoveis.list_by_usuario(&mut *self.tx, usuario_id).await
    }

    async fn find_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError> {
        self.imoveis.find_by_id(&mut *self.tx, id, false).await
    }

    async fn lock_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError> {
        self.imoveis.find_by_id(&mut *self.tx, id, true).await
    }

    async fn insert_imovel(
        &mut self,
        usuario_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        self.imoveis
            .create_imovel(&mut *self.tx, usuario_id, dados)
            .await
    }

    async fn replace_imovel(
        &mut self,
        id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        self.imoveis.replace_imovel(&mut *self.tx, id, dados).await
    }

    async fn delete_imovel(&mut self, id: Uuid) -> Result<(), AppError> {
        self.imoveis.delete_imovel(&mut *self.tx, id).await
    }

    async fn list_unidades(&mut self, imovel_id: Uuid) -> Result<Vec<Unidade>, AppError> {
        self.unidades.list_by_imovel(&mut *self.tx, imovel_id).await
    }

    async fn find_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError> {
        self.unidades.find_by_id(&mut *self.tx, id, false).await
    }

    async fn lock_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError> {
        self.unidades.find_by_id(&mut *self.tx, id, true).await
    }

    async fn find_unidade_by_numero(
        &mut self,
        imovel_id: Uuid,
        numero: &str,
    ) -> Result<Option<Unidade>, AppError> {
        self.unidades
            .find_by_numero(&mut *self.tx, imovel_id, numero)
            .await
    }

    async fn insert_unidade(
        &mut self,
        imovel_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        self.unidades
            .create_unidade(&mut *self.tx, imovel_id, dados)
            .await
    }

    async fn replace_unidade(
        &mut self,
        id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        self.unidades.replace_unidade(&mut *self.tx, id, dados).await
    }

    async fn set_unidade_status(
        &mut self,
        id: Uuid,
        status: StatusUnidade,
    ) -> Result<Unidade, AppError> {
        self.unidades.update_status(&mut *self.tx, id, status).await
    }

    async fn delete_unidade(&mut self, id: Uuid) -> Result<(), AppError> {
        self.unidades.delete_unidade(&mut *self.tx, id).await
    }

    async fn find_locatario(&mut self, id: Uuid) -> Result<Option<Locatario>, AppError> {
        self.locatarios.find_by_id(&mut *self.tx, id).await
    }

    async fn find_locatario_by_unidade(
        &mut self,
        unidade_id: Uuid,
    ) -> Result<Option<Locatario>, AppError> {
        self.locatarios
            .find_by_unidade(&mut *self.tx, unidade_id)
            .await
    }

    async fn insert_locatario(
        &mut self,
        unidade_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        self.locatarios
            .create_locatario(&mut *self.tx, unidade_id, dados)
            .await
    }

    async fn replace_locatario(
        &mut self,
        id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        self.locatarios
            .replace_locatario(&mut *self.tx, id, dados)
            .await
    }

    async fn delete_locatario(&mut self, id: Uuid) -> Result<(), AppError> {
        self.locatarios.delete_locatario(&mut *self.tx, id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
