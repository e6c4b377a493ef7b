// src/db/store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Usuario,
        imovel::{Imovel, ImovelPayload},
        locatario::{Locatario, LocatarioDados},
        unidade::{StatusUnidade, Unidade, UnidadeDados},
    },
};

/// Ponto de entrada da persistência. Cada requisição abre a sua própria
/// unidade de trabalho e a confirma (ou descarta) ao final.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError>;
}

/// Uma transação aberta no armazenamento.
///
/// Nada é visível para outras requisições antes de `commit`. Se o valor for
/// descartado sem `commit`, tudo o que foi feito é desfeito (rollback).
///
/// Violações das chaves únicas do esquema voltam como os mesmos erros de
/// regra de negócio das verificações prévias (`EmailAlreadyExists`,
/// `UnitNumberAlreadyExists`, `UnitAlreadyOccupied`).
#[async_trait]
pub trait UnitOfWork: Send {
    // --- Usuários ---
    async fn insert_usuario(
        &mut self,
        nome: &str,
        email: &str,
        senha_hash: &str,
    ) -> Result<Usuario, AppError>;
    async fn find_usuario_by_email(&mut self, email: &str) -> Result<Option<Usuario>, AppError>;
    async fn delete_usuario(&mut self, id: Uuid) -> Result<(), AppError>;

    // --- Imóveis ---
    async fn list_imoveis(&mut self, usuario_id: Uuid) -> Result<Vec<Imovel>, AppError>;
    async fn find_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError>;
    /// Trava a linha do imóvel até o fim da transação.
    async fn lock_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError>;
    async fn insert_imovel(
        &mut self,
        usuario_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError>;
    async fn replace_imovel(&mut self, id: Uuid, dados: &ImovelPayload)
    -> Result<Imovel, AppError>;
    async fn delete_imovel(&mut self, id: Uuid) -> Result<(), AppError>;

    // --- Unidades ---
    async fn list_unidades(&mut self, imovel_id: Uuid) -> Result<Vec<Unidade>, AppError>;
    async fn find_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError>;
    /// Trava a linha da unidade até o fim da transação.
    async fn lock_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError>;
    async fn find_unidade_by_numero(
        &mut self,
        imovel_id: Uuid,
        numero: &str,
    ) -> Result<Option<Unidade>, AppError>;
    async fn insert_unidade(
        &mut self,
        imovel_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError>;
    async fn replace_unidade(&mut self, id: Uuid, dados: &UnidadeDados)
    -> Result<Unidade, AppError>;
    async fn set_unidade_status(
        &mut self,
        id: Uuid,
        status: StatusUnidade,
    ) -> Result<Unidade, AppError>;
    async fn delete_unidade(&mut self, id: Uuid) -> Result<(), AppError>;

    // --- Locatários ---
    async fn find_locatario(&mut self, id: Uuid) -> Result<Option<Locatario>, AppError>;
    async fn find_locatario_by_unidade(
        &mut self,
        unidade_id: Uuid,
    ) -> Result<Option<Locatario>, AppError>;
    async fn insert_locatario(
        &mut self,
        unidade_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError>;
    async fn replace_locatario(
        &mut self,
        id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError>;
    async fn delete_locatario(&mut self, id: Uuid) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
