// src/services/locatario_service.rs

//! Máquina de ocupação das unidades.
//!
//! `disponivel -> alugado` só acontece em [`LocatarioService::create_locatario`]
//! e `alugado -> disponivel` só em [`LocatarioService::delete_locatario`].
//! Em ambos o locatário e o status da unidade são gravados na mesma
//! transação, com a linha da unidade travada: "alugado" se e somente se a
//! unidade tem locatário.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        locatario::{Locatario, LocatarioDados},
        unidade::{StatusUnidade, Unidade},
    },
    services::autorizacao::{authorize, Recurso},
};

#[derive(Clone)]
pub struct LocatarioService {
    store: Arc<dyn Store>,
}

impl LocatarioService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get_locatario(
        &self,
        usuario_id: Uuid,
        locatario_id: Uuid,
    ) -> Result<Locatario, AppError> {
        let mut uow = self.store.begin().await?;
        authorize(&mut *uow, locatario_id, usuario_id).await
    }

    pub async fn create_locatario(
        &self,
        usuario_id: Uuid,
        unidade_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        let mut uow = self.store.begin().await?;

        // 1. Resolve e autoriza a unidade
        let unidade: Unidade = authorize(&mut *uow, unidade_id, usuario_id).await?;

        // 2. Trava a unidade; uma criação concorrente espera aqui e depois enxerga este locatário
        uow.lock_unidade(unidade.id)
            .await?
            .ok_or(AppError::NotFound(Unidade::NAO_ENCONTRADO))?;
        if uow.find_locatario_by_unidade(unidade.id).await?.is_some() {
            return Err(AppError::UnitAlreadyOccupied);
        }

        // 3. Locatário + status numa única unidade de trabalho
        let locatario = uow.insert_locatario(unidade.id, dados).await?;
        uow.set_unidade_status(unidade.id, StatusUnidade::Alugado)
            .await?;
        uow.commit().await?;

        tracing::info!(
            locatario_id = %locatario.id,
            %unidade_id,
            "🔑 Locatário criado, unidade alugada"
        );
        Ok(locatario)
    }

    // Substituição integral dos dados; a ocupação não muda
    pub async fn replace_locatario(
        &self,
        usuario_id: Uuid,
        locatario_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        let mut uow = self.store.begin().await?;
        let locatario: Locatario = authorize(&mut *uow, locatario_id, usuario_id).await?;
        let atualizado = uow.replace_locatario(locatario.id, dados).await?;
        uow.commit().await?;
        Ok(atualizado)
    }

    pub async fn delete_locatario(
        &self,
        usuario_id: Uuid,
        locatario_id: Uuid,
    ) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;

        // 1. Resolve pela cadeia locatário -> unidade -> imóvel -> usuário
        let locatario: Locatario = authorize(&mut *uow, locatario_id, usuario_id).await?;

        // 2. Trava a unidade e confere que o locatário ainda está lá
        uow.lock_unidade(locatario.unidade_id).await?;
        if uow.find_locatario(locatario.id).await?.is_none() {
            return Err(AppError::NotFound(Locatario::NAO_ENCONTRADO));
        }

        // 3. Remove e libera a unidade
        uow.delete_locatario(locatario.id).await?;
        uow.set_unidade_status(locatario.unidade_id, StatusUnidade::Disponivel)
            .await?;
        uow.commit().await?;

        tracing::info!(
            %locatario_id,
            unidade_id = %locatario.unidade_id,
            "📤 Locatário removido, unidade disponível"
        );
        Ok(())
    }
}
