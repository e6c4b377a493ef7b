// src/services/unidade_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        imovel::Imovel,
        unidade::{Unidade, UnidadeDados, UnidadeDetalhada},
    },
    services::autorizacao::{authorize, Recurso},
};

#[derive(Clone)]
pub struct UnidadeService {
    store: Arc<dyn Store>,
}

impl UnidadeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get_unidade(
        &self,
        usuario_id: Uuid,
        unidade_id: Uuid,
    ) -> Result<UnidadeDetalhada, AppError> {
        let mut uow = self.store.begin().await?;
        let unidade: Unidade = authorize(&mut *uow, unidade_id, usuario_id).await?;
        let locatario = uow.find_locatario_by_unidade(unidade.id).await?;
        Ok(UnidadeDetalhada::new(unidade, locatario))
    }

    /// LÓGICA DE NEGÓCIO: cria uma unidade garantindo `(imovel_id, numero)` único.
    ///
    /// A linha do imóvel fica travada entre a checagem e o insert, então duas
    /// criações concorrentes com o mesmo número não passam juntas.
    pub async fn create_unidade(
        &self,
        usuario_id: Uuid,
        imovel_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        let mut uow = self.store.begin().await?;

        // 1. O imóvel precisa ser do usuário
        let imovel: Imovel = authorize(&mut *uow, imovel_id, usuario_id).await?;

        // 2. Trava o imóvel e verifica o número
        uow.lock_imovel(imovel.id)
            .await?
            .ok_or(AppError::NotFound(Imovel::NAO_ENCONTRADO))?;
        if uow
            .find_unidade_by_numero(imovel.id, &dados.numero)
            .await?
            .is_some()
        {
            return Err(AppError::UnitNumberAlreadyExists(dados.numero.clone()));
        }

        // 3. Insere (nasce "disponivel") e confirma
        let unidade = uow.insert_unidade(imovel.id, dados).await?;
        uow.commit().await?;

        tracing::info!(unidade_id = %unidade.id, %imovel_id, numero = %unidade.numero, "🚪 Unidade criada");
        Ok(unidade)
    }

    /// Substitui `numero` e `valor_aluguel`. O status de ocupação não muda aqui.
    pub async fn replace_unidade(
        &self,
        usuario_id: Uuid,
        unidade_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        let mut uow = self.store.begin().await?;
        let unidade: Unidade = authorize(&mut *uow, unidade_id, usuario_id).await?;

        if unidade.numero != dados.numero {
            uow.lock_imovel(unidade.imovel_id).await?;
            if let Some(outra) = uow
                .find_unidade_by_numero(unidade.imovel_id, &dados.numero)
                .await?
            {
                if outra.id != unidade.id {
                    return Err(AppError::UnitNumberAlreadyExists(dados.numero.clone()));
                }
            }
        }

        let atualizada = uow.replace_unidade(unidade.id, dados).await?;
        uow.commit().await?;
        Ok(atualizada)
    }

    // O locatário (se houver) vai junto pela cascata; não há status para ajustar
    pub async fn delete_unidade(&self, usuario_id: Uuid, unidade_id: Uuid) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        let unidade: Unidade = authorize(&mut *uow, unidade_id, usuario_id).await?;
        uow.delete_unidade(unidade.id).await?;
        uow.commit().await?;

        tracing::info!(%unidade_id, "🗑️ Unidade removida");
        Ok(())
    }
}
