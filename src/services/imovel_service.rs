// src/services/imovel_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        imovel::{Imovel, ImovelDetalhado, ImovelPayload},
        unidade::UnidadeDetalhada,
    },
    services::autorizacao::authorize,
};

#[derive(Clone)]
pub struct ImovelService {
    store: Arc<dyn Store>,
}

impl ImovelService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // Só os imóveis do próprio usuário
    pub async fn list_imoveis(&self, usuario_id: Uuid) -> Result<Vec<Imovel>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_imoveis(usuario_id).await
    }

    /// Imóvel com as unidades e o locatário atual de cada uma.
    pub async fn get_imovel(
        &self,
        usuario_id: Uuid,
        imovel_id: Uuid,
    ) -> Result<ImovelDetalhado, AppError> {
        let mut uow = self.store.begin().await?;
        let imovel: Imovel = authorize(&mut *uow, imovel_id, usuario_id).await?;

        let unidades = uow.list_unidades(imovel.id).await?;
        let mut detalhadas = Vec::with_capacity(unidades.len());
        for unidade in unidades {
            let locatario = uow.find_locatario_by_unidade(unidade.id).await?;
            detalhadas.push(UnidadeDetalhada::new(unidade, locatario));
        }

        Ok(ImovelDetalhado::new(imovel, detalhadas))
    }

    pub async fn create_imovel(
        &self,
        usuario_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        let mut uow = self.store.begin().await?;
        let imovel = uow.insert_imovel(usuario_id, dados).await?;
        uow.commit().await?;

        tracing::info!(imovel_id = %imovel.id, %usuario_id, "🏢 Imóvel criado");
        Ok(imovel)
    }

    // Substituição integral; o dono continua o mesmo
    pub async fn replace_imovel(
        &self,
        usuario_id: Uuid,
        imovel_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        let mut uow = self.store.begin().await?;
        let imovel: Imovel = authorize(&mut *uow, imovel_id, usuario_id).await?;
        let atualizado = uow.replace_imovel(imovel.id, dados).await?;
        uow.commit().await?;
        Ok(atualizado)
    }

    // Unidades e locatários vão junto (cascata)
    pub async fn delete_imovel(&self, usuario_id: Uuid, imovel_id: Uuid) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        let imovel: Imovel = authorize(&mut *uow, imovel_id, usuario_id).await?;
        uow.delete_imovel(imovel.id).await?;
        uow.commit().await?;

        tracing::info!(%imovel_id, "🗑️ Imóvel removido");
        Ok(())
    }
}
