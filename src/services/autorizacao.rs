// src/services/autorizacao.rs

//! Guardião de propriedade.
//!
//! Todo acesso a imóvel, unidade ou locatário passa por [`authorize`], que
//! resolve o recurso, sobe a cadeia até o imóvel e compara o dono com o
//! usuário da requisição:
//!
//! - o id não existe: [`AppError::NotFound`]
//! - existe, mas é de outro usuário: [`AppError::Forbidden`]

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UnitOfWork,
    models::{imovel::Imovel, locatario::Locatario, unidade::Unidade},
};

/// Um tipo de recurso protegido pela cadeia de propriedade.
#[async_trait]
pub trait Recurso: Sized + Send {
    const NAO_ENCONTRADO: &'static str;
    const SEM_PERMISSAO: &'static str;

    /// Carrega o recurso junto com o id do seu dono efetivo (`imoveis.usuario_id`).
    async fn resolve(
        uow: &mut dyn UnitOfWork,
        id: Uuid,
    ) -> Result<Option<(Self, Uuid)>, AppError>;
}

#[async_trait]
impl Recurso for Imovel {
    const NAO_ENCONTRADO: &'static str = "Imóvel não encontrado";
    const SEM_PERMISSAO: &'static str = "Você não tem permissão para acessar este imóvel";

    async fn resolve(
        uow: &mut dyn UnitOfWork,
        id: Uuid,
    ) -> Result<Option<(Self, Uuid)>, AppError> {
        Ok(uow.find_imovel(id).await?.map(|imovel| {
            let dono = imovel.usuario_id;
            (imovel, dono)
        }))
    }
}

#[async_trait]
impl Recurso for Unidade {
    const NAO_ENCONTRADO: &'static str = "Unidade não encontrada";
    const SEM_PERMISSAO: &'static str = "Você não tem permissão para acessar esta unidade";

    async fn resolve(
        uow: &mut dyn UnitOfWork,
        id: Uuid,
    ) -> Result<Option<(Self, Uuid)>, AppError> {
        let Some(unidade) = uow.find_unidade(id).await? else {
            return Ok(None);
        };
        let Some((_, dono)) = Imovel::resolve(uow, unidade.imovel_id).await? else {
            return Ok(None);
        };
        Ok(Some((unidade, dono)))
    }
}

#[async_trait]
impl Recurso for Locatario {
    const NAO_ENCONTRADO: &'static str = "Locatário não encontrado";
    const SEM_PERMISSAO: &'static str = "Você não tem permissão para acessar este locatário";

    async fn resolve(
        uow: &mut dyn UnitOfWork,
        id: Uuid,
    ) -> Result<Option<(Self, Uuid)>, AppError> {
        let Some(locatario) = uow.find_locatario(id).await? else {
            return Ok(None);
        };
        let Some((_, dono)) = Unidade::resolve(uow, locatario.unidade_id).await? else {
            return Ok(None);
        };
        Ok(Some((locatario, dono)))
    }
}

/// Verificação pura: não escreve nada.
pub async fn authorize<R: Recurso>(
    uow: &mut dyn UnitOfWork,
    id: Uuid,
    principal_id: Uuid,
) -> Result<R, AppError> {
    match R::resolve(uow, id).await? {
        None => Err(AppError::NotFound(R::NAO_ENCONTRADO)),
        Some((_, dono)) if dono != principal_id => {
            tracing::warn!(%id, %principal_id, "acesso negado a recurso de outro usuário");
            Err(AppError::Forbidden(R::SEM_PERMISSAO))
        }
        Some((recurso, _)) => Ok(recurso),
    }
}
