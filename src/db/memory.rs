// src/db/memory.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Store, UnitOfWork},
    models::{
        auth::Usuario,
        imovel::{Imovel, ImovelPayload},
        locatario::{Locatario, LocatarioDados},
        unidade::{StatusUnidade, Unidade, UnidadeDados},
    },
};

#[derive(Debug, Default, Clone)]
struct Tabelas {
    usuarios: HashMap<Uuid, Usuario>,
    imoveis: HashMap<Uuid, Imovel>,
    unidades: HashMap<Uuid, Unidade>,
    locatarios: HashMap<Uuid, Locatario>,
}

impl Tabelas {
    fn cascade_imovel(&mut self, imovel_id: Uuid) {
        let unidades: Vec<Uuid> = self
            .unidades
            .values()
            .filter(|u| u.imovel_id == imovel_id)
            .map(|u| u.id)
            .collect();
        for unidade_id in unidades {
            self.cascade_unidade(unidade_id);
        }
        self.imoveis.remove(&imovel_id);
    }

    fn cascade_unidade(&mut self, unidade_id: Uuid) {
        self.locatarios.retain(|_, l| l.unidade_id != unidade_id);
        self.unidades.remove(&unidade_id);
    }
}

/// Armazenamento em memória com as mesmas garantias do Postgres.
///
/// Uma unidade de trabalho segura o lock das tabelas do `begin` ao `commit`,
/// então as transações são serializadas. As escritas vão para uma cópia
/// que só substitui as tabelas no `commit`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tabelas: Arc<Mutex<Tabelas>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cada unidade confirmada junto com o seu locatário, se houver.
    #[cfg(test)]
    pub(crate) async fn ocupacao(&self) -> Vec<(Unidade, Option<Locatario>)> {
        let tabelas = self.tabelas.lock().await;
        tabelas
            .unidades
            .values()
            .map(|u| {
                let locatario = tabelas
                    .locatarios
                    .values()
                    .find(|l| l.unidade_id == u.id)
                    .cloned();
                (u.clone(), locatario)
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) async fn total_locatarios(&self) -> usize {
        self.tabelas.lock().await.locatarios.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        let guard = self.tabelas.clone().lock_owned().await;
        let rascunho = (*guard).clone();
        Ok(Box::new(MemoryUnitOfWork { guard, rascunho }))
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<Tabelas>,
    rascunho: Tabelas,
}

fn missing_row() -> AppError {
    AppError::DatabaseError(sqlx::Error::RowNotFound)
}

fn missing_parent(tabela: &str) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!(
        "violação de chave estrangeira: {} inexistente",
        tabela
    ))
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn insert_usuario(
        &mut self,
        nome: &str,
        email: &str,
        senha_hash: &str,
    ) -> Result<Usuario, AppError> {
        if self.rascunho.usuarios.values().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let usuario = Usuario {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            email: email.to_string(),
            senha_hash: senha_hash.to_string(),
            created_at: Utc::now(),
        };
        self.rascunho.usuarios.insert(usuario.id, usuario.clone());
        Ok(usuario)
    }

    async fn find_usuario_by_email(&mut self, email: &str) -> Result<Option<Usuario>, AppError> {
        Ok(self
            .rascunho
            .usuarios
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn delete_usuario(&mut self, id: Uuid) -> Result<(), AppError> {
        let imoveis: Vec<Uuid> = self
            .rascunho
            .imoveis
            .values()
            .filter(|i| i.usuario_id == id)
            .map(|i| i.id)
            .collect();
        for imovel_id in imoveis {
            self.rascunho.cascade_imovel(imovel_id);
        }
        self.rascunho.usuarios.remove(&id);
        Ok(())
    }

    async fn list_imoveis(&mut self, usuario_id: Uuid) -> Result<Vec<Imovel>, AppError> {
        let mut imoveis: Vec<Imovel> = self
            .rascunho
            .imoveis
            .values()
            .filter(|i| i.usuario_id == usuario_id)
            .cloned()
            .collect();
        imoveis.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(imoveis)
    }

    async fn find_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError> {
        Ok(self.rascunho.imoveis.get(&id).cloned())
    }

    async fn lock_imovel(&mut self, id: Uuid) -> Result<Option<Imovel>, AppError> {
        // A transação inteira já é exclusiva.
        self.find_imovel(id).await
    }

    async fn insert_imovel(
        &mut self,
        usuario_id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        if !self.rascunho.usuarios.contains_key(&usuario_id) {
            return Err(missing_parent("usuario"));
        }
        let imovel = Imovel {
            id: Uuid::new_v4(),
            nome: dados.nome.clone(),
            endereco: dados.endereco.clone(),
            cidade: dados.cidade.clone(),
            estado: dados.estado.clone(),
            cep: dados.cep.clone(),
            usuario_id,
        };
        self.rascunho.imoveis.insert(imovel.id, imovel.clone());
        Ok(imovel)
    }

    async fn replace_imovel(
        &mut self,
        id: Uuid,
        dados: &ImovelPayload,
    ) -> Result<Imovel, AppError> {
        let imovel = self.rascunho.imoveis.get_mut(&id).ok_or_else(missing_row)?;
        imovel.nome = dados.nome.clone();
        imovel.endereco = dados.endereco.clone();
        imovel.cidade = dados.cidade.clone();
        imovel.estado = dados.estado.clone();
        imovel.cep = dados.cep.clone();
        Ok(imovel.clone())
    }

    async fn delete_imovel(&mut self, id: Uuid) -> Result<(), AppError> {
        self.rascunho.cascade_imovel(id);
        Ok(())
    }

    async fn list_unidades(&mut self, imovel_id: Uuid) -> Result<Vec<Unidade>, AppError> {
        let mut unidades: Vec<Unidade> = self
            .rascunho
            .unidades
            .values()
            .filter(|u| u.imovel_id == imovel_id)
            .cloned()
            .collect();
        unidades.sort_by(|a, b| a.numero.cmp(&b.numero));
        Ok(unidades)
    }

    async fn find_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError> {
        Ok(self.rascunho.unidades.get(&id).cloned())
    }

    async fn lock_unidade(&mut self, id: Uuid) -> Result<Option<Unidade>, AppError> {
        self.find_unidade(id).await
    }

    async fn find_unidade_by_numero(
        &mut self,
        imovel_id: Uuid,
        numero: &str,
    ) -> Result<Option<Unidade>, AppError> {
        Ok(self
            .rascunho
            .unidades
            .values()
            .find(|u| u.imovel_id == imovel_id && u.numero == numero)
            .cloned())
    }

    async fn insert_unidade(
        &mut self,
        imovel_id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        if !self.rascunho.imoveis.contains_key(&imovel_id) {
            return Err(missing_parent("imovel"));
        }
        if self
            .rascunho
            .unidades
            .values()
            .any(|u| u.imovel_id == imovel_id && u.numero == dados.numero)
        {
            return Err(AppError::UnitNumberAlreadyExists(dados.numero.clone()));
        }
        let unidade = Unidade {
            id: Uuid::new_v4(),
            imovel_id,
            numero: dados.numero.clone(),
            valor_aluguel: dados.valor_aluguel,
            status: StatusUnidade::Disponivel,
        };
        self.rascunho.unidades.insert(unidade.id, unidade.clone());
        Ok(unidade)
    }

    async fn replace_unidade(
        &mut self,
        id: Uuid,
        dados: &UnidadeDados,
    ) -> Result<Unidade, AppError> {
        let imovel_id = self
            .rascunho
            .unidades
            .get(&id)
            .map(|u| u.imovel_id)
            .ok_or_else(missing_row)?;
        if self
            .rascunho
            .unidades
            .values()
            .any(|u| u.id != id && u.imovel_id == imovel_id && u.numero == dados.numero)
        {
            return Err(AppError::UnitNumberAlreadyExists(dados.numero.clone()));
        }
        let unidade = self.rascunho.unidades.get_mut(&id).ok_or_else(missing_row)?;
        unidade.numero = dados.numero.clone();
        unidade.valor_aluguel = dados.valor_aluguel;
        Ok(unidade.clone())
    }

    async fn set_unidade_status(
        &mut self,
        id: Uuid,
        status: StatusUnidade,
    ) -> Result<Unidade, AppError> {
        let unidade = self.rascunho.unidades.get_mut(&id).ok_or_else(missing_row)?;
        unidade.status = status;
        Ok(unidade.clone())
    }

    async fn delete_unidade(&mut self, id: Uuid) -> Result<(), AppError> {
        self.rascunho.cascade_unidade(id);
        Ok(())
    }

    async fn find_locatario(&mut self, id: Uuid) -> Result<Option<Locatario>, AppError> {
        Ok(self.rascunho.locatarios.get(&id).cloned())
    }

    async fn find_locatario_by_unidade(
        &mut self,
        unidade_id: Uuid,
    ) -> Result<Option<Locatario>, AppError> {
        Ok(self
            .rascunho
            .locatarios
            .values()
            .find(|l| l.unidade_id == unidade_id)
            .cloned())
    }

    async fn insert_locatario(
        &mut self,
        unidade_id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        if !self.rascunho.unidades.contains_key(&unidade_id) {
            return Err(missing_parent("unidade"));
        }
        if self
            .rascunho
            .locatarios
            .values()
            .any(|l| l.unidade_id == unidade_id)
        {
            return Err(AppError::UnitAlreadyOccupied);
        }
        let locatario = Locatario {
            id: Uuid::new_v4(),
            unidade_id,
            nome: dados.nome.clone(),
            cpf: dados.cpf.clone(),
            telefone: dados.telefone.clone(),
            email: dados.email.clone(),
            data_inicio_contrato: dados.data_inicio_contrato,
            data_fim_contrato: dados.data_fim_contrato,
        };
        self.rascunho.locatarios.insert(locatario.id, locatario.clone());
        Ok(locatario)
    }

    async fn replace_locatario(
        &mut self,
        id: Uuid,
        dados: &LocatarioDados,
    ) -> Result<Locatario, AppError> {
        let locatario = self.rascunho.locatarios.get_mut(&id).ok_or_else(missing_row)?;
        locatario.nome = dados.nome.clone();
        locatario.cpf = dados.cpf.clone();
        locatario.telefone = dados.telefone.clone();
        locatario.email = dados.email.clone();
        locatario.data_inicio_contrato = dados.data_inicio_contrato;
        locatario.data_fim_contrato = dados.data_fim_contrato;
        Ok(locatario.clone())
    }

    async fn delete_locatario(&mut self, id: Uuid) -> Result<(), AppError> {
        self.rascunho.locatarios.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryUnitOfWork { mut guard, rascunho } = *self;
        *guard = rascunho;
        Ok(())
    }
}
