// src/services/fixtures.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::{MemoryStore, Store},
    models::{
        imovel::ImovelPayload,
        locatario::LocatarioDados,
        unidade::{StatusUnidade, UnidadeDados},
    },
    services::{
        imovel_service::ImovelService, locatario_service::LocatarioService,
        unidade_service::UnidadeService,
    },
};

/// Dois usuários (A e B) e um imóvel de A, sobre um [`MemoryStore`].
pub struct Cenario {
    pub store: MemoryStore,
    pub imoveis: ImovelService,
    pub unidades: UnidadeService,
    pub locatarios: LocatarioService,
    pub usuario_a: Uuid,
    pub usuario_b: Uuid,
    pub imovel_a: Uuid,
}

impl Cenario {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let shared: Arc<dyn Store> = Arc::new(store.clone());

        // Usuários direto no armazenamento, sem bcrypt
        let (usuario_a, usuario_b) = {
            let mut uow = store.begin().await.unwrap();
            let a = uow.insert_usuario("A", "a@x.com", "hash").await.unwrap();
            let b = uow.insert_usuario("B", "b@x.com", "hash").await.unwrap();
            uow.commit().await.unwrap();
            (a.id, b.id)
        };

        let mut c = Self {
            imoveis: ImovelService::new(shared.clone()),
            unidades: UnidadeService::new(shared.clone()),
            locatarios: LocatarioService::new(shared),
            store,
            usuario_a,
            usuario_b,
            imovel_a: Uuid::nil(),
        };
        c.imovel_a = c.imovel(usuario_a, "P1").await;
        c
    }

    pub async fn imovel(&self, usuario_id: Uuid, nome: &str) -> Uuid {
        let dados = ImovelPayload {
            nome: nome.into(),
            endereco: "Rua das Flores, 10".into(),
            cidade: "Recife".into(),
            estado: "PE".into(),
            cep: None,
        };
        self.imoveis.create_imovel(usuario_id, &dados).await.unwrap().id
    }

    pub async fn count_locatarios(&self) -> usize {
        self.store.total_locatarios().await
    }

    /// "alugado" se e somente se a unidade tem locatário.
    pub async fn assert_occupancy_invariant(&self) {
        for (unidade, locatario) in self.store.ocupacao().await {
            assert_eq!(
                unidade.status == StatusUnidade::Alugado,
                locatario.is_some(),
                "unidade {} com status {:?}",
                unidade.numero,
                unidade.status
            );
        }
    }
}

pub fn dados_unidade(numero: &str) -> UnidadeDados {
    UnidadeDados {
        numero: numero.into(),
        valor_aluguel: Decimal::from(1000),
    }
}

pub fn dados_locatario(nome: &str) -> LocatarioDados {
    LocatarioDados {
        nome: nome.into(),
        cpf: "123.456.789-00".into(),
        telefone: None,
        email: None,
        data_inicio_contrato: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        data_fim_contrato: None,
    }
}
