// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sistema de Gerenciamento de Aluguéis",
        description = "API REST para gerenciar imóveis, unidades e locatários",
        version = "1.0.0"
    ),
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::delete_me,

        // --- Imóveis ---
        handlers::imoveis::list_imoveis,
        handlers::imoveis::get_imovel,
        handlers::imoveis::create_imovel,
        handlers::imoveis::update_imovel,
        handlers::imoveis::delete_imovel,
        handlers::imoveis::buscar_cep,

        // --- Unidades ---
        handlers::unidades::create_unidade,
        handlers::unidades::get_unidade,
        handlers::unidades::update_unidade,
        handlers::unidades::delete_unidade,

        // --- Locatários ---
        handlers::locatarios::create_locatario,
        handlers::locatarios::get_locatario,
        handlers::locatarios::update_locatario,
        handlers::locatarios::delete_locatario,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Usuario,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::TokenResponse,

            // --- Imóveis ---
            models::imovel::Imovel,
            models::imovel::ImovelPayload,
            models::imovel::ImovelDetalhado,
            models::endereco::Endereco,

            // --- Unidades ---
            models::unidade::StatusUnidade,
            models::unidade::Unidade,
            models::unidade::UnidadeDados,
            models::unidade::CreateUnidadePayload,
            models::unidade::UnidadeDetalhada,

            // --- Locatários ---
            models::locatario::Locatario,
            models::locatario::LocatarioDados,
            models::locatario::CreateLocatarioPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Imoveis", description = "Gestão de Imóveis e busca de CEP"),
        (name = "Unidades", description = "Unidades de cada imóvel"),
        (name = "Locatarios", description = "Locatários e ocupação das unidades")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
