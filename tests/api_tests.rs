mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

// ─── Infra ───────────────────────────────────────────────────────────

#[tokio::test]
async fn health_root_and_openapi_are_public() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API de Gerenciamento de Aluguéis");

    let (status, body) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/locatarios"].is_object());
}

// ─── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_returns_user_without_hash() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/auth/registro",
            None,
            json!({ "nome": "Ana", "email": "a@x.com", "senha": "senha123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("senha_hash").is_none());
    assert!(body.get("senha").is_none());
}

#[tokio::test]
async fn duplicate_email_is_400() {
    let app = TestApp::new();
    app.user("a@x.com").await;
    let (status, body) = app
        .post(
            "/api/auth/registro",
            None,
            json!({ "nome": "Outra", "email": "a@x.com", "senha": "outra123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email já cadastrado");
}

#[tokio::test]
async fn invalid_registration_lists_field_errors() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/auth/registro",
            None,
            json!({ "nome": "Ana", "email": "nao-e-email", "senha": "123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["senha"].is_array());
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let app = TestApp::new();
    app.user("a@x.com").await;
    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "a@x.com", "senha": "errada" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Email ou senha incorretos");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/imoveis", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/imoveis", Some("nao.e.um.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.user("a@x.com").await;
    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
}

#[tokio::test]
async fn deleting_the_account_cascades_and_revokes_the_token() {
    let app = TestApp::new();
    let token = app.user("a@x.com").await;
    let imovel = app.imovel(&token, "P1").await;

    let (status, _) = app.delete("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);

    // O token ainda é válido, mas o usuário não existe mais
    let (status, _) = app.get(&format!("/api/imoveis/{imovel}"), Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // O e-mail fica livre de novo e o imóvel antigo não aparece
    let token = app.user("a@x.com").await;
    let (_, lista) = app.get("/api/imoveis", Some(&token)).await;
    assert_eq!(lista, json!([]));
}

// ─── Imóveis ─────────────────────────────────────────────────────────

#[tokio::test]
async fn properties_are_listed_per_owner() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let b = app.user("b@x.com").await;
    app.imovel(&a, "P1").await;
    app.imovel(&a, "P2").await;
    app.imovel(&b, "PB").await;

    let (status, lista) = app.get("/api/imoveis", Some(&a)).await;
    assert_eq!(status, StatusCode::OK);
    let nomes: Vec<&str> = lista
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, vec!["P1", "P2"]);
}

#[tokio::test]
async fn property_replace_is_full_and_omitted_cep_is_cleared() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let imovel = app.imovel(&a, "P1").await;

    let (status, body) = app
        .put(
            &format!("/api/imoveis/{imovel}"),
            &a,
            json!({ "nome": "P1 Reformado", "endereco": "Av. Central, 1", "cidade": "Natal", "estado": "RN" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "P1 Reformado");
    assert_eq!(body["cep"], serde_json::Value::Null);
}

#[tokio::test]
async fn foreign_property_is_403_and_missing_is_404() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let b = app.user("b@x.com").await;
    let imovel = app.imovel(&a, "P1").await;
    let path = format!("/api/imoveis/{imovel}");

    let (status, _) = app.get(&path, Some(&b)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&path, &b).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .put(
            &path,
            &b,
            json!({ "nome": "Tomado", "endereco": "Rua B, 2", "cidade": "Natal", "estado": "RN" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .get("/api/imoveis/8a6e0804-2bd0-4672-b79d-d97027f9071a", Some(&a))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Imóvel não encontrado");

    // Ainda existe para o dono, sem alteração
    let (status, body) = app.get(&path, Some(&a)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "P1");
    assert_eq!(body["cidade"], "São Paulo");
}

// ─── Unidades e locatários ───────────────────────────────────────────

#[tokio::test]
async fn occupancy_scenario_end_to_end() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let imovel = app.imovel(&a, "P1").await;

    // U1 nasce disponível
    let (status, u1) = app.unidade(&a, &imovel, "101").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(u1["status"], "disponivel");
    let u1_id = u1["id"].as_str().unwrap().to_string();

    // Mesmo número no mesmo imóvel
    let (status, body) = app.unidade(&a, &imovel, "101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("101"));

    // T1 ocupa U1
    let (status, t1) = app.locatario(&a, &u1_id, "T1").await;
    assert_eq!(status, StatusCode::OK);
    let t1_id = t1["id"].as_str().unwrap().to_string();
    let (_, unidade) = app.get(&format!("/api/unidades/{u1_id}"), Some(&a)).await;
    assert_eq!(unidade["status"], "alugado");
    assert_eq!(unidade["locatario"]["id"], t1_id.as_str());

    // Um segundo locatário não entra
    let (status, body) = app.locatario(&a, &u1_id, "T2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Esta unidade já possui um locatário");

    // Detalhe do imóvel mostra a unidade alugada com o locatário
    let (_, detalhe) = app.get(&format!("/api/imoveis/{imovel}"), Some(&a)).await;
    assert_eq!(detalhe["unidades"][0]["status"], "alugado");
    assert_eq!(detalhe["unidades"][0]["locatario"]["nome"], "T1");

    // Sai T1, U1 volta a ficar disponível
    let (status, body) = app.delete(&format!("/api/locatarios/{t1_id}"), &a).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Locatário removido com sucesso");
    let (_, unidade) = app.get(&format!("/api/unidades/{u1_id}"), Some(&a)).await;
    assert_eq!(unidade["status"], "disponivel");
    assert_eq!(unidade["locatario"], serde_json::Value::Null);

    let (status, _) = app.get(&format!("/api/locatarios/{t1_id}"), Some(&a)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn another_owner_cannot_touch_units_or_tenants() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let b = app.user("b@x.com").await;
    let imovel = app.imovel(&a, "P1").await;
    let (_, u1) = app.unidade(&a, &imovel, "101").await;
    let u1_id = u1["id"].as_str().unwrap().to_string();
    let (_, t1) = app.locatario(&a, &u1_id, "T1").await;
    let t1_id = t1["id"].as_str().unwrap().to_string();

    let (status, _) = app.get(&format!("/api/unidades/{u1_id}"), Some(&b)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.unidade(&b, &imovel, "999").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.locatario(&b, &u1_id, "Intruso").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&format!("/api/locatarios/{t1_id}"), Some(&b)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&format!("/api/locatarios/{t1_id}"), &b).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Para o dono nada mudou
    let (_, unidade) = app.get(&format!("/api/unidades/{u1_id}"), Some(&a)).await;
    assert_eq!(unidade["status"], "alugado");
    assert_eq!(unidade["locatario"]["nome"], "T1");
}

#[tokio::test]
async fn tenant_replace_is_full_and_keeps_the_unit_occupied() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let b = app.user("b@x.com").await;
    let imovel = app.imovel(&a, "P1").await;
    let (_, u1) = app.unidade(&a, &imovel, "101").await;
    let u1_id = u1["id"].as_str().unwrap().to_string();
    let (_, t1) = app.locatario(&a, &u1_id, "T1").await;
    let path = format!("/api/locatarios/{}", t1["id"].as_str().unwrap());

    let (status, body) = app
        .put(
            &path,
            &a,
            json!({
                "nome": "T1 Silva",
                "cpf": "987.654.321-00",
                "telefone": "81 99999-0000",
                "data_inicio_contrato": "2025-02-01",
                "data_fim_contrato": "2026-01-31"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "T1 Silva");
    assert_eq!(body["telefone"], "81 99999-0000");
    assert_eq!(body["unidade_id"], u1_id.as_str());

    // Campos omitidos são limpos
    let (status, body) = app
        .put(
            &path,
            &a,
            json!({ "nome": "T1 Silva", "cpf": "987.654.321-00", "data_inicio_contrato": "2025-02-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["telefone"], serde_json::Value::Null);
    assert_eq!(body["data_fim_contrato"], serde_json::Value::Null);

    let (status, _) = app
        .put(
            &path,
            &b,
            json!({ "nome": "Intruso", "cpf": "1", "data_inicio_contrato": "2025-02-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, unidade) = app.get(&format!("/api/unidades/{u1_id}"), Some(&a)).await;
    assert_eq!(unidade["status"], "alugado");
    assert_eq!(unidade["locatario"]["nome"], "T1 Silva");
}

#[tokio::test]
async fn unit_update_ignores_status_and_rechecks_numero() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let imovel = app.imovel(&a, "P1").await;
    let (_, u1) = app.unidade(&a, &imovel, "101").await;
    app.unidade(&a, &imovel, "102").await;
    let u1_id = u1["id"].as_str().unwrap().to_string();
    let path = format!("/api/unidades/{u1_id}");

    let (status, body) = app
        .put(&path, &a, json!({ "numero": "101", "valor_aluguel": 2000, "status": "alugado" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "disponivel");
    assert_eq!(body["valor_aluguel"].as_f64(), Some(2000.0));

    let (status, _) = app
        .put(&path, &a, json!({ "numero": "102", "valor_aluguel": 2000 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_unit_and_tenant_payloads_are_400() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let imovel = app.imovel(&a, "P1").await;

    let (status, body) = app
        .post(
            "/api/unidades",
            Some(&a),
            json!({ "imovel_id": imovel, "numero": "1", "valor_aluguel": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["valor_aluguel"].is_array());

    // Não cabe em NUMERIC(12, 2)
    for valor in [json!(0.001), json!(10_000_000_000.0)] {
        let (status, body) = app
            .post(
                "/api/unidades",
                Some(&a),
                json!({ "imovel_id": imovel, "numero": "2", "valor_aluguel": valor }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "valor {valor}");
        assert!(body["details"]["valor_aluguel"].is_array());
    }

    let (_, u1) = app.unidade(&a, &imovel, "101").await;
    let (status, _) = app
        .post(
            "/api/locatarios",
            Some(&a),
            json!({
                "unidade_id": u1["id"],
                "nome": "T1",
                "cpf": "1",
                "data_inicio_contrato": "2025-06-01",
                "data_fim_contrato": "2025-05-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A unidade continua livre
    let (_, unidade) = app
        .get(&format!("/api/unidades/{}", u1["id"].as_str().unwrap()), Some(&a))
        .await;
    assert_eq!(unidade["status"], "disponivel");
}

#[tokio::test]
async fn deleting_a_property_cascades_over_http() {
    let app = TestApp::new();
    let a = app.user("a@x.com").await;
    let imovel = app.imovel(&a, "P1").await;
    let (_, u1) = app.unidade(&a, &imovel, "101").await;
    let u1_id = u1["id"].as_str().unwrap().to_string();
    let (_, t1) = app.locatario(&a, &u1_id, "T1").await;
    let t1_id = t1["id"].as_str().unwrap().to_string();

    let (status, body) = app.delete(&format!("/api/imoveis/{imovel}"), &a).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Imóvel deletado com sucesso");

    let (status, _) = app.get(&format!("/api/unidades/{u1_id}"), Some(&a)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/locatarios/{t1_id}"), Some(&a)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── CEP ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn cep_lookup_is_public_and_echoes_the_input() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/imoveis/buscar-cep/01001-000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endereco"], "Praça da Sé");
    assert_eq!(body["bairro"], "Sé");
    assert_eq!(body["cidade"], "São Paulo");
    assert_eq!(body["estado"], "SP");
    assert_eq!(body["cep"], "01001-000");
}

#[tokio::test]
async fn unknown_malformed_or_unreachable_cep_is_404() {
    let app = TestApp::new();
    for cep in ["00000000", "123", "99999999"] {
        let (status, body) = app
            .get(&format!("/api/imoveis/buscar-cep/{cep}"), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "cep {cep}");
        assert_eq!(body["error"], "CEP não encontrado");
    }
}
