//! HTTP API tests driving the router directly

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sunops_common::GlobalPricingConfig;
use sunops_finance::Finance;
use sunops_server::{router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Finance::in_memory(GlobalPricingConfig::default())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn tabela_2025() -> Value {
    json!({
        "nome": "Tabela 2025",
        "data_vigencia_inicio": "2025-01-01",
        "data_vigencia_fim": "2025-12-31",
        "faixas": [
            { "nome_faixa": "Até 5 kW", "potencia_min": 0, "potencia_max": 5, "preco_unitario": "2.80" },
            { "nome_faixa": "5 a 10 kW", "potencia_min": 5, "potencia_max": 10, "preco_unitario": "2.50" }
        ],
        "regioes": [ { "regiao": "SP", "aliquota_imposto": "0.18" } ]
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();
    for uri in ["/", "/health"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn test_calculate_price_end_to_end() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/financeiro/premissas", Some(tabela_2025())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/financeiro/calcular-preco",
        Some(json!({ "potencia_kw": "5.5", "regiao": "SP", "data": "2025-03-10" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["premissa_usada_id"], 1);
    assert_eq!(body["faixa_aplicada_nome"], "5 a 10 kW");
    assert_eq!(decimal(&body["preco_base"]), dec!(13750));
    assert_eq!(decimal(&body["imposto_valor"]), dec!(3093.75));
    assert_eq!(decimal(&body["preco_final"]), dec!(20281.25));
    assert_eq!(body["detalhes"]["resolucao"], "automatica_por_data");
}

#[tokio::test]
async fn test_pricing_errors_map_to_status_codes() {
    let app = app();
    send(&app, Method::POST, "/financeiro/premissas", Some(tabela_2025())).await;

    let cases = [
        (json!({ "potencia_kw": 3, "regiao": "AM", "data": "2025-03-10" }), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({ "potencia_kw": 3, "regiao": "SP", "data": "2030-01-01" }), StatusCode::NOT_FOUND),
        (json!({ "potencia_kw": 3, "regiao": "SP", "data": "2025-03-10", "premissa_id": 42 }), StatusCode::NOT_FOUND),
        (json!({ "potencia_kw": 0, "regiao": "SP", "data": "2025-03-10" }), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({ "potencia_kw": 3, "regiao": "SP", "data": "2025-03-10", "margem_lucro_override": 1.5 }), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({ "regiao": "SP", "data": "2025-03-10" }), StatusCode::UNPROCESSABLE_ENTITY),
    ];

    for (request, expected) in cases {
        let (status, body) = send(&app, Method::POST, "/financeiro/calcular-preco", Some(request)).await;
        assert_eq!(status, expected);
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_overflowing_power_is_unprocessable() {
    let app = app();
    send(&app, Method::POST, "/financeiro/premissas", Some(tabela_2025())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/financeiro/calcular-preco",
        Some(json!({ "potencia_kw": "50000000000000000000000000", "regiao": "SP", "data": "2025-03-10" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Valores da requisição excedem o limite de cálculo");
}

#[tokio::test]
async fn test_premissa_crud() {
    let app = app();
    send(&app, Method::POST, "/financeiro/premissas", Some(tabela_2025())).await;

    let mut changed = tabela_2025();
    changed["nome"] = json!("Tabela 2025 revisada");
    let (status, body) = send(&app, Method::PUT, "/financeiro/premissas/1", Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "Tabela 2025 revisada");

    let (status, list) = send(&app, Method::GET, "/financeiro/premissas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/financeiro/premissas/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/financeiro/premissas/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Premissa 1 não encontrada");
}

#[tokio::test]
async fn test_overlapping_tiers_rejected() {
    let app = app();
    let mut bad = tabela_2025();
    bad["faixas"][1]["potencia_min"] = json!(4);

    let (status, body) = send(&app, Method::POST, "/financeiro/premissas", Some(bad)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("sobrepõem"));
}

#[tokio::test]
async fn test_global_config_roundtrip() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/financeiro/configuracoes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(decimal(&body["margem_lucro_padrao"]), dec!(0.20));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/financeiro/configuracoes",
        Some(json!({ "margem_lucro_padrao": "0.25", "percentual_comissao_padrao": "0.04" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["margem_lucro_padrao"]), dec!(0.25));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/financeiro/configuracoes",
        Some(json!({ "margem_lucro_padrao": "-0.1", "percentual_comissao_padrao": "0.04" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_ledger_flow() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/financeiro/transacoes",
        Some(json!({
            "descricao": "Inversor",
            "valor": "4500.00",
            "tipo": "custo_equipamento",
            "data_vencimento": "2020-01-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pendente");

    let (status, overdue) = send(&app, Method::GET, "/financeiro/transacoes/vencidas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overdue[0]["status"], "atrasada");

    // Still listed on a second pass
    let (_, overdue) = send(&app, Method::GET, "/financeiro/transacoes/vencidas", None).await;
    assert_eq!(overdue.as_array().unwrap().len(), 1);

    let (status, paid) = send(&app, Method::POST, "/financeiro/transacoes/1/marcar-pago", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paga");
    assert!(paid["data_pagamento"].is_string());

    let (status, _) = send(&app, Method::POST, "/financeiro/transacoes/1/marcar-pago", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/financeiro/transacoes/99/marcar-pago", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, Method::GET, "/financeiro/transacoes", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_unprocessable() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/financeiro/transacoes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
