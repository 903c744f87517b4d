#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardapio_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn category_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id_categoria": id,
        "id_empresa": 7,
        "nome_categoria": name,
        "ativo": 1,
        "data_cadastrou": "2024-06-15T10:30:00Z",
        "data_update": null,
        "icon": "Lucid"
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": {
                "id": 1,
                "email": "admin@example.com",
                "name": "Admin",
                "empresaId": 7,
                "role": 1
            }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter22".to_string().into();
    let reply = client.login("admin@example.com", &secret).await.unwrap();

    assert_eq!(reply.token, "tok-123");
    assert_eq!(reply.user.organization_id, 7);
    assert_eq!(reply.user.email, "admin@example.com");
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid credentials"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrongpass".to_string().into();
    let result = client.login("bad@x.com", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("invalid credentials"),
                "expected server message, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_malformed_reply() {
    let (server, client) = setup().await;

    // 2xx but missing the `user` object — must not become a session.
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-123"})))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter22".to_string().into();
    let result = client.login("admin@example.com", &secret).await;

    assert!(
        matches!(result, Err(Error::MalformedResponse { .. })),
        "expected MalformedResponse, got: {result:?}"
    );
}

// ── Category tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_categories() {
    let (server, client) = setup().await;

    let envelope = json!({
        "status": true,
        "resultado": [category_json(1, "Pizzas"), category_json(2, "Bebidas")]
    });

    Mock::given(method("GET"))
        .and(path("/categoria/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let categories = client.list_categories(7).await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, 1);
    assert_eq!(categories[0].name, "Pizzas");
    assert_eq!(categories[0].active, 1);
    assert_eq!(categories[1].name, "Bebidas");
}

#[tokio::test]
async fn test_list_missing_resultado_is_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/categoria/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
        .mount(&server)
        .await;

    let result = client.list_categories(7).await;

    assert!(
        matches!(result, Err(Error::MalformedResponse { .. })),
        "expected MalformedResponse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_envelope_status_false_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/categoria/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": false, "resultado": []})),
        )
        .mount(&server)
        .await;

    let result = client.list_categories(7).await;

    assert!(
        matches!(result, Err(Error::Api { .. })),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/categoria/7"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": true, "resultado": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_token("tok-123".to_string().into());
    client.list_categories(7).await.unwrap();
}

#[tokio::test]
async fn test_create_category_carries_organization() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/categoria"))
        .and(body_json(json!({
            "nome_categoria": "Sobremesas",
            "ativo": 1,
            "icon": "Lucid",
            "id_empresa": 7
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let body = cardapio_api::models::CategoryBody {
        name: "Sobremesas".into(),
        active: 1,
        icon: "Lucid".into(),
        organization_id: Some(7),
    };
    client.create_category(&body).await.unwrap();
}

// ── Product tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_product_wire_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/produto/7"))
        .and(body_json(json!({
            "nome_produto": "Pizza",
            "id_categoria": 1,
            "valor": 45.9,
            "descricao": "desc"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let body = cardapio_api::models::CreateProductBody {
        name: "Pizza".into(),
        category_id: 1,
        price: 45.9,
        description: "desc".into(),
    };
    client.create_product(7, &body).await.unwrap();
}

#[tokio::test]
async fn test_update_product_skips_absent_fields() {
    let (server, client) = setup().await;

    // Only `valor` is set; the body must contain nothing else.
    Mock::given(method("PUT"))
        .and(path("/produto/12"))
        .and(body_json(json!({"valor": 52.0})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let patch = cardapio_api::models::ProductPatchBody {
        price: Some(52.0),
        ..Default::default()
    };
    client.update_product(12, &patch).await.unwrap();
}

#[tokio::test]
async fn test_list_products_with_nested_category() {
    let (server, client) = setup().await;

    let envelope = json!({
        "status": true,
        "resultado": [{
            "id_produto": 12,
            "id_empresa": 7,
            "id_categoria": 1,
            "nome_produto": "Pizza Margherita",
            "valor": 45.9,
            "ativo": 1,
            "data_cadastrou": "2024-06-15T10:30:00Z",
            "descricao": "Tomate e manjericão",
            "categoria": category_json(1, "Pizzas")
        }]
    });

    Mock::given(method("GET"))
        .and(path("/produto/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let products = client.list_products(7).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pizza Margherita");
    assert!((products[0].price - 45.9).abs() < f64::EPSILON);
    assert_eq!(
        products[0].category.as_ref().map(|c| c.name.as_str()),
        Some("Pizzas")
    );
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_missing_product_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/produto/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "produto não encontrado"})),
        )
        .mount(&server)
        .await;

    let result = client.delete_product(99).await;

    match result {
        Err(ref err @ Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("não encontrado"));
            assert!(err.is_not_found());
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_distinct() {
    // No server listening on this port.
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1/").unwrap(),
    );

    let result = client.list_categories(7).await;

    match result {
        Err(ref err @ Error::Transport(_)) => assert!(err.is_transport()),
        other => panic!("expected Transport error, got: {other:?}"),
    }
}
