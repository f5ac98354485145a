use std::sync::Arc;

use catalogue_async::{CatalogueConfig, CatalogueError, Client, CredentialSource, StaticToken};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn unauthorized_evicts_token_before_returning() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let source = Arc::new(StaticToken::new("expired"));
    let config = CatalogueConfig::new()
        .with_api_base(server.uri())
        .with_credentials(Arc::clone(&source) as Arc<dyn CredentialSource>);
    let client = Client::with_config(config);

    let err = client.users().me().await.unwrap_err();
    assert!(matches!(err, CatalogueError::Unauthorized));
    assert!(err.is_unauthorized());
    assert!(!source.is_present());
}

#[tokio::test]
async fn me_parses_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": 42,
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "active": true,
            "team_name": "platform",
            "role_name": "ADMIN"
        })))
        .mount(&server)
        .await;

    let client = Client::with_config(
        CatalogueConfig::new()
            .with_api_base(server.uri())
            .with_bearer_token("good"),
    );

    let user = client.users().me().await.unwrap();
    assert_eq!(user.user_id, 42);
    assert_eq!(user.display_name(), "Grace Hopper");
    assert_eq!(user.role_name.as_str(), "ADMIN");
}

#[tokio::test]
async fn is_admin_parses_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admins/is-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"is_admin": true, "email": "grace@example.com"}),
        ))
        .mount(&server)
        .await;

    let client = Client::with_config(
        CatalogueConfig::new()
            .with_api_base(server.uri())
            .with_bearer_token("good"),
    );

    let check = client.admins().is_admin().await.unwrap();
    assert!(check.is_admin);
    assert_eq!(check.email.as_deref(), Some("grace@example.com"));
}
