use catalogue_async::types::SearchParams;
use catalogue_async::{CatalogueConfig, Client};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<CatalogueConfig> {
    Client::with_config(
        CatalogueConfig::new()
            .with_api_base(server.uri())
            .with_bearer_token("t"),
    )
}

#[tokio::test]
async fn ai_search_sends_query_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ai-search"))
        .and(query_param("q", "trade data"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": "trade data",
            "results": [{
                "id": "1",
                "name": "AG Trades DB",
                "description": "Trades",
                "icon": null,
                "tool_link": "https://t.internal",
                "documentation_link": null,
                "tags": ["data"],
                "score": 0.91
            }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .ai_search()
        .query(&SearchParams::new("trade data"))
        .await
        .unwrap();

    assert_eq!(resp.total, 1);
    assert_eq!(resp.results[0].id, "1");
    assert!((resp.results[0].score - 0.91).abs() < f64::EPSILON);
}

#[tokio::test]
async fn doc_search_parses_chunks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/doc-search"))
        .and(query_param("q", "refund"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": "refund",
            "results": [
                {"tool_id": "2", "tool_name": "CMS", "content_snippet": "Refunds are...", "doc_url": "https://wiki/a", "doc_type": "confluence", "relevance_score": 0.4},
                {"tool_id": "2", "tool_name": "CMS", "content_snippet": "Refund policy", "doc_url": "https://wiki/b", "doc_type": "confluence", "relevance_score": 0.8}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .doc_search()
        .query(&SearchParams::new("refund").with_limit(5))
        .await
        .unwrap();

    assert_eq!(resp.results.len(), 2);
    let m = resp.results[1].to_doc_match();
    assert_eq!(m.doc_url, "https://wiki/b");
    assert_eq!(m.content_snippet, "Refund policy");
}

#[tokio::test]
async fn tags_and_stats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["bi", "data"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tags/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_tags": 2,
            "tags": [{"name": "data", "count": 3}, {"name": "bi", "count": 1}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_eq!(client.tags().list().await.unwrap(), vec!["bi", "data"]);

    let stats = client.tags().stats().await.unwrap();
    assert_eq!(stats.total_tags, 2);
    assert_eq!(stats.tags[0].name, "data");
    assert_eq!(stats.tags[0].count, 3);
}
