//! `GraphInterestClient` against a wiremock Graph API.

use spotlight::interests::{
    dedup_by_id, find_interests, GraphInterestClient, InterestError, InterestSearch,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GraphInterestClient {
    GraphInterestClient::with_base_url("test-token", 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_parsed_candidates() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "id": "6003107902433",
                "name": "Boutique hotel",
                "audience_size": 48_000_000u64,
                "topic": "Travel"
            },
            {
                "id": "6003020834693",
                "name": "Luxury travel",
                "audience_size_lower_bound": 12_000_000u64
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v20.0/search"))
        .and(query_param("type", "adinterest"))
        .and(query_param("q", "hotels"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v20.0", server.uri()));
    let candidates = client.search("hotels").await.expect("should parse data");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "Boutique hotel");
    assert_eq!(candidates[0].size(), Some(48_000_000));
    assert_eq!(candidates[0].topic.as_deref(), Some("Travel"));
    assert_eq!(candidates[1].size(), Some(12_000_000));
}

#[tokio::test]
async fn search_with_missing_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client.search("anything").await.expect("empty envelope");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn search_maps_graph_error_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "message": "Invalid OAuth access token.",
            "type": "OAuthException",
            "code": 190
        }
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("hotels").await.unwrap_err();

    match err {
        InterestError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid OAuth access token.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn search_maps_non_json_failure_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("hotels").await.unwrap_err();

    assert!(
        matches!(err, InterestError::UnexpectedStatus { status: 502, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn search_rejects_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("hotels").await.unwrap_err();

    match err {
        InterestError::Deserialize { context, .. } => assert!(context.contains("hotels")),
        other => panic!("expected Deserialize error, got {other:?}"),
    }
}

#[tokio::test]
async fn find_interests_skips_failing_keyword() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "hotels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "1", "name": "Hotels", "audience_size": 1_000 },
                { "id": "2", "name": "Resorts", "audience_size": 2_000 }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "resorts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "2", "name": "Resorts", "audience_size": 2_500 }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let keywords = vec![
        "hotels".to_string(),
        "broken".to_string(),
        "resorts".to_string(),
    ];

    let found = find_interests(&client, &keywords).await;
    assert_eq!(found.len(), 3);

    let unique = dedup_by_id(found);
    assert_eq!(unique.len(), 2);
    assert_eq!(unique[1].id, "2");
    assert_eq!(unique[1].search_term, "resorts");
    assert_eq!(unique[1].audience_size, Some(2_500));
}
