use crate::common::{client_for, TEST_TOKEN};
use crawler_control::model::{PatchOperation, CRAWLER_COUNT_PATH};
use crawler_control::FailureKind;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_configuration_returns_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .and(header("X-token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "crawler": {"count": 4, "orgList": ["contoso", "fabrikam"], "pollingDelay": 5000},
            "fetcher": {"tokenLowerBound": 50}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let config = client.get_configuration().await.expect("Failed to get configuration");

    assert_eq!(config.crawler_count(), Some(4));
    assert_eq!(config.org_list(), Some(vec!["contoso", "fabrikam"]));
    assert_eq!(config.get("/crawler/pollingDelay"), Some(&json!(5000)));
}

#[tokio::test]
async fn test_configure_count_clamps_negative_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/config"))
        .and(header("X-token", TEST_TOKEN))
        .and(body_json(json!([
            {"op": "replace", "path": "/crawler/count", "value": 0}
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    for count in [-1, -42, i64::MIN] {
        client
            .configure_count(count)
            .await
            .unwrap_or_else(|e| panic!("configure_count({}) failed: {}", count, e));
    }
}

#[tokio::test]
async fn test_configure_count_sends_non_negative_values_unchanged() {
    let mock_server = MockServer::start().await;

    for count in [0, 1, 12] {
        Mock::given(method("PATCH"))
            .and(path("/config"))
            .and(body_json(json!([
                {"op": "replace", "path": CRAWLER_COUNT_PATH, "value": count}
            ])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    for count in [0, 1, 12] {
        client.configure_count(count).await.expect("configure_count failed");
    }
}

#[tokio::test]
async fn test_configure_orgs_replaces_org_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/config"))
        .and(body_json(json!([
            {"op": "replace", "path": "/crawler/orgList", "value": ["contoso", "adatum"]}
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .configure_orgs(&["contoso", "adatum"])
        .await
        .expect("configure_orgs failed");
}

#[tokio::test]
async fn test_configure_crawler_sends_batch_and_returns_service_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/config"))
        .and(body_json(json!([
            {"op": "test", "path": "/crawler/count", "value": 2},
            {"op": "remove", "path": "/crawler/orgList/0"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"crawler": {"count": 2}})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .configure_crawler(&[
            PatchOperation::test("/crawler/count", 2),
            PatchOperation::remove("/crawler/orgList/0"),
        ])
        .await
        .expect("configure_crawler failed");

    assert_eq!(result, json!({"crawler": {"count": 2}}));
}

#[tokio::test]
async fn test_configure_crawler_rejection_names_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid patch path"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.configure_count(3).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Status(400));
    assert_eq!(
        err.to_string(),
        "Failed to patch crawler configuration: Invalid patch path."
    );
}
