use axum_test::TestServer;
use http::StatusCode;
use serde_json::json;

mod common;

async fn create_flower(server: &TestServer) -> String {
    let response = server
        .post("/flower")
        .json(&common::create_test_flower_json("Iris-setosa"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    created["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_nested_update_preserves_unset_siblings() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();
    let id = create_flower(&server).await;

    // Touch one nested field and one top-level field only.
    let response = server
        .put(&format!("/flower/{}", id))
        .json(&json!({"species": "Iris-updated", "sepal": {"width": 9.0}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let flower: serde_json::Value = response.json();
    assert_eq!(flower["species"], "Iris-updated");
    assert_eq!(flower["sepal"]["width"], 9.0);
    // sepal.length was never supplied and must be unchanged, not erased.
    assert_eq!(flower["sepal"]["length"], 5.1);
    assert_eq!(flower["petal"]["length"], 1.4);
    assert_eq!(flower["petal"]["width"], 0.2);

    // The same state comes back on a fresh fetch.
    let refetched: serde_json::Value = server.get(&format!("/flower/{}", id)).await.json();
    assert_eq!(refetched, flower);
}

#[tokio::test]
async fn test_empty_update_returns_current_record() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();
    let id = create_flower(&server).await;

    let response = server.put(&format!("/flower/{}", id)).json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let flower: serde_json::Value = response.json();
    assert_eq!(flower["_id"], id);
    assert_eq!(flower["species"], "Iris-setosa");
    assert_eq!(flower["sepal"]["length"], 5.1);
}

#[tokio::test]
async fn test_empty_nested_objects_change_nothing() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();
    let id = create_flower(&server).await;

    // Present-but-empty nested objects contribute no field paths; this is
    // not "clear sepal and petal".
    let response = server
        .put(&format!("/flower/{}", id))
        .json(&json!({"sepal": {}, "petal": {}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let flower: serde_json::Value = response.json();
    assert_eq!(flower["sepal"], json!({"length": 5.1, "width": 3.5}));
    assert_eq!(flower["petal"], json!({"length": 1.4, "width": 0.2}));
}

#[tokio::test]
async fn test_update_missing_record_is_not_found_either_way() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let missing = "123e4567-e89b-12d3-a456-426614174000";

    // Non-empty update set
    let response = server
        .put(&format!("/flower/{}", missing))
        .json(&json!({"species": "Iris-x"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Empty update set takes the fetch-only path and still 404s
    let response = server
        .put(&format!("/flower/{}", missing))
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_current_value_succeeds() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();
    let id = create_flower(&server).await;

    // Re-stating the stored value matches the record; it must not be
    // mistaken for "no such record".
    let response = server
        .put(&format!("/flower/{}", id))
        .json(&json!({"species": "Iris-setosa"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let flower: serde_json::Value = response.json();
    assert_eq!(flower["species"], "Iris-setosa");
}
