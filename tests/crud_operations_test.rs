use axum_test::TestServer;
use http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_flower_crud_lifecycle() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    // Create flower
    let payload = common::create_test_flower_json("Iris-setosa");
    let create_response = server.post("/flower").json(&payload).await;

    assert_eq!(create_response.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = create_response.json();
    let id = created["_id"].as_str().unwrap();
    assert_eq!(created["species"], "Iris-setosa");
    assert_eq!(created["sepal"]["length"], 5.1);
    assert_eq!(created["petal"]["width"], 0.2);
    let location = create_response
        .headers()
        .get("location")
        .expect("Location header missing from POST response")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, format!("/flower/{}", id));

    // Read it back: the stored record equals the input plus the assigned id
    let get_response = server.get(&format!("/flower/{}", id)).await;
    assert_eq!(get_response.status_code(), StatusCode::OK);
    let fetched: serde_json::Value = get_response.json();
    assert_eq!(fetched["_id"], id);
    assert_eq!(fetched["sepal"], payload["sepal"]);
    assert_eq!(fetched["petal"], payload["petal"]);
    assert_eq!(fetched["species"], payload["species"]);

    // Update the species
    let update_response = server
        .put(&format!("/flower/{}", id))
        .json(&json!({"species": "Iris-versicolor"}))
        .await;
    assert_eq!(update_response.status_code(), StatusCode::OK);
    let updated: serde_json::Value = update_response.json();
    assert_eq!(updated["_id"], id);
    assert_eq!(updated["species"], "Iris-versicolor");

    // List contains exactly the one record
    let list_response = server.get("/flower").await;
    assert_eq!(list_response.status_code(), StatusCode::OK);
    let listed: serde_json::Value = list_response.json();
    let flowers = listed.as_array().unwrap();
    assert_eq!(flowers.len(), 1);
    assert_eq!(flowers[0]["species"], "Iris-versicolor");

    // Delete
    let delete_response = server.delete(&format!("/flower/{}", id)).await;
    assert_eq!(delete_response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(delete_response.text(), "");

    // Gone afterwards
    let get_deleted = server.get(&format!("/flower/{}", id)).await;
    assert_eq!(get_deleted.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = get_deleted.json();
    assert_eq!(
        body["message"],
        format!("Flower with ID {} not found", id)
    );

    // And the list is empty again
    let final_list: serde_json::Value = server.get("/flower").await.json();
    assert_eq!(final_list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_root_returns_welcome_payload() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored_on_create() {
    let app = common::setup_test_app(common::create_test_app_config())
        .await
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let mut payload = common::create_test_flower_json("Iris-setosa");
    payload["_id"] = json!("123e4567-e89b-12d3-a456-426614174000");

    let response = server.post("/flower").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_ne!(created["_id"], "123e4567-e89b-12d3-a456-426614174000");
}
