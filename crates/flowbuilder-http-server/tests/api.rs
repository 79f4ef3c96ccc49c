//! End-to-end tests against a server bound to an ephemeral port

use std::sync::Arc;

use flowbuilder_http_server::{build_router, build_service, ServerConfig};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_server(config: ServerConfig) -> String {
    let service = Arc::new(build_service(&config));
    let app = build_router(service, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn seeded() -> String {
    spawn_server(ServerConfig::default()).await
}

async fn workflow_count(client: &reqwest::Client, base: &str) -> u64 {
    let body: Value = client
        .get(format!("{}/api/workflows", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["data"]["total"].as_u64().unwrap()
}

fn webhook_node(id: &str, config: Value) -> Value {
    json!({
        "id": id,
        "type": "trigger",
        "position": { "x": 100.0, "y": 100.0 },
        "data": {
            "label": "Webhook Trigger",
            "integration": { "id": "trigger-webhook" },
            "config": config
        }
    })
}

#[tokio::test]
async fn test_create_then_execute_scenario() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/workflows", base))
        .json(&json!({ "name": "Test" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Workflow created successfully");

    let workflow = &body["data"]["workflow"];
    let id = workflow["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("workflow-"));
    assert_eq!(workflow["name"], "Test");
    assert_eq!(workflow["nodes"], json!([]));
    assert_eq!(workflow["connections"], json!([]));
    assert_eq!(workflow["isActive"], false);

    let response = client
        .post(format!("{}/api/workflows/{}/execute", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Workflow execution started");
    let execution_id = body["data"]["executionId"].as_str().unwrap();
    assert!(!execution_id.is_empty());

    let response = client
        .post(format!("{}/api/workflows/missing-id/execute", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "error": "Workflow not found" }));
}

#[tokio::test]
async fn test_list_and_get_seeded_workflows() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/workflows", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["workflows"][0]["id"], "workflow-1");
    assert_eq!(body["data"]["workflows"][1]["id"], "workflow-2");

    let body: Value = client
        .get(format!("{}/api/workflows/workflow-1", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let workflow = &body["data"]["workflow"];
    assert_eq!(workflow["name"], "Email to Slack Notification");
    assert_eq!(workflow["isActive"], true);
    let created = workflow["createdAt"].as_str().unwrap();
    assert_eq!(
        chrono::DateTime::parse_from_rfc3339(created).unwrap().timestamp(),
        1_733_011_200
    );

    let response = client
        .get(format!("{}/api/workflows/nope", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_validation() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    for payload in [json!({}), json!({ "name": "" })] {
        let response = client
            .post(format!("{}/api/workflows", base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Workflow name is required" })
        );
    }

    let response = client
        .post(format!("{}/api/workflows", base))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    assert_eq!(workflow_count(&client, &base).await, 2);
}

#[tokio::test]
async fn test_node_configs_are_checked_against_catalog() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/workflows", base))
        .json(&json!({
            "name": "Hooks",
            "nodes": [webhook_node("node-1", json!({ "method": "POST", "webhook_url": "https://example.com/hooks/in" }))]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let node = &body["data"]["workflow"]["nodes"][0];
    assert_eq!(node["data"]["config"]["method"], "POST");
    assert_eq!(node["data"]["integration"]["name"], "Webhook Trigger");

    let response = client
        .post(format!("{}/api/workflows", base))
        .json(&json!({
            "name": "Broken",
            "nodes": [webhook_node("node-1", json!({ "bogus": true }))]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(workflow_count(&client, &base).await, 3);
}

#[tokio::test]
async fn test_empty_update_changes_only_updated_at() {
    let base = seeded().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/workflows/workflow-2", base);

    let before: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    let before = before["data"]["workflow"].clone();

    let response = client.put(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Workflow updated successfully");

    let mut after = body["data"]["workflow"].clone();
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    after["updatedAt"] = before["updatedAt"].clone();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_partial_update() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .put(format!("{}/api/workflows/workflow-2", base))
        .json(&json!({ "isActive": true, "name": "Leads" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let workflow = &body["data"]["workflow"];
    assert_eq!(workflow["isActive"], true);
    assert_eq!(workflow["name"], "Leads");
    assert_eq!(workflow["description"], "Process new leads from website form");

    let response = client
        .put(format!("{}/api/workflows/missing-id", base))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/api/workflows/missing-id", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(workflow_count(&client, &base).await, 2);

    let response = client
        .delete(format!("{}/api/workflows/workflow-1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "message": "Workflow deleted successfully" })
    );
    assert_eq!(workflow_count(&client, &base).await, 1);
}

#[tokio::test]
async fn test_smoke_endpoints() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/ping", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "message": "Hello from FlowBuilder server!" }));

    let body: Value = client
        .get(format!("{}/api/demo", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "message": "Hello from the demo endpoint" }));
}

#[tokio::test]
async fn test_cors_and_unseeded_store() {
    let base = spawn_server(ServerConfig {
        seed_samples: false,
        ..ServerConfig::default()
    })
    .await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/workflows", base))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({ "workflows": [], "total": 0 }));
}

#[tokio::test]
async fn test_bodiless_put_touches_only_updated_at() {
    let base = seeded().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/workflows/workflow-1", base);

    let before: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    let before = before["data"]["workflow"].clone();

    let response = client.put(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let mut after = body["data"]["workflow"].clone();
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    after["updatedAt"] = before["updatedAt"].clone();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_bodiless_post_requires_name() {
    let base = seeded().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/workflows", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "error": "Workflow name is required" })
    );
    assert_eq!(workflow_count(&client, &base).await, 2);
}
