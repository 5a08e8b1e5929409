/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskdesk-client tests

use taskdesk_client::{ClientConfig, TaskdeskClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> TaskdeskClient {
    TaskdeskClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Server-shaped task JSON
pub fn task_json(id: i64, title: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": description,
        "created_at": "2024-01-01T00:00:00.000000",
        "updated_at": "2024-01-01T00:00:00.000000"
    })
}

/// Server-shaped comment JSON
pub fn comment_json(id: i64, task_id: i64, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "content": content,
        "task_id": task_id,
        "created_at": "2024-01-01T00:00:00.000000",
        "updated_at": "2024-01-01T00:00:00.000000"
    })
}
