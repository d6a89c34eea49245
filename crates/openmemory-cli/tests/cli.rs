//! Integration tests: CLI commands against the mock endpoint.

use openmemory_cli::{failure_message, run, CliError, Command};
use openmemory_client::mock::{MockServer, Route};
use openmemory_client::{ClientError, MemoryClient};
use serde_json::json;

async fn exec(server: &MockServer, command: Command) -> Result<String, CliError> {
    let client = MemoryClient::new(server.url(), Some("test-token".to_string()));
    let mut out = Vec::new();
    run(command, &client, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn demo_walks_through_every_step() {
    let server = MockServer::start().await.unwrap();
    server.respond(Route::AddMemory, 201, json!({ "id": "mem-1" }));
    server.respond(
        Route::SearchMemories,
        200,
        json!({
            "results": [
                {
                    "memory": {
                        "id": "mem-1",
                        "content": "ICPは分散型クラウドコンピュータプラットフォームです。ICPはスマートコントラクトをウェブ速度で実行し、無制限にスケールします。",
                        "metadata": {},
                        "tags": ["ICP"]
                    },
                    "similarity_score": 0.8765
                },
                {
                    "memory": { "id": "mem-2", "content": "short", "metadata": {}, "tags": [] },
                    "similarity_score": 0.1
                }
            ]
        }),
    );
    server.respond(
        Route::ListMemories,
        200,
        json!({ "memories": [ { "id": "mem-1", "content": "x" }, { "id": "mem-2", "content": "y" } ] }),
    );

    let out = exec(&server, Command::Demo).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Service status: healthy");
    assert_eq!(lines[1], "Created memory: mem-1");
    assert_eq!(lines[2], "Found 2 relevant memories:");
    assert!(lines[3].starts_with("  - ICPは分散型"));
    assert!(lines[3].ends_with("... (score: 0.88)"));
    assert_eq!(lines[4], "  - short (score: 0.10)");
    assert_eq!(lines[5], "Total memories: 2");
    assert_eq!(lines[6], r#"Service stats: {"total_memories":0}"#);

    let reqs = server.requests();
    assert_eq!(reqs.len(), 5);
    assert_eq!(
        reqs[1].body,
        Some(json!({
            "content": "ICPは分散型クラウドコンピュータプラットフォームです",
            "metadata": { "source": "documentation", "language": "ja" },
            "tags": ["ICP", "blockchain", "tech"]
        }))
    );
    assert_eq!(reqs[2].query_param("limit"), Some("5"));
    assert_eq!(reqs[3].query_param("limit"), Some("10"));
    assert!(reqs
        .iter()
        .all(|r| r.authorization.as_deref() == Some("Bearer test-token")));
}

#[tokio::test]
async fn add_prints_id_and_sends_tags_and_metadata() {
    let server = MockServer::start().await.unwrap();
    server.respond(Route::AddMemory, 201, json!({ "id": "abc" }));

    let out = exec(
        &server,
        Command::Add {
            content: "hello".to_string(),
            tags: vec!["t1".to_string()],
            metadata: vec![("n".to_string(), json!(3))],
        },
    )
    .await
    .unwrap();
    assert_eq!(out, "abc\n");
    assert_eq!(
        server.requests()[0].body,
        Some(json!({ "content": "hello", "metadata": { "n": 3 }, "tags": ["t1"] }))
    );
}

#[tokio::test]
async fn search_without_tags_omits_filter() {
    let server = MockServer::start().await.unwrap();
    exec(
        &server,
        Command::Search {
            query: "q".to_string(),
            limit: 3,
            tags: vec![],
        },
    )
    .await
    .unwrap();
    let req = &server.requests()[0];
    assert_eq!(req.query_param("limit"), Some("3"));
    assert_eq!(req.query_param("tags"), None);
}

#[tokio::test]
async fn delete_reports_outcome() {
    let server = MockServer::start().await.unwrap();
    let out = exec(&server, Command::Delete { id: "m1".to_string() })
        .await
        .unwrap();
    assert_eq!(out, "deleted\n");

    server.respond(Route::DeleteMemory, 200, json!({}));
    let out = exec(&server, Command::Delete { id: "m1".to_string() })
        .await
        .unwrap();
    assert_eq!(out, "not deleted\n");
}

#[tokio::test]
async fn request_failure_surfaces_as_client_error() {
    let server = MockServer::start().await.unwrap();
    server.fail_all(403, json!({ "error": "forbidden principal" }));

    let err = exec(&server, Command::Stats).await.unwrap_err();
    match err {
        CliError::Client(e @ ClientError::RequestFailed { .. }) => {
            assert_eq!(e.status(), Some(403));
            assert_eq!(e.server_message().as_deref(), Some("forbidden principal"));
            assert_eq!(failure_message(&e), "Error: HTTP 403: forbidden principal");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failure_message_without_status_uses_error_text() {
    let e = ClientError::Transport("connect error: connection refused".to_string());
    assert_eq!(
        failure_message(&e),
        "Error: transport error: connect error: connection refused"
    );
}
