//! End-to-end tests against a loopback mock server.
//!
//! The mock records every request it sees (method, raw URI, headers, body)
//! and answers with a canned status and body, which lets these tests assert
//! the exact wire form of each operation: percent-encoded paths, signature
//! headers, request bodies, and error mapping.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use stratus_auth::{CLIENT_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use stratus_client::{
    CloudClient, Credentials, Endpoint, Error, LiveDevAction, Resource, TaskState,
};

#[derive(Debug)]
struct Recorded {
    method: String,
    uri: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

type Seen = Arc<Mutex<Vec<Recorded>>>;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    seen: Seen,
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.seen.lock().unwrap().push(Recorded {
        method: method.to_string(),
        uri: uri.to_string(),
        headers,
        body: body.to_vec(),
    });
    (state.status, state.body.clone())
}

/// Start a recording mock server and a client pointed at it.
async fn start_mock(status: StatusCode, body: &str) -> (CloudClient, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body: body.to_string(),
        seen: Arc::clone(&seen),
    };

    let app = Router::new().fallback(record).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    let endpoint = Endpoint::new(format!("http://{}", addr), "/v1");
    let client = CloudClient::with_endpoint(endpoint, Credentials::new("test-id", "test-secret"));
    (client, seen)
}

fn task_fixture() -> String {
    json!({
        "id": "12345",
        "state": "waiting",
        "body": {"sitegroup": "stage-one:mysite"},
        "hidden": "0",
        "description": "Update SSH key AAAA==",
        "result": null,
        "created": "1357749797",
        "queue": "site-update",
        "cookie": {"action": "add"},
        "recipient": null,
        "sender": "SiteUpdateFactory",
        "percentage": null,
    })
    .to_string()
}

#[tokio::test]
async fn test_site_request_and_envelope() {
    let fixture = json!({
        "name": "stage-one:mysite",
        "title": "My Site",
        "production_mode": "0",
        "unix_username": "mysite",
        "uuid": "8067383e-fde3-102e-8305-1231390f2cc1",
        "vcs_type": "git",
        "vcs_url": "mysite@vcs-1.stage-one.hosting.example.net:mysite.git",
    });
    let (client, seen) = start_mock(StatusCode::OK, &fixture.to_string()).await;

    let site = client.site("stage-one:mysite").await.unwrap();

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].uri, "/v1/sites/stage-one%3Amysite.json");

    assert_eq!(site.primary_value().unwrap(), "stage-one:mysite");
    assert_eq!(site.title().unwrap(), "My Site");
    assert!(!site.production_mode().unwrap());
}

#[tokio::test]
async fn test_every_request_is_signed() {
    let (client, seen) = start_mock(StatusCode::OK, r#"["stage-one:mysite"]"#).await;

    client.sites().await.unwrap();

    let requests = seen.lock().unwrap();
    let headers = &requests[0].headers;
    assert_eq!(headers.get(CLIENT_HEADER).unwrap(), "test-id");
    assert!(headers.contains_key(TIMESTAMP_HEADER));
    assert!(!headers.get(SIGNATURE_HEADER).unwrap().is_empty());
    assert_eq!(
        headers.get("content-type").unwrap(),
        "application/json; charset=utf-8"
    );
}

#[tokio::test]
async fn test_sites_collection_iterates_in_order_and_restarts() {
    let (client, _seen) = start_mock(
        StatusCode::OK,
        r#"["stage-one:mysite", "stage-two:anothersite"]"#,
    )
    .await;

    let sites = client.sites().await.unwrap();
    assert_eq!(sites.len(), 2);

    let first: Vec<String> = sites.iter().map(|s| s.name().unwrap()).collect();
    let second: Vec<String> = sites.iter().map(|s| s.name().unwrap()).collect();
    assert_eq!(first, vec!["stage-one:mysite", "stage-two:anothersite"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_environment_round_trip() {
    let fixture = json!({
        "name": "prod",
        "db_clusters": ["456"],
        "default_domain": "mysite.stage-one.sites.example.net",
        "ssh_host": "ded-456.stage-one.hosting.example.net",
        "vcs_path": "tags/WELCOME",
        "livedev": "disabled",
    });
    let (client, seen) = start_mock(StatusCode::OK, &fixture.to_string()).await;

    let environment = client.environment("stage-one:mysite", "prod").await.unwrap();

    assert_eq!(
        seen.lock().unwrap()[0].uri,
        "/v1/sites/stage-one%3Amysite/envs/prod.json"
    );
    assert_eq!(environment.name().unwrap(), "prod");
    assert_eq!(environment.db_clusters().unwrap(), vec!["456"]);
    assert!(!environment.live_dev().unwrap());
}

#[tokio::test]
async fn test_add_ssh_key_posts_body_and_returns_task() {
    let (client, seen) = start_mock(StatusCode::OK, &task_fixture()).await;

    let task = client
        .add_ssh_key(
            "stage-one:mysite",
            "ssh-rsa AAAA== test@example.com",
            "test@example.com",
        )
        .await
        .unwrap();

    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(
        requests[0].uri,
        "/v1/sites/stage-one%3Amysite/sshkeys.json?nickname=test%40example.com"
    );

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"ssh_pub_key": "ssh-rsa AAAA== test@example.com"}));

    assert_eq!(task.id().unwrap(), "12345");
    assert_eq!(task.state().unwrap(), TaskState::Waiting);
    assert!(!task.started().unwrap());
    assert!(!task.completed().unwrap());
    assert_eq!(task.queue().unwrap(), "site-update");
    assert_eq!(task.result().unwrap(), None);
    assert_eq!(task.percentage().unwrap(), None);
}

#[tokio::test]
async fn test_delete_ssh_key_issues_delete() {
    let (client, seen) = start_mock(StatusCode::OK, &task_fixture()).await;

    client.delete_ssh_key("stage-one:mysite", "12345").await.unwrap();

    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(
        requests[0].uri,
        "/v1/sites/stage-one%3Amysite/sshkeys/12345.json"
    );
}

#[tokio::test]
async fn test_tasks_collection() {
    let body = format!("[{}]", task_fixture());
    let (client, seen) = start_mock(StatusCode::OK, &body).await;

    let tasks = client.tasks("stage-one:mysite").await.unwrap();

    assert_eq!(seen.lock().unwrap()[0].uri, "/v1/sites/stage-one%3Amysite/tasks.json");
    assert_eq!(tasks.len(), 1);
    for task in &tasks {
        assert_eq!(task.id().unwrap(), "12345");
    }
}

#[tokio::test]
async fn test_live_dev_returns_task() {
    let (client, seen) = start_mock(StatusCode::OK, &task_fixture()).await;

    let task = client
        .live_dev("stage-one:mysite", "dev", LiveDevAction::Enable)
        .await
        .unwrap();

    assert_eq!(
        seen.lock().unwrap()[0].uri,
        "/v1/sites/stage-one%3Amysite/envs/dev/livedev/enable.json"
    );
    assert_eq!(task.id().unwrap(), "12345");
}

#[tokio::test]
async fn test_deploy_code_returns_task() {
    let (client, seen) = start_mock(StatusCode::OK, &task_fixture()).await;

    let task = client
        .deploy_code("stage-one:mysite", "dev", "prod")
        .await
        .unwrap();

    assert_eq!(
        seen.lock().unwrap()[0].uri,
        "/v1/sites/stage-one%3Amysite/code-deploy/dev/prod.json"
    );
    assert!(!task.completed().unwrap());
}

#[tokio::test]
async fn test_client_error_carries_status_and_body() {
    let (client, _seen) = start_mock(StatusCode::NOT_FOUND, "no such site").await;

    let result = client.site("stage-one:missing").await;

    match result {
        Err(Error::Client { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such site");
        }
        other => panic!("expected client error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let (client, _seen) = start_mock(StatusCode::BAD_GATEWAY, "upstream sad").await;

    let result = client.tasks("stage-one:mysite").await;

    match result {
        Err(Error::Server { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream sad");
        }
        other => panic!("expected server error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let endpoint = Endpoint::new("http://127.0.0.1:1", "/v1");
    let client = CloudClient::with_endpoint(endpoint, Credentials::new("test-id", "test-secret"));

    let result = client.sites().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_download_streams_raw_body_to_sink() {
    let (client, seen) = start_mock(StatusCode::OK, "-- MySQL dump --\ntest\n").await;

    let mut sink = Cursor::new(Vec::new());
    client
        .download_database_backup("stage-one:mysite", "prod", "mysite", "12345", &mut sink)
        .await
        .unwrap();

    assert_eq!(
        seen.lock().unwrap()[0].uri,
        "/v1/sites/stage-one%3Amysite/envs/prod/dbs/mysite/backups/12345/download.json"
    );
    assert_eq!(sink.into_inner(), b"-- MySQL dump --\ntest\n");
}

#[tokio::test]
async fn test_create_database_backup_round_trip() {
    let (client, seen) = start_mock(StatusCode::OK, &task_fixture()).await;

    let task = client
        .create_database_backup("stage-one:mysite", "prod", "mysite")
        .await
        .unwrap();

    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(
        requests[0].uri,
        "/v1/sites/stage-one%3Amysite/envs/prod/dbs/mysite/backups.json"
    );
    assert_eq!(task.id().unwrap(), "12345");
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let (client, seen) = start_mock(StatusCode::OK, r#"["stage-one:mysite"]"#).await;
    let client = Arc::new(client);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.sites().await.map(|sites| sites.len()) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }
    assert_eq!(seen.lock().unwrap().len(), 4);
}
