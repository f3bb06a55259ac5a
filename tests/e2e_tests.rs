//! End-to-end HTTP tests.

mod common;

use clarity::gateway::{CLARITY_STATUS_ANALYZED, CLARITY_STATUS_READY};

use common::fixtures::ExamScript;
use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::{TestClient, TestClientError};

const QUESTION: &str = "What is the boiling point of water?";

fn exam() -> ExamScript {
    ExamScript::new(&[(1, QUESTION), (2, "Name a noble gas.")])
        .score(QUESTION, 45)
        .candidates(|_, _| "What is the boiling point of pure water?".to_string())
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server(TestServerConfig::new(exam().generator()))
        .await
        .expect("Server should start");

    let health = TestClient::new(server.url())
        .health()
        .await
        .expect("Health check should succeed");

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_ready_endpoint_reports_stub_models() {
    let server = spawn_test_server(TestServerConfig::new(exam().generator()))
        .await
        .expect("Server should start");

    let ready = TestClient::new(server.url())
        .ready()
        .await
        .expect("Ready check should succeed");

    assert_eq!(ready["status"], "ok");
    assert_eq!(ready["components"]["http"], CLARITY_STATUS_READY);
    assert_eq!(ready["components"]["models"]["bi_encoder"], "stub");
}

#[tokio::test]
async fn test_analyze_returns_ordered_report() {
    let server = spawn_test_server(TestServerConfig::new(exam().generator()))
        .await
        .expect("Server should start");

    let (report, status) = TestClient::new(server.url())
        .analyze("1. What is the boiling point of water?\n2. Name a noble gas.")
        .await
        .expect("Analysis should succeed");

    assert_eq!(status, CLARITY_STATUS_ANALYZED);
    assert!(!report.request_id.is_empty());
    assert!(report.analyzed_at > 0);
    assert_eq!(report.results.len(), 2);

    let first = &report.results[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.score, 45);
    assert_eq!(first.status, "Rephrased");
    assert_eq!(first.original_question, QUESTION);
    assert_eq!(first.final_text, "What is the boiling point of pure water?");

    let second = &report.results[1];
    assert_eq!(second.status, "Original Kept");
    assert_eq!(second.final_text, "Name a noble gas.");
    assert_eq!(second.justification, "Scripted justification.");
}

#[tokio::test]
async fn test_analyze_empty_upload_is_bad_request() {
    let generator = exam().generator();
    let server = spawn_test_server(TestServerConfig::new(generator.clone()))
        .await
        .expect("Server should start");

    let err = TestClient::new(server.url())
        .analyze(Vec::<u8>::new())
        .await
        .unwrap_err();

    match err {
        TestClientError::BadRequest(body) => {
            assert_eq!(body.error, "Uploaded file is empty.");
            assert_eq!(body.code, 400);
        }
        other => panic!("expected bad request, got {other}"),
    }
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_oversized_upload_returns_empty_report() {
    let generator = exam().generator();
    let server = spawn_test_server(TestServerConfig::new(generator.clone()).max_document_bytes(64))
        .await
        .expect("Server should start");

    let (report, _) = TestClient::new(server.url())
        .analyze(vec![b'x'; 65])
        .await
        .expect("Oversized upload should still be answered");

    assert!(report.results.is_empty());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_binary_garbage_returns_empty_report() {
    let generator = exam().generator();
    let server = spawn_test_server(TestServerConfig::new(generator.clone()))
        .await
        .expect("Server should start");

    let (report, _) = TestClient::new(server.url())
        .analyze(vec![0xff, 0xfe, 0x00, 0x9c, 0x81])
        .await
        .expect("Unreadable upload should still be answered");

    assert!(report.results.is_empty());
    assert_eq!(generator.call_count(), 0);
}
