//! Remote execution against a stub service running in-process.

use std::{collections::HashMap, net::SocketAddr};

use axum::{Form, Json, Router, http::StatusCode, routing::post};
use codesync_client::{
    error::ClientError,
    executor::{Language, RemoteExecutor},
};
use tokio::net::TcpListener;

async fn run(Form(params): Form<HashMap<String, String>>) -> Json<serde_json::Value> {
    let code = params.get("code").cloned().unwrap_or_default();
    if code.contains("syntax error") {
        Json(serde_json::json!({"output": "", "error": "SyntaxError"}))
    } else {
        Json(serde_json::json!({"output": "1\n", "error": ""}))
    }
}

async fn echo(Form(params): Form<HashMap<String, String>>) -> Json<serde_json::Value> {
    let output = format!(
        "language={};input={}",
        params.get("language").cloned().unwrap_or_default(),
        params.get("input").cloned().unwrap_or_default()
    );
    Json(serde_json::json!({"output": output, "error": ""}))
}

async fn start_stub_service() -> SocketAddr {
    let app = Router::new()
        .route("/", post(run))
        .route("/echo", post(echo))
        .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/garbage", post(|| async { "not json" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_execute_returns_output() {
    // テスト項目: 正常終了したプログラムの出力がそのまま返る
    // given (前提条件):
    let addr = start_stub_service().await;
    let executor = RemoteExecutor::new(format!("http://{}/", addr));

    // when (操作):
    let result = executor
        .execute("print(1)", Language::Python, "")
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(result, "1\n");
}

#[tokio::test]
async fn test_execute_reports_program_error() {
    // テスト項目: サービスが error を返した場合は error が表示内容になる
    // given (前提条件):
    let addr = start_stub_service().await;
    let executor = RemoteExecutor::new(format!("http://{}/", addr));

    // when (操作):
    let result = executor
        .execute("syntax error here", Language::Python, "")
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(result, "SyntaxError");
}

#[tokio::test]
async fn test_execute_sends_form_fields() {
    // テスト項目: language と input がフォームとして送信される
    // given (前提条件):
    let addr = start_stub_service().await;
    let executor = RemoteExecutor::new(format!("http://{}/echo", addr));

    // when (操作):
    let result = executor
        .execute("int main() {}", Language::Cpp, "1 2\n3")
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(result, "language=cpp;input=1 2\n3");
}

#[tokio::test]
async fn test_execute_surfaces_service_failures() {
    // テスト項目: 異常ステータスや不正なレスポンスはエラーとして返る
    // given (前提条件):
    let addr = start_stub_service().await;
    let broken = RemoteExecutor::new(format!("http://{}/broken", addr));
    let garbage = RemoteExecutor::new(format!("http://{}/garbage", addr));

    // when (操作):
    let broken = broken.execute("x", Language::C, "").await;
    let garbage = garbage.execute("x", Language::C, "").await;

    // then (期待する結果):
    assert!(matches!(broken, Err(ClientError::ExecutionError(_))));
    assert!(matches!(garbage, Err(ClientError::ExecutionError(_))));
}

#[tokio::test]
async fn test_execute_unreachable_service() {
    // テスト項目: 接続できないサービスはエラーとして返る
    // given (前提条件):
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let executor = RemoteExecutor::new(format!("http://{}/", addr));

    // when (操作):
    let result = executor.execute("x", Language::C, "").await;

    // then (期待する結果):
    assert!(matches!(result, Err(ClientError::ExecutionError(_))));
}
