use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(String::from_utf8(response.body_bytes.clone()).unwrap(), "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_every_declared_service(ctx: &TestContext) {
    let response = ctx.client.get("/api/services").await.unwrap();
    response.assert_status(StatusCode::OK);

    let services = response.json().as_object().unwrap();
    let mut ids: Vec<&String> = services.keys().collect();
    ids.sort();
    assert_eq!(ids, vec!["backend-service", "tts-service"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_mark_online_and_healthy_service_green(ctx: &TestContext) {
    let response = ctx.client.get("/api/services").await.unwrap();
    let tts = &response.json()["tts-service"];

    assert_eq!(tts["name"], "TTS语音合成服务");
    assert_eq!(tts["pm2_status"], "online");
    assert_eq!(tts["pid"], 31337);
    assert_eq!(tts["restarts"], 3);
    assert_eq!(tts["uptime_display"], "1h 30m");
    assert_eq!(tts["health"]["status"], "healthy");
    assert_eq!(tts["health"]["status_code"], 200);
    assert_eq!(tts["indicator"], "green");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_mark_unknown_and_unreachable_service_red(ctx: &TestContext) {
    let response = ctx.client.get("/api/services").await.unwrap();
    let backend = &response.json()["backend-service"];

    assert_eq!(backend["pm2_status"], "unknown");
    assert_eq!(backend["health"]["status"], "down");
    assert_eq!(backend["uptime_display"], "N/A");
    assert_eq!(backend["indicator"], "red");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_system_usage(ctx: &TestContext) {
    let response = ctx.client.get("/api/system").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["cpu_percent"], 72.5);
    assert_eq!(body["memory"]["percent"], 50.0);
    assert_eq!(body["memory"]["total"], 8 * helpers::GIB);
    assert_eq!(body["disk_usage"]["/"]["percent"], 25.0);
    assert_eq!(body["disk_usage"]["/"]["free"], 75 * helpers::GIB);
    assert_eq!(body["network"]["bytes_recv"], 2_000);
    assert!(body["timestamp"].as_str().is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_output_log_tail(ctx: &TestContext) {
    ctx.write_log(
        "tts-service-out.log",
        &["INFO booting", "INFO model loaded", "INFO listening on 8080"],
    );

    let response = ctx
        .client
        .get("/api/logs/tts-service?lines=2")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["service"], "tts-service");
    assert_eq!(body["log_type"], "output");
    assert_eq!(
        body["logs"],
        json!(["INFO model loaded", "INFO listening on 8080"])
    );
    assert!(body["timestamp"].as_str().is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_error_log_when_requested(ctx: &TestContext) {
    ctx.write_log("backend-error.log", &["ERROR database unreachable"]);

    let response = ctx
        .client
        .get("/api/logs/backend-service?type=error")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    assert_eq!(response.json()["log_type"], "error");
    assert_eq!(response.json()["logs"], json!(["ERROR database unreachable"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_missing_log_files_in_the_body(ctx: &TestContext) {
    let response = ctx.client.get("/api/logs/tts-service").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["logs"], json!(["log file not found"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_services(ctx: &TestContext) {
    let response = ctx.client.get("/api/logs/frontend-service").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Service 'frontend-service' not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_out_of_range_line_counts(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/logs/tts-service?lines=0")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("lines must be between 1 and");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_unknown_log_types_as_output(ctx: &TestContext) {
    ctx.write_log("tts-service-out.log", &["INFO ready"]);

    let response = ctx
        .client
        .get("/api/logs/tts-service?type=stdout")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    assert_eq!(response.json()["log_type"], "output");
    assert_eq!(response.json()["logs"], json!(["INFO ready"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_default_lines_when_not_a_number(ctx: &TestContext) {
    let lines: Vec<String> = (1..=120).map(|i| format!("INFO line {}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    ctx.write_log("tts-service-out.log", &refs);

    let response = ctx
        .client
        .get("/api/logs/tts-service?lines=abc")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let logs = response.json()["logs"].as_array().unwrap().clone();
    assert_eq!(logs.len(), 100);
    assert_eq!(logs[0], "INFO line 21");
    assert_eq!(logs[99], "INFO line 120");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_negative_line_counts_with_a_json_body(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/logs/tts-service?lines=-1")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("lines must be between 1 and");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    assert!(response.header("x-request-id").is_some());

    let response = ctx
        .client
        .get_with_request_id("/api/services", "trace-123")
        .await
        .unwrap();
    assert_eq!(
        response.header("x-request-id").map(String::as_str),
        Some("trace-123")
    );
}
