use crate::e2e::helpers;

use helpers::TestContext;
use mosheng_ops::domain::tts::{Gender, SynthesisRequest, TtsClientError};
use mosheng_ops::infrastructure::tts_api::{HttpTtsClient, TtsApi};
use std::time::Duration;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voice_types_per_gender(ctx: &TestContext) {
    let catalog = ctx.tts_client().voice_types().await.unwrap();

    assert_eq!(catalog.voice_types.female[0], "女声1大气磁性");
    assert_eq!(catalog.count(Gender::Male), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_a_job_handle_for_accepted_jobs(ctx: &TestContext) {
    let job = ctx
        .tts_client()
        .synthesize(&SynthesisRequest::smoke_default())
        .await
        .unwrap();

    assert!(!job.task_id.is_empty());
    assert_eq!(job.status_url, "/tts/task_status/task-42");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resolve_absolute_status_urls(ctx: &TestContext) {
    let status_url = format!("{}/tts/task_status/abs-1", ctx.tts_base_url);

    let status = ctx.tts_client().task_status(&status_url).await.unwrap();

    let result = status.result.unwrap();
    assert!(result.success);
    assert_eq!(result.wav_url, "/audio/abs-1.wav");
    assert_eq!(result.mp3_url, "/audio/abs-1.mp3");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_missing_endpoints_as_unexpected_status(ctx: &TestContext) {
    let client = HttpTtsClient::new(&ctx.tts_base_url, "/v2/tts", Duration::from_secs(5)).unwrap();

    let err = client.voice_types().await.unwrap_err();

    assert!(matches!(
        err,
        TtsClientError::UnexpectedStatus { actual: 404, .. }
    ));
}

#[tokio::test]
async fn it_should_report_unreachable_service_as_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpTtsClient::new(&format!("http://{}", addr), "/tts", Duration::from_secs(2)).unwrap();

    let err = client.voice_types().await.unwrap_err();

    assert!(matches!(err, TtsClientError::Transport(_)));
}
