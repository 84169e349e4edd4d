use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use mosheng_ops::domain::tts::{
    Gender, SmokeErrorKind, SmokeStep, SynthesisRequest, TtsClientError,
};
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pass_all_four_steps_against_a_healthy_service(ctx: &TestContext) {
    let report = ctx.smoke_service().run().await.unwrap();

    assert_eq!(report.completed, SmokeStep::ALL.to_vec());
    assert_eq!(report.voices.count(Gender::Male), 2);
    assert_eq!(report.voices.count(Gender::Female), 3);
    assert_eq!(report.job.task_id, "task-42");
    assert_eq!(report.job_status.status, "completed");
    assert_eq!(report.confirmation.audio_id, "audio-7");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_poll_the_returned_status_url_once(ctx: &TestContext) {
    ctx.smoke_service().run().await.unwrap();

    assert_eq!(*ctx.mock.status_requests.lock(), vec!["task-42".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_submit_the_job_as_multipart_form(ctx: &TestContext) {
    ctx.smoke_service().run().await.unwrap();

    let content_type = ctx.mock.synthesize_content_type.lock().clone().unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {}",
        content_type
    );

    let body = ctx.mock.synthesize_body.lock().clone().unwrap();
    let request = SynthesisRequest::smoke_default();
    assert!(body.contains("name=\"text\""));
    assert!(body.contains(&request.text));
    assert!(body.contains("name=\"gender\""));
    assert!(body.contains("女声"));
    assert!(body.contains("name=\"voice_label\""));
    assert!(body.contains(&request.voice_label));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_confirm_the_script_with_a_json_body(ctx: &TestContext) {
    ctx.smoke_service().run().await.unwrap();

    let confirmed = ctx.mock.confirm_body.lock().clone().unwrap();
    assert_eq!(confirmed, SynthesisRequest::smoke_default());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_the_job_is_not_accepted_with_202(ctx: &TestContext) {
    *ctx.mock.synthesize_status.lock() = StatusCode::OK;

    let err = ctx.smoke_service().run().await.unwrap_err();

    assert_eq!(err.step, SmokeStep::AsyncSynthesize);
    match err.kind {
        SmokeErrorKind::Client(TtsClientError::UnexpectedStatus { actual, body, .. }) => {
            assert_eq!(actual, 200);
            assert!(body.contains("queue full"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(ctx.mock.status_requests.lock().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_server_errors_during_submission(ctx: &TestContext) {
    *ctx.mock.synthesize_status.lock() = StatusCode::INTERNAL_SERVER_ERROR;

    let err = ctx.smoke_service().run().await.unwrap_err();

    assert_eq!(err.step, SmokeStep::AsyncSynthesize);
    assert!(err.to_string().contains("500"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_voice_types_is_not_json(ctx: &TestContext) {
    *ctx.mock.malformed_voice_types.lock() = true;

    let err = ctx.smoke_service().run().await.unwrap_err();

    assert_eq!(err.step, SmokeStep::VoiceTypes);
    assert!(matches!(
        err.kind,
        SmokeErrorKind::Client(TtsClientError::Decode { .. })
    ));
    assert!(ctx.mock.synthesize_body.lock().is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_confirmation_reports_no_success(ctx: &TestContext) {
    *ctx.mock.confirm_success.lock() = false;

    let err = ctx.smoke_service().run().await.unwrap_err();

    assert_eq!(err.step, SmokeStep::ConfirmScript);
    assert!(matches!(err.kind, SmokeErrorKind::Contract(_)));
}
