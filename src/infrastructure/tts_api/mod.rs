pub mod http_client;

pub use http_client::HttpTtsClient;

use crate::domain::tts::{
    ConfirmResponse, JobHandle, JobStatus, SynthesisRequest, TtsClientError, VoiceCatalog,
};
use async_trait::async_trait;

/// Client for the remote TTS service.
/// Abstracts the transport so the smoke run can be driven against a fake.
///
/// Every call is a single request: implementations must not retry.
#[async_trait]
pub trait TtsApi: Send + Sync {
    /// GET /tts/voice_types
    async fn voice_types(&self) -> Result<VoiceCatalog, TtsClientError>;

    /// POST /tts/synthesize as multipart form
    ///
    /// The job is accepted only with HTTP 202.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<JobHandle, TtsClientError>;

    /// GET the `status_url` returned by `synthesize`
    ///
    /// Relative URLs are resolved against the service host.
    async fn task_status(&self, status_url: &str) -> Result<JobStatus, TtsClientError>;

    /// POST /tts/confirm_script with a JSON body
    async fn confirm_script(
        &self,
        request: &SynthesisRequest,
    ) -> Result<ConfirmResponse, TtsClientError>;
}
