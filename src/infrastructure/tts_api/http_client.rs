use super::TtsApi;
use crate::domain::tts::{
    ConfirmResponse, JobHandle, JobStatus, SynthesisRequest, TtsClientError, VoiceCatalog,
};
use async_trait::async_trait;
use reqwest::{header, multipart, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Status codes a call accepts before parsing the body.
#[derive(Debug, Clone, Copy)]
enum Expected {
    AnySuccess,
    Exactly(StatusCode),
}

impl Expected {
    fn matches(&self, status: StatusCode) -> bool {
        match self {
            Expected::AnySuccess => status.is_success(),
            Expected::Exactly(code) => status == *code,
        }
    }

    fn describe(&self) -> String {
        match self {
            Expected::AnySuccess => "2xx".to_string(),
            Expected::Exactly(code) => code.as_u16().to_string(),
        }
    }
}

/// reqwest implementation of the TTS API client
pub struct HttpTtsClient {
    base_url: Url,
    path_prefix: String,
    http_client: reqwest::Client,
}

impl HttpTtsClient {
    pub fn new(
        base_url: &str,
        path_prefix: &str,
        timeout: Duration,
    ) -> Result<Self, TtsClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TtsClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            path_prefix: path_prefix.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or absolute URL against the service host
    pub fn resolve(&self, reference: &str) -> Result<Url, TtsClientError> {
        self.base_url
            .join(reference)
            .map_err(|e| TtsClientError::InvalidUrl(format!("{}: {}", reference, e)))
    }

    fn endpoint(&self, name: &str) -> Result<Url, TtsClientError> {
        self.resolve(&format!("{}/{}", self.path_prefix, name))
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        expected: Expected,
    ) -> Result<T, TtsClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !expected.matches(status) {
            return Err(TtsClientError::UnexpectedStatus {
                expected: expected.describe(),
                actual: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TtsClientError::Decode {
            message: e.to_string(),
            body,
        })
    }
}

#[async_trait]
impl TtsApi for HttpTtsClient {
    async fn voice_types(&self) -> Result<VoiceCatalog, TtsClientError> {
        let url = self.endpoint("voice_types")?;
        tracing::debug!(url = %url, "Fetching voice types");

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::read_json(response, Expected::AnySuccess).await
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<JobHandle, TtsClientError> {
        let url = self.endpoint("synthesize")?;
        tracing::debug!(
            url = %url,
            gender = %request.gender,
            voice_label = %request.voice_label,
            text_length = request.text.chars().count(),
            "Submitting async synthesis job"
        );

        let form = multipart::Form::new()
            .text("text", request.text.clone())
            .text("gender", request.gender.as_label())
            .text("voice_label", request.voice_label.clone());

        let response = self
            .http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response, Expected::Exactly(StatusCode::ACCEPTED)).await
    }

    async fn task_status(&self, status_url: &str) -> Result<JobStatus, TtsClientError> {
        let url = self.resolve(status_url)?;
        tracing::debug!(url = %url, "Checking task status");

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::read_json(response, Expected::AnySuccess).await
    }

    async fn confirm_script(
        &self,
        request: &SynthesisRequest,
    ) -> Result<ConfirmResponse, TtsClientError> {
        let url = self.endpoint("confirm_script")?;
        tracing::debug!(url = %url, "Confirming script");

        let response = self
            .http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        Self::read_json(response, Expected::AnySuccess).await
    }
}
