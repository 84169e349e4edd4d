use super::dto::{ConfirmResponse, Gender, JobHandle, JobStatus, SynthesisRequest, VoiceCatalog};
use super::error::{SmokeError, SmokeStep};
use crate::infrastructure::tts_api::TtsApi;
use std::sync::Arc;
use std::time::Duration;

/// Everything observed during a successful smoke run
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub voices: VoiceCatalog,
    pub job: JobHandle,
    pub job_status: JobStatus,
    pub confirmation: ConfirmResponse,
    pub completed: Vec<SmokeStep>,
}

impl SmokeReport {
    /// Human-readable summary printed at the end of a run
    pub fn summary(&self) -> String {
        let mut out = String::from("All TTS API checks passed\n");
        for step in &self.completed {
            out.push_str(&format!("- {}: ok\n", step));
        }
        out
    }
}

/// Exercises the TTS API end-to-end: voice types, async job, one status check,
/// synchronous confirmation. Steps run strictly in order and the first failure
/// ends the run.
pub struct SmokeTestService {
    api: Arc<dyn TtsApi>,
    request: SynthesisRequest,
    status_delay: Duration,
}

impl SmokeTestService {
    pub fn new(api: Arc<dyn TtsApi>, request: SynthesisRequest, status_delay: Duration) -> Self {
        Self {
            api,
            request,
            status_delay,
        }
    }

    pub async fn run(&self) -> Result<SmokeReport, SmokeError> {
        tracing::info!(
            text = %self.request.text,
            gender = %self.request.gender,
            voice_label = %self.request.voice_label,
            "Starting TTS API smoke test"
        );
        let mut completed = Vec::with_capacity(SmokeStep::ALL.len());

        let voices = self.check_voice_types().await?;
        completed.push(SmokeStep::VoiceTypes);

        let job = self.check_async_synthesize().await?;
        completed.push(SmokeStep::AsyncSynthesize);

        tracing::info!(
            delay_secs = self.status_delay.as_secs_f64(),
            "Waiting before checking task status"
        );
        tokio::time::sleep(self.status_delay).await;

        let job_status = self.check_task_status(&job.status_url).await?;
        completed.push(SmokeStep::TaskStatus);

        let confirmation = self.check_confirm_script().await?;
        completed.push(SmokeStep::ConfirmScript);

        tracing::info!("All TTS API checks passed");

        Ok(SmokeReport {
            voices,
            job,
            job_status,
            confirmation,
            completed,
        })
    }

    async fn check_voice_types(&self) -> Result<VoiceCatalog, SmokeError> {
        let step = SmokeStep::VoiceTypes;
        let voices = self
            .api
            .voice_types()
            .await
            .map_err(|e| failed(step, e))?;

        tracing::info!(
            male = voices.count(Gender::Male),
            female = voices.count(Gender::Female),
            "voice_types check passed"
        );
        Ok(voices)
    }

    async fn check_async_synthesize(&self) -> Result<JobHandle, SmokeError> {
        let step = SmokeStep::AsyncSynthesize;
        let job = self
            .api
            .synthesize(&self.request)
            .await
            .map_err(|e| failed(step, e))?;

        if job.task_id.trim().is_empty() {
            return Err(violated(step, "task_id is empty"));
        }
        if job.status_url.trim().is_empty() {
            return Err(violated(step, "status_url is empty"));
        }

        tracing::info!(
            task_id = %job.task_id,
            status_url = %job.status_url,
            "Async synthesis job accepted"
        );
        Ok(job)
    }

    async fn check_task_status(&self, status_url: &str) -> Result<JobStatus, SmokeError> {
        let step = SmokeStep::TaskStatus;
        let status = self
            .api
            .task_status(status_url)
            .await
            .map_err(|e| failed(step, e))?;

        match &status.result {
            Some(result) => {
                if result.success && (result.wav_url.is_empty() || result.mp3_url.is_empty()) {
                    return Err(violated(step, "successful result is missing audio urls"));
                }
                tracing::info!(
                    status = %status.status,
                    success = result.success,
                    wav_url = %result.wav_url,
                    mp3_url = %result.mp3_url,
                    "Task status check passed"
                );
            }
            None if status.is_finished() => {
                return Err(violated(step, "finished job has no result"));
            }
            None => {
                tracing::info!(
                    status = %status.status,
                    finished = status.is_finished(),
                    "Task status check passed"
                );
            }
        }
        Ok(status)
    }

    async fn check_confirm_script(&self) -> Result<ConfirmResponse, SmokeError> {
        let step = SmokeStep::ConfirmScript;
        let confirmation = self
            .api
            .confirm_script(&self.request)
            .await
            .map_err(|e| failed(step, e))?;

        if !confirmation.success {
            return Err(violated(step, "success is false"));
        }
        for (field, value) in [
            ("audio_id", &confirmation.audio_id),
            ("wav_url", &confirmation.wav_url),
            ("mp3_url", &confirmation.mp3_url),
        ] {
            if value.is_empty() {
                return Err(violated(step, format!("{} is empty", field)));
            }
        }

        tracing::info!(
            audio_id = %confirmation.audio_id,
            wav_url = %confirmation.wav_url,
            mp3_url = %confirmation.mp3_url,
            "confirm_script check passed"
        );
        Ok(confirmation)
    }
}

fn failed(step: SmokeStep, err: super::TtsClientError) -> SmokeError {
    tracing::error!(step = %step, error = %err, "Smoke test step failed");
    SmokeError::client(step, err)
}

fn violated(step: SmokeStep, message: impl Into<String>) -> SmokeError {
    let err = SmokeError::contract(step, message);
    tracing::error!(step = %step, error = %err, "Smoke test contract violated");
    err
}
