use std::fmt;

/// Failures talking to the TTS HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum TtsClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status code {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: String,
        actual: u16,
        body: String,
    },
    #[error("failed to parse response: {message}; body: {body}")]
    Decode { message: String, body: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TtsClientError {
    fn from(err: reqwest::Error) -> Self {
        TtsClientError::Transport(err.to_string())
    }
}

/// The four steps of a smoke run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeStep {
    VoiceTypes,
    AsyncSynthesize,
    TaskStatus,
    ConfirmScript,
}

impl SmokeStep {
    pub const ALL: [SmokeStep; 4] = [
        SmokeStep::VoiceTypes,
        SmokeStep::AsyncSynthesize,
        SmokeStep::TaskStatus,
        SmokeStep::ConfirmScript,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SmokeStep::VoiceTypes => "voice_types",
            SmokeStep::AsyncSynthesize => "async synthesize",
            SmokeStep::TaskStatus => "task status",
            SmokeStep::ConfirmScript => "confirm_script",
        }
    }
}

impl fmt::Display for SmokeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SmokeErrorKind {
    #[error(transparent)]
    Client(#[from] TtsClientError),
    #[error("contract violation: {0}")]
    Contract(String),
}

/// First failure of a smoke run. Every failure is fatal.
#[derive(Debug, thiserror::Error)]
#[error("{step} step failed: {kind}")]
pub struct SmokeError {
    pub step: SmokeStep,
    #[source]
    pub kind: SmokeErrorKind,
}

impl SmokeError {
    pub fn client(step: SmokeStep, err: TtsClientError) -> Self {
        Self {
            step,
            kind: SmokeErrorKind::Client(err),
        }
    }

    pub fn contract(step: SmokeStep, message: impl Into<String>) -> Self {
        Self {
            step,
            kind: SmokeErrorKind::Contract(message.into()),
        }
    }
}
