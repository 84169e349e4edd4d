pub mod dto;
pub mod error;
pub mod smoke;

pub use dto::{
    ConfirmResponse, Gender, JobHandle, JobStatus, SynthesisRequest, SynthesisResult,
    VoiceCatalog, VoiceTypes,
};
pub use error::{SmokeError, SmokeErrorKind, SmokeStep, TtsClientError};
pub use smoke::{SmokeReport, SmokeTestService};
