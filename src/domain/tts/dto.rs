use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Voice gender as the TTS API labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "女声")]
    Female,
    #[serde(rename = "男声")]
    Male,
}

impl Gender {
    pub fn as_label(&self) -> &'static str {
        match self {
            Gender::Female => "女声",
            Gender::Male => "男声",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Body for POST /tts/synthesize (multipart) and POST /tts/confirm_script (JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub gender: Gender,
    pub voice_label: String,
}

impl SynthesisRequest {
    /// The fixed payload used by the smoke test.
    pub fn smoke_default() -> Self {
        Self {
            text: "这是一个测试文本，用于验证TTS API的功能。".to_string(),
            gender: Gender::Female,
            voice_label: "女声1大气磁性".to_string(),
        }
    }
}

/// Response for GET /tts/voice_types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceCatalog {
    #[serde(default)]
    pub voice_types: VoiceTypes,
}

/// Voices per gender. Entries are kept as raw JSON since the service only
/// promises a list, and an explicit `null` reads as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceTypes {
    #[serde(rename = "男声", default, deserialize_with = "null_as_empty")]
    pub male: Vec<Value>,
    #[serde(rename = "女声", default, deserialize_with = "null_as_empty")]
    pub female: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl VoiceCatalog {
    pub fn count(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.voice_types.male.len(),
            Gender::Female => self.voice_types.female.len(),
        }
    }
}

/// 202 response for POST /tts/synthesize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
    pub task_id: String,
    pub status_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub success: bool,
    #[serde(default)]
    pub wav_url: String,
    #[serde(default)]
    pub mp3_url: String,
}

/// Response for GET <status_url>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SynthesisResult>,
}

impl JobStatus {
    /// Whether the job reached a terminal state, judged from the status label.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status.to_lowercase().as_str(),
            "completed" | "success" | "done" | "finished" | "failed" | "error"
        )
    }
}

/// Response for POST /tts/confirm_script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub success: bool,
    #[serde(default)]
    pub audio_id: String,
    #[serde(default)]
    pub wav_url: String,
    #[serde(default)]
    pub mp3_url: String,
}
