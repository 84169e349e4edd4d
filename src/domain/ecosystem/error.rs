#[derive(Debug, thiserror::Error)]
pub enum EcosystemError {
    #[error("failed to read ecosystem file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse ecosystem file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid memory limit '{0}'")]
    InvalidMemoryLimit(String),
    #[error("invalid ecosystem: {0}")]
    Invalid(String),
}
