pub mod error;
pub mod memory;
pub mod model;

pub use error::EcosystemError;
pub use memory::MemoryLimit;
pub use model::{Ecosystem, ProcessDefinition, DEFAULT_LOG_DATE_FORMAT};
